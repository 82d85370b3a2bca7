use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "seo-audit".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Audit the on-page SEO of web pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print the one-line metric summary shown after each analysis in verbose mode
pub fn print_summary(record: &seo_audit_core::AnalysisRecord, suggestions: usize) {
    eprintln!(
        "  {} {}  {} {:.1}  {} {}  {} {}",
        "Words:".dimmed(),
        record.metrics.word_count.to_string().bright_white(),
        "Avg sentence:".dimmed(),
        record.metrics.avg_sentence_length,
        "Headings:".dimmed(),
        record.metrics.num_headings.to_string().bright_white(),
        "Suggestions:".dimmed(),
        suggestions.to_string().bright_white()
    );
}
