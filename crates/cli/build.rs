use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("seo-audit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Audit the on-page SEO of web pages")
        .arg(clap::arg!([URL] ... "URLs to analyze"))
        .arg(clap::arg!(--bulk <FILE> "File with one URL per line, or '-' for stdin"))
        .arg(clap::arg!(--file <PATH> "Analyze a local HTML file instead of fetching"))
        .arg(clap::arg!(--"base-url" <URL> "URL the local file is served from"))
        .arg(clap::arg!(--save "Save each successful analysis as pending"))
        .arg(clap::arg!(--approve "Approve and save each successful analysis"))
        .arg(
            clap::arg!(--"results-dir" <DIR> "Directory for saved analyses")
                .default_value("results")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests"))
        .arg(
            clap::arg!(--"heading-order" <ORDER> "Heading ordering in reports and records")
                .default_value("level")
                .value_parser(["level", "document"]),
        )
        .arg(
            clap::arg!(--"link-match" <RULE> "Rule for internal vs external links")
                .default_value("substring")
                .value_parser(["substring", "host"]),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "seo-audit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "seo-audit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "seo-audit", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "seo-audit", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
