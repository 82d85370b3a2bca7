//! Text metrics: word counts, sentence segmentation and keyword frequency.
//!
//! Everything here works on the space-joined paragraph text of a page.
//! Sentence segmentation is rule based: a run of `.`, `!` or `?` (plus any
//! closing quotes or brackets) followed by whitespace ends a sentence. A lone
//! period is not a boundary when the next word starts lowercase or with a
//! digit, or when it closes a title (`Dr.`), a dotted abbreviation (`e.g.`,
//! `U.S.`) or a run of initials (`J. R. R. Tolkien`).

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::record::Keywords;
use crate::stopwords::is_stopword;

/// Number of keywords kept in a record.
pub const TOP_KEYWORDS: usize = 10;

/// Page-level measurements the suggestion rules run against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub word_count: usize,
    pub avg_sentence_length: f64,
    pub num_headings: usize,
    pub num_internal_links: usize,
    pub num_external_links: usize,
}

impl MetricSet {
    /// Computes metrics from paragraph text and the already-counted structure.
    pub fn compute(paragraphs_text: &str, num_headings: usize, num_internal_links: usize, num_external_links: usize) -> Self {
        let word_count = word_count(paragraphs_text);
        let sentences = split_sentences(paragraphs_text).len();
        let avg_sentence_length = if sentences == 0 { 0.0 } else { word_count as f64 / sentences as f64 };

        Self { word_count, avg_sentence_length, num_headings, num_internal_links, num_external_links }
    }
}

/// Count of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 7] = ['"', '\'', ')', ']', '”', '’', '»'];
const OPENERS: [char; 6] = ['"', '\'', '(', '[', '“', '«'];

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "hon", "gen", "sen", "rep", "gov", "capt", "lt", "col", "sgt", "mt",
];

/// Splits text into trimmed, non-empty sentences.
///
/// Text without any terminal punctuation is a single sentence; blank text
/// has none.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !TERMINATORS.contains(&chars[i].1) {
            i += 1;
            continue;
        }

        let punct_start = i;
        let mut j = i;
        while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
            j += 1;
        }
        let single_period = j - punct_start == 1 && chars[punct_start].1 == '.';
        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |(idx, _)| *idx);
        let followed_by_space = chars.get(j).is_none_or(|(_, c)| c.is_whitespace());

        let continues = single_period && period_continues(&text[start..chars[punct_start].0], &text[end..]);
        if followed_by_space && !continues {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
        i = j;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}

/// Whether a lone period between `before` and `after` sits inside a sentence.
fn period_continues(before: &str, after: &str) -> bool {
    let next = after.split_whitespace().next().map(|w| w.trim_start_matches(OPENERS));
    if next.and_then(|w| w.chars().next()).is_some_and(|c| c.is_lowercase() || c.is_numeric()) {
        return true;
    }

    let mut words = before.split_whitespace().rev().map(|w| w.trim_start_matches(OPENERS));
    let Some(word) = words.next() else {
        return false;
    };

    if TITLES.contains(&word.to_lowercase().as_str()) || is_dotted_abbreviation(word) {
        return true;
    }
    if is_initial(word) {
        let prev = words.next();
        return prev.is_none()
            || prev.and_then(|w| w.strip_suffix('.')).is_some_and(is_initial)
            || next.and_then(|w| w.strip_suffix('.')).is_some_and(is_initial);
    }
    false
}

/// `e.g`, `i.e`, `U.S`: dot-separated single letters.
fn is_dotted_abbreviation(word: &str) -> bool {
    word.contains('.') && word.split('.').all(|part| {
        let mut chars = part.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    })
}

/// A single uppercase letter other than the pronoun `I`.
fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I')
}

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{N}_]+(?:['’][\p{Alphabetic}]+)?").expect("token pattern is valid")
});

/// Word tokens of `text`, with clitics (`'s`, `n't`, `'re`...) split off their stem.
///
/// Punctuation is dropped entirely.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for m in TOKEN_RE.find_iter(text) {
        let token = m.as_str();
        let Some(apos) = token.find(['\'', '’']) else {
            tokens.push(token);
            continue;
        };

        let (mut stem, mut clitic) = token.split_at(apos);
        if clitic.ends_with(['t', 'T'])
            && clitic.chars().count() == 2
            && stem.len() > 1
            && stem.ends_with(['n', 'N'])
        {
            let split = stem.len() - 1;
            clitic = &token[split..];
            stem = &token[..split];
        }
        tokens.push(stem);
        tokens.push(clitic);
    }

    tokens
}

/// Whether every character of `token` is alphabetic.
pub fn is_alpha(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// The `limit` most frequent keywords of `text`.
///
/// Keywords are alphabetic, non-stopword tokens longer than two characters,
/// lowercased. Ties keep first-occurrence order.
pub fn top_keywords(text: &str, limit: usize) -> Keywords {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for token in tokenize(text) {
        if !is_alpha(token) || token.chars().count() <= 2 || is_stopword(token) {
            continue;
        }
        let word = token.to_lowercase();
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                order.push(word);
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            (word, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    Keywords::new(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_empty_text() {
        let metrics = MetricSet::compute("", 0, 0, 0);
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.avg_sentence_length, 0.0);
        assert!(top_keywords("", TOP_KEYWORDS).is_empty());
    }

    #[test]
    fn test_whitespace_only() {
        let metrics = MetricSet::compute("   \n\t ", 0, 0, 0);
        assert_eq!(metrics.word_count, 0);
        assert_eq!(metrics.avg_sentence_length, 0.0);
    }

    #[test]
    fn test_average_sentence_length() {
        let metrics = MetricSet::compute("One two three. Four five six seven eight!", 2, 1, 0);
        assert_eq!(metrics.word_count, 8);
        assert_eq!(metrics.avg_sentence_length, 4.0);
        assert_eq!(metrics.num_headings, 2);
        assert_eq!(metrics.num_internal_links, 1);
    }

    #[test]
    fn test_sentences_ending_in_domains() {
        let text = "Read more at example.com. Our guide covers everything. Check docs.rs. It helps.";
        let metrics = MetricSet::compute(text, 0, 0, 0);
        assert_eq!(metrics.word_count, 12);
        assert_eq!(metrics.avg_sentence_length, 3.0);
    }

    #[rstest]
    #[case("Hello world. How are you? Fine!", vec!["Hello world.", "How are you?", "Fine!"])]
    #[case("No terminal punctuation here", vec!["No terminal punctuation here"])]
    #[case("Mr. Smith went home. He slept.", vec!["Mr. Smith went home.", "He slept."])]
    #[case("J. R. R. Tolkien wrote books. Many.", vec!["J. R. R. Tolkien wrote books.", "Many."])]
    #[case("Use tools, e.g. cargo. Done.", vec!["Use tools, e.g. cargo.", "Done."])]
    #[case("Wait... what?! Really.", vec!["Wait...", "what?!", "Really."])]
    #[case("He said \"stop.\" Then left.", vec!["He said \"stop.\"", "Then left."])]
    #[case("Version 1.5 shipped. Nice", vec!["Version 1.5 shipped.", "Nice"])]
    #[case("Visit example.com. Then leave.", vec!["Visit example.com.", "Then leave."])]
    #[case("The price rose to 1.5. Then it fell.", vec!["The price rose to 1.5.", "Then it fell."])]
    #[case("So did I. Then we left.", vec!["So did I.", "Then we left."])]
    #[case("We chose Plan B. It worked.", vec!["We chose Plan B.", "It worked."])]
    #[case("The answer is no. We left.", vec!["The answer is no.", "We left."])]
    #[case("Ask Dr. Jones. She knows.", vec!["Ask Dr. Jones.", "She knows."])]
    #[case("Made in the U.S. Army style.", vec!["Made in the U.S. Army style."])]
    #[case("Bring pens, paper, etc. and food.", vec!["Bring pens, paper, etc. and food."])]
    #[case("See page no. 4 for details.", vec!["See page no. 4 for details."])]
    fn test_split_sentences(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_sentences(text), expected);
    }

    #[test]
    fn test_tokenize_splits_clitics() {
        assert_eq!(tokenize("Mary's car"), vec!["Mary", "'s", "car"]);
        assert_eq!(tokenize("don't stop"), vec!["do", "n't", "stop"]);
        assert_eq!(tokenize("hello, world!"), vec!["hello", "world"]);
    }

    #[test]
    fn test_is_alpha() {
        assert!(is_alpha("rust"));
        assert!(is_alpha("café"));
        assert!(!is_alpha("rust2024"));
        assert!(!is_alpha("'s"));
        assert!(!is_alpha(""));
    }

    #[test]
    fn test_keywords_filter_and_rank() {
        let text = "Rust is fast. Rust is safe. The rust compiler is fast and an ox is not. Go go go.";
        let keywords = top_keywords(text, TOP_KEYWORDS);

        assert_eq!(keywords.get("rust"), Some(3));
        assert_eq!(keywords.get("fast"), Some(2));
        assert_eq!(keywords.get("the"), None);
        assert_eq!(keywords.get("ox"), None);
        assert_eq!(keywords.get("go"), None);

        let first = keywords.iter().next().unwrap();
        assert_eq!(first, ("rust", 3));
    }

    #[test]
    fn test_keywords_capped_and_sorted() {
        let words = [
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliet", "kilo",
            "lima", "mike", "november", "oscar",
        ];
        let text: String = words
            .iter()
            .enumerate()
            .map(|(i, word)| format!("{} ", word).repeat(i + 1))
            .collect();
        let keywords = top_keywords(&text, TOP_KEYWORDS);

        assert_eq!(keywords.len(), TOP_KEYWORDS);
        let counts: Vec<usize> = keywords.iter().map(|(_, c)| c).collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert!(counts.iter().all(|c| *c >= 1));
        assert_eq!(keywords.iter().next(), Some(("oscar", 15)));
    }

    #[test]
    fn test_keyword_ties_keep_first_seen_order() {
        let keywords = top_keywords("zebra apple mango", TOP_KEYWORDS);
        let words: Vec<&str> = keywords.iter().map(|(w, _)| w).collect();
        assert_eq!(words, vec!["zebra", "apple", "mango"]);
    }
}
