//! Analysis record: the full structured output of auditing one page.
//!
//! This module defines [`AnalysisRecord`], which is what the store writes
//! to disk, plus the small value types it is built from. The JSON shape is
//! stable: `url`, `analyzed_at`, `metrics`, `headings`, `internal_links`,
//! `external_links`, `top_keywords`, in that order.

use std::fmt;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::metrics::MetricSet;
use crate::suggest::{Suggestion, suggest};

/// A hyperlink found on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Anchor text, trimmed.
    pub text: String,
    /// The raw `href` attribute value.
    pub href: String,
}

impl LinkRef {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self { text: text.into(), href: href.into() }
    }
}

/// Keyword frequencies ordered by descending count.
///
/// Serialized as a JSON object whose key order is the ranking order, and
/// read back in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords(Vec<(String, usize)>);

impl Keywords {
    pub fn new(entries: Vec<(String, usize)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Count for `word`, if it made the list.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.0.iter().find(|(w, _)| w == word).map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl Serialize for Keywords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (word, count) in &self.0 {
            map.serialize_entry(word, count)?;
        }
        map.end()
    }
}

struct KeywordsVisitor;

impl<'de> Visitor<'de> for KeywordsVisitor {
    type Value = Keywords;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of keyword to count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((word, count)) = access.next_entry::<String, usize>()? {
            entries.push((word, count));
        }
        Ok(Keywords(entries))
    }
}

impl<'de> Deserialize<'de> for Keywords {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeywordsVisitor)
    }
}

/// Local wall-clock timestamps without a timezone, e.g. `2026-10-19T14:03:07.123456`.
///
/// The fractional part is omitted when it is zero.
mod local_iso {
    use chrono::{NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = if value.nanosecond() == 0 {
            value.format("%Y-%m-%dT%H:%M:%S").to_string()
        } else {
            value.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
        };
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<NaiveDateTime>().map_err(serde::de::Error::custom)
    }
}

/// The complete result of analyzing one URL.
///
/// Created once per analysis and never mutated afterwards. Suggestions are
/// not stored: they are regenerated from `metrics` by [`AnalysisRecord::suggestions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub url: String,
    #[serde(with = "local_iso")]
    pub analyzed_at: NaiveDateTime,
    pub metrics: MetricSet,
    pub headings: Vec<String>,
    pub internal_links: Vec<LinkRef>,
    pub external_links: Vec<LinkRef>,
    pub top_keywords: Keywords,
}

impl AnalysisRecord {
    /// Assembles a record stamped with the current local time (microsecond precision).
    pub fn new(
        url: String, metrics: MetricSet, headings: Vec<String>, internal_links: Vec<LinkRef>,
        external_links: Vec<LinkRef>, top_keywords: Keywords,
    ) -> Self {
        Self {
            url,
            analyzed_at: Local::now().naive_local().trunc_subsecs(6),
            metrics,
            headings,
            internal_links,
            external_links,
            top_keywords,
        }
    }

    /// Suggestions triggered by this record's metrics.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        suggest(&self.metrics)
    }

    /// Serializes the record as 2-space indented JSON.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
