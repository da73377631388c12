//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

lazy_static! {
    /// `---` (or `---yaml`) line, YAML block, closing `---` line
    static ref YAML_BLOCK: Regex =
        Regex::new(r"(?s)\A\x{FEFF}?---(?:yaml)?[ \t]*\r?\n(|.*?\r?\n)---[ \t]*(?:\r?\n|\z)")
            .unwrap();
}

/// Reasons a document header cannot be turned into post metadata
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("document does not start with a front-matter block")]
    Missing,

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required front-matter field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub summary: Option<String>,
}

impl FrontMatter {
    /// Split a document into its front-matter and the body that follows it.
    /// The body is returned verbatim.
    pub fn extract(text: &str) -> Result<(Self, &str), FrontMatterError> {
        let caps = YAML_BLOCK
            .captures(text)
            .ok_or(FrontMatterError::Missing)?;
        let block_end = caps.get(0).map_or(0, |m| m.end());
        let yaml = caps.get(1).map_or("", |m| m.as_str());

        let fm = if yaml.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        Ok((fm, &text[block_end..]))
    }

    /// The required, non-empty title
    pub fn title(&self) -> Result<&str, FrontMatterError> {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(FrontMatterError::MissingField("title"))
    }

    /// The required publication timestamp
    pub fn published_at(&self) -> Result<DateTime<Utc>, FrontMatterError> {
        let raw = self
            .published_at
            .as_deref()
            .ok_or(FrontMatterError::MissingField("publishedAt"))?;
        parse_date_string(raw).ok_or_else(|| FrontMatterError::InvalidDate(raw.to_string()))
    }
}

/// Parse a date string in various formats. Values without an offset are UTC.
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // YAML timestamps may put the offset after a space or omit its minutes
    let offset_formats = [
        "%Y-%m-%d %H:%M:%S%.f %#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M:%S%.f %#z",
        "%Y-%m-%dT%H:%M:%S%.f%#z",
    ];
    for fmt in offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}
