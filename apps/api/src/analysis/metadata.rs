//! Resume metadata heuristics — name, location, summary and experience span.
//!
//! Each function is pure, best-effort and sensitive to the raw text layout.
//! "Nothing found" is an explicit `None`, never a sentinel string.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

const SUMMARY_MAX_CHARS: usize = 300;

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*,?[ \t]+[A-Z]{2}\b")
        .expect("location pattern is valid")
});

static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph pattern is valid"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("year pattern is valid"));

/// Span between the earliest and latest year mentioned in a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearsOfExperience {
    LessThanOneYear,
    Years(u32),
}

impl fmt::Display for YearsOfExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearsOfExperience::LessThanOneYear => write!(f, "Less than 1 year"),
            YearsOfExperience::Years(n) => write!(f, "{n}+ years"),
        }
    }
}

impl Serialize for YearsOfExperience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeMetadata {
    pub name: String,
    pub location: Option<String>,
    pub summary: String,
    pub years_of_experience: Option<YearsOfExperience>,
}

impl ResumeMetadata {
    pub fn from_text(text: &str) -> Self {
        Self {
            name: extract_name(text),
            location: extract_location(text),
            summary: extract_summary(text),
            years_of_experience: extract_years_of_experience(text),
        }
    }
}

/// First non-blank line, verbatim. Empty for an empty document.
pub fn extract_name(text: &str) -> String {
    text.lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}

/// First "Capitalized City, ST" style match. Purely syntactic.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RE.find(text).map(|m| m.as_str().to_string())
}

/// First blank-line-delimited paragraph, trimmed and capped at 300 characters.
pub fn extract_summary(text: &str) -> String {
    let text = text.trim();
    let first = PARAGRAPH_BREAK_RE
        .split(text)
        .next()
        .unwrap_or_default()
        .trim();

    if first.chars().count() > SUMMARY_MAX_CHARS {
        let truncated: String = first.chars().take(SUMMARY_MAX_CHARS).collect();
        format!("{}...", truncated.trim_end())
    } else {
        first.to_string()
    }
}

/// Latest minus earliest 19xx/20xx year token; `None` when no year appears.
pub fn extract_years_of_experience(text: &str) -> Option<YearsOfExperience> {
    let years: Vec<u32> = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let min = years.iter().min()?;
    let max = years.iter().max()?;
    Some(match max - min {
        0 => YearsOfExperience::LessThanOneYear,
        n => YearsOfExperience::Years(n),
    })
}
