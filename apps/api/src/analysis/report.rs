//! Aggregator — combines keyword and semantic results into the skill-gap report.
//!
//! The job description is matched by keywords only. Semantic matches enrich the
//! tagged resume skill list but never change `matched`, `missing` or `score`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How a resume skill was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    /// Whole-phrase keyword occurrence.
    Exact,
    /// Embedding similarity above threshold, no keyword occurrence.
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSkill {
    pub skill: String,
    pub source: SkillSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillReport {
    /// Percentage of JD skills found in the resume, 0–100, two decimals.
    pub score: f64,
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
    /// Keyword ∪ semantic resume skills, sorted by skill.
    pub tagged: Vec<TaggedSkill>,
}

/// Figures behind the matched-vs-missing bar and pie charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub matched_count: usize,
    pub missing_count: usize,
    /// One decimal, as the pie chart labels them.
    pub matched_percent: f64,
    pub missing_percent: f64,
}

impl Coverage {
    pub fn from_report(report: &SkillReport) -> Self {
        let matched_count = report.matched.len();
        let missing_count = report.missing.len();
        let total = matched_count + missing_count;

        let percent = |n: usize| {
            if total == 0 {
                0.0
            } else {
                round_to(100.0 * n as f64 / total as f64, 1)
            }
        };

        Self {
            matched_count,
            missing_count,
            matched_percent: percent(matched_count),
            missing_percent: percent(missing_count),
        }
    }
}

/// Builds the skill report.
///
/// - `matched = resume_keyword ∩ jd_keyword`
/// - `missing = jd_keyword − resume_keyword`
/// - `score = round(100 · |matched| / max(|jd_keyword|, 1), 2)`
/// - every skill in `resume_keyword ∪ resume_semantic` is tagged, `Exact` winning ties
pub fn aggregate(
    resume_keyword: &BTreeSet<String>,
    resume_semantic: &BTreeSet<String>,
    jd_keyword: &BTreeSet<String>,
) -> SkillReport {
    let matched: BTreeSet<String> = resume_keyword.intersection(jd_keyword).cloned().collect();
    let missing: BTreeSet<String> = jd_keyword.difference(resume_keyword).cloned().collect();
    let score = round_to(
        100.0 * matched.len() as f64 / jd_keyword.len().max(1) as f64,
        2,
    );

    let tagged = resume_keyword
        .union(resume_semantic)
        .map(|skill| TaggedSkill {
            skill: skill.clone(),
            source: if resume_keyword.contains(skill) {
                SkillSource::Exact
            } else {
                SkillSource::Semantic
            },
        })
        .collect();

    SkillReport {
        score,
        matched,
        missing,
        tagged,
    }
}

/// Rounds half to even, so exact ties land where Python's `round` puts them.
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
