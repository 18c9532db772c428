//! Resume analysis pipeline: metadata → keyword skills → semantic skills → report.
//!
//! Single pass, stateless per request. Nothing here fails: a missing or broken
//! embedder degrades to keyword-only results.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::embedding::Embedder;
use crate::skills::{match_keywords, match_semantic, SkillVocabulary};

pub mod handlers;
pub mod metadata;
pub mod report;

use metadata::ResumeMetadata;
use report::{aggregate, Coverage, SkillReport};

/// Outcome of the semantic stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticStatus {
    Applied,
    /// No embedder configured.
    Skipped,
    /// Embedder configured but the call failed; semantic set left empty.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub resume_metadata: ResumeMetadata,
    pub skills: SkillReport,
    pub coverage: Coverage,
    pub semantic_status: SemanticStatus,
    pub resume_chars: usize,
}

/// Runs the analysis pipeline against a fixed vocabulary.
///
/// Carried in `AppState` as `Arc<SkillAnalyzer>`.
pub struct SkillAnalyzer {
    vocabulary: Arc<SkillVocabulary>,
    embedder: Option<Arc<dyn Embedder>>,
    threshold: f32,
}

impl SkillAnalyzer {
    pub fn new(
        vocabulary: Arc<SkillVocabulary>,
        embedder: Option<Arc<dyn Embedder>>,
        threshold: f32,
    ) -> Self {
        Self {
            vocabulary,
            embedder,
            threshold,
        }
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Analyzes one resume against one job description.
    pub async fn analyze(&self, resume_text: &str, jd_text: &str) -> AnalysisReport {
        let analysis_id = Uuid::new_v4();
        let resume_metadata = ResumeMetadata::from_text(resume_text);

        let resume_keyword = match_keywords(resume_text, &self.vocabulary);
        let jd_keyword = match_keywords(jd_text, &self.vocabulary);
        debug!(
            %analysis_id,
            "Keyword stage: resume={} jd={}",
            resume_keyword.len(),
            jd_keyword.len()
        );

        let (resume_semantic, semantic_status) = self.semantic_stage(analysis_id, resume_text).await;

        let skills = aggregate(&resume_keyword, &resume_semantic, &jd_keyword);
        let coverage = Coverage::from_report(&skills);

        info!(
            %analysis_id,
            score = skills.score,
            matched = skills.matched.len(),
            missing = skills.missing.len(),
            semantic = ?semantic_status,
            "Analysis complete"
        );

        AnalysisReport {
            analysis_id,
            generated_at: Utc::now(),
            resume_metadata,
            skills,
            coverage,
            semantic_status,
            resume_chars: resume_text.chars().count(),
        }
    }

    async fn semantic_stage(
        &self,
        analysis_id: Uuid,
        resume_text: &str,
    ) -> (BTreeSet<String>, SemanticStatus) {
        let Some(embedder) = &self.embedder else {
            return (BTreeSet::new(), SemanticStatus::Skipped);
        };

        match match_semantic(resume_text, &self.vocabulary, embedder.as_ref(), self.threshold).await
        {
            Ok(found) => {
                debug!(%analysis_id, "Semantic stage ({}): {} skills", embedder.backend(), found.len());
                (found, SemanticStatus::Applied)
            }
            Err(e) => {
                warn!(%analysis_id, "Semantic matching via {} failed, using keywords only: {e}", embedder.backend());
                (BTreeSet::new(), SemanticStatus::Failed)
            }
        }
    }
}
