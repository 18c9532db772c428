use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::AnalysisReport;
use crate::errors::AppError;
use crate::extraction::extract_text;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JD_FIELD: &str = "job_description";

#[derive(Debug, Deserialize)]
pub struct TextAnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub count: usize,
    pub skills: Vec<String>,
}

/// POST /api/v1/analyze
///
/// Multipart form with a `resume` file part and a `job_description` text part.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                resume = Some((file_name, data));
            }
            Some(JD_FIELD) => job_description = Some(field.text().await?),
            other => debug!("Ignoring multipart field {other:?}"),
        }
    }

    let (file_name, data) = resume
        .ok_or_else(|| AppError::Validation(format!("'{RESUME_FIELD}' file part is required")))?;
    let job_description = require_job_description(job_description)?;

    debug!("Received resume '{file_name}' ({} bytes)", data.len());
    let resume_text = extract_blocking(file_name, data).await;

    let report = state.analyzer.analyze(&resume_text, &job_description).await;
    Ok(Json(report))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<TextAnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let job_description = require_job_description(Some(req.job_description))?;
    let report = state
        .analyzer
        .analyze(&req.resume_text, &job_description)
        .await;
    Ok(Json(report))
}

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let skills = state.analyzer.vocabulary().phrases().to_vec();
    Json(SkillsResponse {
        count: skills.len(),
        skills,
    })
}

fn require_job_description(job_description: Option<String>) -> Result<String, AppError> {
    match job_description {
        Some(jd) if !jd.trim().is_empty() => Ok(jd),
        _ => Err(AppError::Validation(format!(
            "'{JD_FIELD}' must be a non-empty string"
        ))),
    }
}

/// Runs document parsing off the async runtime. A panicking parser counts as
/// an unreadable document.
async fn extract_blocking(file_name: String, data: Bytes) -> String {
    match tokio::task::spawn_blocking(move || extract_text(&file_name, &data)).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Document extraction task aborted: {e}");
            String::new()
        }
    }
}
