pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/skills", get(handlers::handle_list_skills))
        .route("/api/v1/analyze", post(handlers::handle_analyze_upload))
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::analysis::SkillAnalyzer;
    use crate::config::Config;
    use crate::skills::semantic::DEFAULT_THRESHOLD;
    use crate::skills::SkillVocabulary;

    const BOUNDARY: &str = "skillgap-test-boundary";

    fn app() -> Router {
        app_with_config(Config::default())
    }

    fn app_with_config(config: Config) -> Router {
        let analyzer = SkillAnalyzer::new(
            Arc::new(SkillVocabulary::builtin().unwrap()),
            None,
            DEFAULT_THRESHOLD,
        );
        build_router(AppState {
            config,
            analyzer: Arc::new(analyzer),
        })
    }

    fn multipart_body(resume: Option<(&str, &str)>, jd: Option<&str>) -> String {
        let mut body = String::new();
        if let Some((file_name, content)) = resume {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        if let Some(jd) = jd {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\n{jd}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn upload(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_skills() {
        let response = app()
            .oneshot(Request::get("/api/v1/skills").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = json_body(response).await;
        assert!(body["count"].as_u64().unwrap() > 0);
        assert!(body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s == "python"));
    }

    #[tokio::test]
    async fn test_upload_txt_resume() {
        let resume = "Jane Doe\nAustin, TX\n\nPython and SQL since 2018, through 2023.";
        let response = app()
            .oneshot(upload(multipart_body(
                Some(("resume.txt", resume)),
                Some("Looking for Python, Java, SQL developer."),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["skills"]["score"], 66.67);
        assert_eq!(body["skills"]["missing"], serde_json::json!(["java"]));
        assert_eq!(body["resume_metadata"]["name"], "Jane Doe");
        assert_eq!(body["resume_metadata"]["location"], "Austin, TX");
        assert_eq!(body["resume_metadata"]["years_of_experience"], "5+ years");
        assert_eq!(body["semantic_status"], "skipped");
        assert_eq!(body["coverage"]["matched_count"], 2);
    }

    #[tokio::test]
    async fn test_unsupported_extension_yields_empty_report() {
        let response = app()
            .oneshot(upload(multipart_body(
                Some(("resume.rtf", "Python")),
                Some("Python"),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["skills"]["score"], 0.0);
        assert_eq!(body["resume_chars"], 0);
        assert!(body["resume_metadata"]["location"].is_null());
    }

    #[tokio::test]
    async fn test_oversize_upload_is_rejected() {
        let config = Config {
            max_upload_bytes: 256,
            ..Config::default()
        };
        let resume = "Python ".repeat(200);
        let response = app_with_config(config)
            .oneshot(upload(multipart_body(
                Some(("resume.txt", &resume)),
                Some("Python"),
            )))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "UPLOAD_ERROR");
    }

    #[tokio::test]
    async fn test_upload_within_limit_is_accepted() {
        let config = Config {
            max_upload_bytes: 4096,
            ..Config::default()
        };
        let response = app_with_config(config)
            .oneshot(upload(multipart_body(
                Some(("resume.txt", "Python")),
                Some("Python"),
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_resume_is_bad_request() {
        let response = app()
            .oneshot(upload(multipart_body(None, Some("Python"))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_blank_job_description_is_bad_request() {
        let response = app()
            .oneshot(upload(multipart_body(Some(("cv.txt", "Python")), Some("  "))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_text_endpoint() {
        let request = Request::post("/api/v1/analyze/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"resume_text":"Docker and AWS","job_description":"Docker, AWS, GCP"}"#,
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["skills"]["score"], 66.67);
        assert_eq!(body["skills"]["tagged"][0]["source"], "exact");
    }
}
