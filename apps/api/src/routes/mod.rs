pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::import::handlers as import;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions and form fields
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/settings",
            put(session::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:id/resume",
            put(session::handle_update_resume),
        )
        // Profile import
        .route(
            "/api/v1/sessions/:id/import/linkedin",
            post(import::handle_linkedin_import),
        )
        // Generation views
        .route(
            "/api/v1/sessions/:id/resume/generate",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter/generate",
            post(generation::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/sessions/:id/interview-prep/generate",
            post(generation::handle_generate_interview_prep),
        )
        .route(
            "/api/v1/sessions/:id/salary-guide/generate",
            post(generation::handle_generate_salary_guide),
        )
        .route(
            "/api/v1/sessions/:id/references/generate",
            post(generation::handle_generate_reference_letter),
        )
        // Downloads
        .route(
            "/api/v1/sessions/:id/documents/:kind/download",
            get(export::handle_download),
        )
        .route(
            "/api/v1/sessions/:id/documents/:kind/link",
            get(export::handle_download_link),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::export::writer::ExportWriter;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::session::store::SessionStore;

    struct Harness {
        router: Router,
        llm: Arc<ScriptedGenerator>,
        _scratch: tempfile::TempDir,
    }

    fn harness(llm: ScriptedGenerator) -> Harness {
        let scratch = tempfile::tempdir().unwrap();
        let llm = Arc::new(llm);
        let state = AppState {
            llm: llm.clone(),
            sessions: SessionStore::new(chrono::Duration::minutes(30)),
            exporter: ExportWriter::new(None, scratch.path().to_path_buf()),
        };
        Harness {
            router: build_router(state),
            llm,
            _scratch: scratch,
        }
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send(router, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn new_session(router: &Router) -> String {
        let (status, body) = send_json(router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_pdf_unavailable() {
        let h = harness(ScriptedGenerator::replying("x"));
        let (status, body) = send_json(&h.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["pdf_export_available"], false);
    }

    #[tokio::test]
    async fn test_generate_resume_in_selected_language_with_txt_download() {
        let h = harness(ScriptedGenerator::replying("# Ada Lovelace\nAnalyst"));
        let id = new_session(&h.router).await;

        let (status, _) = send_json(
            &h.router,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/settings"),
            Some(json!({"language": "French", "export_format": "txt"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        send_json(
            &h.router,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/resume"),
            Some(json!({"name": "Ada Lovelace", "skills": "Mathematics"})),
        )
        .await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/resume/generate"),
            Some(json!({"template": "Combined"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["content"], "# Ada Lovelace\nAnalyst");
        assert_eq!(body["document"]["language"], "French");
        assert_eq!(body["download"]["filename"], "resume.txt");
        assert!(body["download"]["link_html"]
            .as_str()
            .unwrap()
            .contains("download=\"resume.txt\""));

        let prompt = h.llm.last_prompt().unwrap();
        assert!(prompt.starts_with("Create French resume with template: Combined"));
        assert!(prompt.ends_with("Respond in French language"));

        let (status, bytes) = send(
            &h.router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/documents/resume/download"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"# Ada Lovelace\nAnalyst");
    }

    #[tokio::test]
    async fn test_pdf_offer_reports_missing_renderer_without_failing_generation() {
        let h = harness(ScriptedGenerator::replying("Dear hiring manager"));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/cover-letter/generate"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["download"]["format"], "pdf");
        assert!(body["download"]["link_html"].is_null());
        assert!(body["download"]["error"]
            .as_str()
            .unwrap()
            .contains("wkhtmltopdf"));

        let (status, body) = send_json(
            &h.router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/documents/cover_letter/link"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "PDF_RENDERER_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_link_format_query_overrides_session_format() {
        let h = harness(ScriptedGenerator::replying("Advice"));
        let id = new_session(&h.router).await;
        send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/salary-guide/generate"),
            Some(json!({
                "industry": "Retail",
                "experience_years": 3,
                "location": "Leeds",
                "current_salary": 30000
            })),
        )
        .await;

        let (status, body) = send_json(
            &h.router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/documents/salary_guide/link?format=docx"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["filename"], "salary_guide.docx");
    }

    #[tokio::test]
    async fn test_upstream_failure_leaves_session_unchanged() {
        let h = harness(ScriptedGenerator::failing(500));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/interview-prep/generate"),
            Some(json!({"company_type": "Corporate", "technical_skills": "Go"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "LLM_ERROR");

        let (_, session) =
            send_json(&h.router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert!(session["interview_guide"].is_null());
        assert_eq!(session["interview_prep"]["technical_skills"], "");
    }

    #[tokio::test]
    async fn test_reference_letters_accumulate() {
        let h = harness(ScriptedGenerator::replying("To whom it may concern"));
        let id = new_session(&h.router).await;
        let request = json!({
            "referee_name": "Grace Hopper",
            "referee_position": "Director",
            "relationship": "Manager",
            "duration": "2 years"
        });

        for _ in 0..2 {
            let (status, _) = send_json(
                &h.router,
                Method::POST,
                &format!("/api/v1/sessions/{id}/references/generate"),
                Some(request.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, session) =
            send_json(&h.router, Method::GET, &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(session["reference_letters"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_linkedin_import_fills_resume_form() {
        let h = harness(ScriptedGenerator::replying(
            r#"{"name": "Ada", "experience": ["Analyst"], "education": ["Maths"], "skills": ["Rust", "SQL"]}"#,
        ));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/import/linkedin"),
            Some(json!({"url": "https://www.linkedin.com/in/ada"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imported"], true);
        assert_eq!(body["resume_data"]["skills"], "Rust, SQL");
        assert_eq!(body["resume_data"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_linkedin_import_bad_prefix_is_reported_not_raised() {
        let h = harness(ScriptedGenerator::replying("{}"));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/import/linkedin"),
            Some(json!({"url": "https://example.com/in/ada"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imported"], false);
        assert_eq!(body["profile"], json!({}));
        assert!(body["error"].as_str().unwrap().contains("Invalid LinkedIn"));
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_linkedin_import_padded_url_is_rejected() {
        let h = harness(ScriptedGenerator::replying(
            r#"{"name": "Ada", "experience": [], "education": [], "skills": []}"#,
        ));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/import/linkedin"),
            Some(json!({"url": "   https://www.linkedin.com/in/ada"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["imported"], false);
        assert_eq!(h.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let h = harness(ScriptedGenerator::replying("x"));
        let id = new_session(&h.router).await;

        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{id}/salary-guide/generate"),
            Some(json!({
                "industry": "Retail",
                "experience_years": -3,
                "location": "Leeds",
                "current_salary": 30000
            })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
        assert!(body["error"]["message"].is_string());
        assert_eq!(h.llm.calls(), 0);

        let (status, body) = send_json(
            &h.router,
            Method::PUT,
            &format!("/api/v1/sessions/{id}/settings"),
            Some(json!({"language": "Klingon"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let h = harness(ScriptedGenerator::replying("x"));
        let (status, body) = send_json(
            &h.router,
            Method::POST,
            &format!("/api/v1/sessions/{}/cover-letter/generate", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_download_before_generation_is_not_found() {
        let h = harness(ScriptedGenerator::replying("x"));
        let id = new_session(&h.router).await;
        let (status, _) = send(
            &h.router,
            Method::GET,
            &format!("/api/v1/sessions/{id}/documents/interview_guide/download?format=txt"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let h = harness(ScriptedGenerator::replying("x"));
        let id = new_session(&h.router).await;
        let uri = format!("/api/v1/sessions/{id}");
        let (status, _) = send(&h.router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&h.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
