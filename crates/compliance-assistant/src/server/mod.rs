//! HTTP server for the compliance assistant

pub mod form;
pub mod routes;
pub mod state;

use axum::{http::HeaderValue, routing::get, Json, Router};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AssistantConfig;
use crate::error::{Error, Result};
use crate::types::HealthResponse;
use state::AppState;

/// Compliance assistant HTTP server
pub struct ComplianceServer {
    config: AssistantConfig,
    state: AppState,
}

impl ComplianceServer {
    /// Create a new server
    pub async fn new(config: AssistantConfig) -> Result<Self> {
        let state = AppState::new(config.clone()).await?;
        Ok(Self { config, state })
    }

    /// Create with default configuration
    pub async fn default() -> Result<Self> {
        Self::new(AssistantConfig::default()).await
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = router(self.state);

        tracing::info!("Starting compliance assistant on http://{}", addr);
        tracing::info!("API documentation: http://{}/api/info", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Build the router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let server = &state.config().server;
    let cors = cors_layer(&server.cors_origins);
    let max_upload_size = server.max_upload_size;

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::assistant_routes(max_upload_size))
        // Mock document routes answer at the root and under /api
        .merge(routes::document_routes(max_upload_size))
        .nest("/api", routes::api_routes(max_upload_size))
        .with_state(state)
        // Middleware layers (applied bottom to top)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::collections::HashSet;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::ingestion::fixtures::{build_pdf, courier};
    use crate::providers::llm::MockLlmProvider;
    use crate::providers::qa::{MockQaPipeline, QaAnswer};
    use crate::providers::QaPipeline;
    use crate::storage::InMemorySessionStore;

    const BOUNDARY: &str = "compliance-test-boundary";

    struct TestApp {
        router: Router,
        _uploads: TempDir,
        upload_dir: std::path::PathBuf,
    }

    fn quiet_llm() -> MockLlmProvider {
        let mut llm = MockLlmProvider::new();
        llm.expect_name().return_const("mock".to_string());
        llm.expect_model().return_const("mock-model".to_string());
        llm
    }

    fn app(llm: MockLlmProvider, qa: Option<Arc<dyn QaPipeline>>) -> TestApp {
        let uploads = tempfile::tempdir().unwrap();
        let upload_dir = uploads.path().join("uploads");

        let mut config = AssistantConfig::default();
        config.storage.upload_dir = upload_dir.clone();

        let state = AppState::from_parts(
            config,
            Arc::new(llm),
            qa,
            Arc::new(InMemorySessionStore::new()),
        );

        TestApp {
            router: router(state),
            _uploads: uploads,
            upload_dir,
        }
    }

    fn multipart(text: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Body {
        let mut body = Vec::new();
        for (name, value) in text {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, content_type, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    fn multipart_request(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(quiet_llm(), None);
        let (status, body) = send(&app.router, get_request("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_validate_document_examples() {
        let app = app(quiet_llm(), None);

        let (status, body) = send(
            &app.router,
            json_request("/validate-document", json!({"document_type": "Visa", "content": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid document type.");

        let (status, body) = send(
            &app.router,
            json_request("/api/validate-document", json!({"document_type": "IEC", "content": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "The IEC is valid."}));
    }

    #[tokio::test]
    async fn test_generate_documents_samples_catalog() {
        let app = app(quiet_llm(), None);
        let known: HashSet<&str> = crate::compliance::DocumentType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect();

        for _ in 0..10 {
            let (status, body) = send(&app.router, get_request("/api/generate-documents")).await;
            assert_eq!(status, StatusCode::OK);

            let documents = body["compliance_documents"].as_array().unwrap();
            assert!((3..=5).contains(&documents.len()));

            let names: HashSet<&str> = documents
                .iter()
                .map(|d| d["document"].as_str().unwrap())
                .collect();
            assert_eq!(names.len(), documents.len());
            assert!(names.is_subset(&known));
        }
    }

    #[tokio::test]
    async fn test_synthetic_data_path_and_query() {
        let app = app(quiet_llm(), None);

        let (status, body) = send(
            &app.router,
            get_request("/generate-synthetic-data/Bill%20of%20Lading"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document_type"], "Bill of Lading");
        assert!(body["content"]["bl_number"].as_str().unwrap().starts_with("BL-"));

        let (status, body) = send(
            &app.router,
            get_request("/api/generate-synthetic-data?document_type=Visa"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"document_type": "Visa", "content": "unknown"}));
    }

    #[tokio::test]
    async fn test_validate_compliance() {
        let app = app(quiet_llm(), None);
        let content = json!({"IEC": "0512345678", "AD Code": "1"}).to_string();

        let (status, body) = send(
            &app.router,
            json_request("/api/validate-compliance", json!({ "content": content })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "fail", "missing_fields": ["Shipping Bill", "Commercial Invoice"]})
        );

        let (status, _) = send(
            &app.router,
            json_request("/validate-compliance", json!({"content": "not json"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_faq_lifecycle() {
        let mut llm = quiet_llm();
        llm.expect_generate()
            .times(1)
            .returning(|_| Ok("Orders ship within 5 days.".to_string()));
        let app = app(llm, None);

        let (status, body) = send(
            &app.router,
            form_request("/faq/start", "context=Orders+ship+in+5+days&session_id=s1"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session_id"], "s1");

        let (status, body) = send(
            &app.router,
            multipart_request(
                "/faq/ask",
                multipart(&[("question", "How fast is shipping?"), ("session_id", "s1")], None),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"answer": "Orders ship within 5 days.", "session_id": "s1"})
        );

        let (status, body) = send(&app.router, delete_request("/faq/end/s1")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("s1"));

        let (status, body) = send(
            &app.router,
            form_request("/faq/ask", "question=Still+there%3F&session_id=s1"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Session not found");

        let (status, _) = send(&app.router, delete_request("/faq/end/s1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_faq_rate_limit_maps_to_429() {
        let mut llm = quiet_llm();
        llm.expect_generate()
            .returning(|_| Err(crate::error::Error::llm("429 RESOURCE_EXHAUSTED")));
        let app = app(llm, None);

        send(&app.router, form_request("/faq/start", "context=c&session_id=s1")).await;
        let (status, body) = send(
            &app.router,
            form_request("/faq/ask", "question=q&session_id=s1"),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "rate_limited");
    }

    #[tokio::test]
    async fn test_faq_missing_field() {
        let app = app(quiet_llm(), None);
        let (status, body) = send(&app.router, form_request("/faq/start", "session_id=s1")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "Missing required field: context");
    }

    #[tokio::test]
    async fn test_ask_rejects_non_pdf() {
        let mut llm = quiet_llm();
        llm.expect_generate().never();
        let app = app(llm, None);

        let (status, body) = send(
            &app.router,
            multipart_request(
                "/ask",
                multipart(
                    &[("question", "What is the total?")],
                    Some(("notes.txt", "text/plain", b"hello")),
                ),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_content_type");
    }

    #[tokio::test]
    async fn test_ask_rejects_unreadable_pdf() {
        let mut llm = quiet_llm();
        llm.expect_generate().never();
        let app = app(llm, None);

        let (status, body) = send(
            &app.router,
            multipart_request(
                "/ask",
                multipart(
                    &[("question", "What is the total?")],
                    Some(("broken.pdf", "application/pdf", b"not a pdf at all")),
                ),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "parse_error");
        assert!(body["detail"].as_str().unwrap().contains("broken.pdf"));
    }

    #[tokio::test]
    async fn test_ask_rejects_pdf_with_unregistered_font() {
        let mut llm = quiet_llm();
        llm.expect_generate().never();
        let app = app(llm, None);

        let pdf = build_pdf(&["Orphan text"], "F9", courier());
        let (status, body) = send(
            &app.router,
            multipart_request(
                "/ask",
                multipart(
                    &[("question", "What does it say?")],
                    Some(("orphan.pdf", "application/pdf", &pdf[..])),
                ),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "parse_error");
    }

    #[tokio::test]
    async fn test_upload_overwrites_same_name() {
        let app = app(quiet_llm(), None);

        for data in [&b"first version"[..], &b"second version"[..]] {
            let (status, body) = send(
                &app.router,
                multipart_request(
                    "/api/upload-document",
                    multipart(&[], Some(("invoice.pdf", "application/pdf", data))),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["filename"], "invoice.pdf");
        }

        let stored = std::fs::read(app.upload_dir.join("invoice.pdf")).unwrap();
        assert_eq!(stored, b"second version");
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal() {
        let app = app(quiet_llm(), None);

        let (status, body) = send(
            &app.router,
            multipart_request(
                "/upload-document",
                multipart(&[], Some(("../escape.pdf", "application/pdf", b"x"))),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_filename");
    }

    #[tokio::test]
    async fn test_answer_without_model() {
        let app = app(quiet_llm(), None);

        let (status, body) = send(
            &app.router,
            json_request("/answer", json!({"context": "c", "question": "q"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "model_unavailable");
    }

    #[tokio::test]
    async fn test_answer_with_model() {
        let mut qa = MockQaPipeline::new();
        qa.expect_device().return_const("cpu".to_string());
        qa.expect_answer()
            .withf(|question, context| question.starts_with("Who issues") && context.contains("DGFT"))
            .times(1)
            .returning(|_, _| {
                Ok(QaAnswer {
                    answer: "DGFT".to_string(),
                    score: 0.5,
                    start: 16,
                    end: 20,
                })
            });
        let app = app(quiet_llm(), Some(Arc::new(qa)));

        let (status, body) = send(
            &app.router,
            json_request(
                "/answer",
                json!({"context": "IEC is issued by DGFT.", "question": "Who issues IEC?"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "DGFT", "score": 0.5}));
    }
}
