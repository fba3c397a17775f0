use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use folio::gateway::{AiProvider, EnhanceRequest, EnhanceResponse, GatewayError, GENERIC_TAGS};
use folio::render_core::{ExportError, ExportRequest, PdfConverter};
use folio::resource::FileStorage;
use folio::traits::{InMemoryStorage, StorageBackend};
use folio_service::{build_router, config::Config, state::AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Upper-cases the prompt; prompts containing "fail" error out. Tag
/// prompts get a fixed JSON array back.
struct MockProvider;

#[async_trait]
impl AiProvider for MockProvider {
    async fn complete(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, GatewayError> {
        if request.user_prompt.contains("fail") {
            return Err(GatewayError::Provider {
                status: 500,
                message: "model overloaded".into(),
            });
        }
        if request.user_prompt == "Tag this photo." {
            if request.system_prompt.contains("\"Broken\"") {
                return Err(GatewayError::Timeout);
            }
            return Ok(EnhanceResponse {
                content: r#"["Roof", "slate"]"#.into(),
            });
        }
        Ok(EnhanceResponse {
            content: request.user_prompt.to_uppercase(),
        })
    }

    fn name(&self) -> &'static str {
        "MockProvider"
    }
}

/// Echoes a tiny PDF unless the HTML asks it to fail.
struct MockConverter;

#[async_trait]
impl PdfConverter for MockConverter {
    async fn convert(&self, request: &ExportRequest) -> Result<Vec<u8>, ExportError> {
        if request.html.contains("upstream-down") {
            return Err(ExportError::Upstream {
                status: 503,
                body: "busy".into(),
            });
        }
        Ok(b"%PDF-1.7 converted".to_vec())
    }

    fn name(&self) -> &'static str {
        "MockConverter"
    }
}

fn test_config() -> Config {
    serde_json::from_value(json!({
        "server": { "host": "127.0.0.1", "port": 0, "max_request_size_mb": 5 },
        "storage": { "path": "unused", "max_blob_bytes": 1048576 }
    }))
    .unwrap()
}

fn app_with_storage(storage: impl StorageBackend + 'static) -> Router {
    let state = AppState::new(
        Arc::new(MockProvider),
        Arc::new(MockConverter),
        Arc::new(storage),
        test_config(),
    );
    build_router(state)
}

fn app() -> Router {
    app_with_storage(InMemoryStorage::new())
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "folio-test-boundary";

fn multipart_request(uri: &str, fields: &[(&str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "MockProvider");
}

#[tokio::test]
async fn test_enhance() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/enhance",
            json!({ "systemPrompt": "Be terse.", "userPrompt": "roof is ok" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "content": "ROOF IS OK" }));
}

#[tokio::test]
async fn test_enhance_rejects_missing_prompt() {
    let response = app()
        .oneshot(json_request("POST", "/api/enhance", json!({ "systemPrompt": "x" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "InvalidRequest");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_enhance_provider_failure_is_bad_gateway() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/enhance",
            json!({ "userPrompt": "please fail" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_enhance_batch_keeps_order_and_failures() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/enhance-batch",
            json!([
                { "userPrompt": "one" },
                { "userPrompt": "fail two" },
                { "userPrompt": "three" }
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0], json!({ "content": "ONE" }));
    assert!(body[1]["error"].is_string());
    assert_eq!(body[2], json!({ "content": "THREE" }));
}

#[tokio::test]
async fn test_tag_image() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/tag-image",
            json!({ "imageData": "https://img.example/roof.jpg", "headingContext": "Roof" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "tags": ["roof", "slate"] }));
}

#[tokio::test]
async fn test_tag_image_falls_back_to_generic_tags() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/tag-image",
            json!({ "imageData": "https://img.example/x.jpg", "headingContext": "Broken" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["tags"], json!(GENERIC_TAGS));
}

#[tokio::test]
async fn test_tag_image_requires_image() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/tag-image",
            json!({ "headingContext": "Roof" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_pdf() {
    let response = app()
        .oneshot(multipart_request(
            "/api/generate-pdf",
            &[
                ("html", b"<section class=\"report-page\">Hi</section>"),
                ("filename", b"Roof Survey"),
                ("isMultiPage", b"false"),
            ],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"roof-survey.pdf\""
    );
    assert_eq!(response.headers()["x-folio-degraded"], "false");
    assert_eq!(body_bytes(response).await, b"%PDF-1.7 converted");
}

#[tokio::test]
async fn test_generate_pdf_falls_back_on_upstream_failure() {
    let response = app()
        .oneshot(multipart_request(
            "/api/generate-pdf",
            &[("html", b"<p>upstream-down</p>"), ("filename", b"report.pdf")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-folio-degraded"], "true");
    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_generate_pdf_requires_html() {
    let response = app()
        .oneshot(multipart_request(
            "/api/generate-pdf",
            &[("filename", b"report.pdf")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "MissingHtml");
}

#[tokio::test]
async fn test_assemble_pdf() {
    // SOI, SOF0 (816x1056), EOI
    let jpeg: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x04, 0x20, 0x03, 0x30, 0x03, 0xFF, 0xD9,
    ];
    let response = app()
        .oneshot(multipart_request(
            "/api/assemble-pdf",
            &[("page", jpeg), ("page", jpeg), ("filename", b"Site Photos")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"site-photos.pdf\""
    );
    assert!(body_bytes(response).await.starts_with(b"%PDF-"));

    let response = app()
        .oneshot(multipart_request("/api/assemble-pdf", &[("page", b"not a jpeg")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photos_seed_then_round_trip() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::get("/api/photos/site-a").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 6);

    let photos = json!([
        { "id": "p1", "imageRef": "https://img.example/1.jpg", "displayName": "Porch", "tags": ["entrance"] }
    ]);
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/photos/site-a", photos.clone()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "saved": true }));

    let response = app
        .oneshot(Request::get("/api/photos/site-a").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await, photos);
}

#[tokio::test]
async fn test_photos_quota_reports_not_saved() {
    let app = app_with_storage(InMemoryStorage::with_quota(32));
    let photos = json!([
        { "id": "p1", "imageRef": format!("data:image/png;base64,{}", "A".repeat(200)), "displayName": "Big" }
    ]);
    let response = app
        .oneshot(json_request("PUT", "/api/photos/site-a", photos))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "saved": false }));
}

#[tokio::test]
async fn test_photos_rejects_unsafe_workspace() {
    let response = app()
        .oneshot(Request::get("/api/photos/..%2Fetc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photos_persist_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let photos = json!([
        { "id": "p9", "imageRef": "https://img.example/9.jpg", "displayName": "Loft hatch", "tags": ["loft"] }
    ]);

    let response = app_with_storage(FileStorage::new(dir.path()).unwrap())
        .oneshot(json_request("PUT", "/api/photos/site-b", photos.clone()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "saved": true }));
    assert!(dir.path().join("site-b.photos.json").exists());

    // A fresh router over the same directory sees the saved library
    let response = app_with_storage(FileStorage::new(dir.path()).unwrap())
        .oneshot(Request::get("/api/photos/site-b").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await, photos);
}
