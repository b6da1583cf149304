use axum::body::{to_bytes, Body};
use axum::extract::Path;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use paper_api::build_app_with;
use paper_client::ClientConfig;
use serde_json::json;
use tower::ServiceExt;

async fn stub_view(Path(data_id): Path<String>) -> axum::response::Response {
    match data_id.as_str() {
        "exam-1" => Json(json!({
            "structuredData": [
                { "unit": "U1", "questions": [
                    { "unit": "U1", "question": "Define ownership.", "bloomsLevel": "Remember", "answer": "Each value has one owner." },
                    { "unit": "U1", "question": "Explain borrowing.", "bloomsLevel": "Understand", "answer": "References without taking ownership." },
                    { "unit": "U1", "question": "Apply lifetimes.", "bloomsLevel": "Apply", "answer": "Annotate the shortest scope." }
                ]},
                { "unit": "U2", "questions": [
                    { "question": "Compare Box and Rc.", "bloomsLevel": "Analyze", "answer": "Single versus shared ownership." }
                ]},
                { "unit": "U3" }
            ]
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_backend() -> String {
    let app = Router::new().route("/view/:data_id", get(stub_view));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn app() -> Router {
    let config = ClientConfig::new(&spawn_backend().await).unwrap();
    build_app_with(config).expect("app should build")
}

async fn get_response(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn health_reports_backend() {
    let response = get_response(app().await, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let parsed: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(parsed["status"], "ok");
    assert!(parsed["backend_url"].as_str().unwrap().starts_with("http://127.0.0.1:"));
}

#[tokio::test]
async fn parts_follow_quota_rules() {
    let response = get_response(app().await, "/view/exam-1/parts").await;
    assert_eq!(response.status(), StatusCode::OK);

    let parsed: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let questions = |key: &str| {
        parsed[key]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["question"].as_str().unwrap().to_string())
            .collect::<Vec<_>>()
    };

    assert_eq!(
        questions("partA"),
        ["Define ownership.", "Explain borrowing.", "Compare Box and Rc."]
    );
    assert_eq!(
        questions("partB"),
        [
            "Define ownership.",
            "Explain borrowing.",
            "Apply lifetimes.",
            "Compare Box and Rc."
        ]
    );
}

#[tokio::test]
async fn view_page_lists_both_parts() {
    let response = get_response(app().await, "/view/exam-1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Extracted Data"));
    assert!(html.contains("Part A:"));
    assert!(html.contains("Part B:"));
    assert!(html.contains("Bloom's Level: Analyze"));
    assert!(html.contains("/view/exam-1/pdf"));
}

#[tokio::test]
async fn missing_data_shows_server_error_message() {
    let response = get_response(app().await, "/view/nope").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Data not found or server error"));
    assert!(!html.contains("Part A:"));
}

#[tokio::test]
async fn unreachable_backend_shows_fetch_error_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(&format!("http://{addr}")).unwrap();
    let app = build_app_with(config).unwrap();

    let response = get_response(app, "/view/exam-1/pdf").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let parsed: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(parsed["message"], "Error fetching data");
}

#[tokio::test]
async fn pdf_download_is_a_named_attachment() {
    let response = get_response(app().await, "/view/exam-1/pdf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Question_Paper.pdf\""
    );

    let bytes = body_bytes(response).await;
    let document = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(document.get_pages().len(), 1);
}
