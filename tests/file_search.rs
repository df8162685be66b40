mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use riskscope_core::agent::TransportError;
use riskscope_core::file_search::{FileSearchClient, FileSearchError};
use serde_json::{Value, json};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct StoreState {
    requests: Arc<Mutex<Vec<Value>>>,
}

async fn handle(State(state): State<StoreState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.requests.lock().await.push(body.clone());

    match body["operation"].as_str().unwrap_or("") {
        "upload" => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Successfully uploaded policy.md to File Search store",
                "filename": body["filename"],
                "display_name": body["display_name"],
                "store_name": "fileSearchStores/risk",
                "operation_name": "operations/123",
                "size_bytes": 5
            })),
        ),
        "search" if body["query"] == "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "error": "Search failed: quota exceeded"})),
        ),
        "search" => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "query": body["query"],
                "answer": "Access is reviewed quarterly.",
                "citations": [{"source": "access.pdf", "content": "Reviews happen every quarter."}],
                "store_name": "fileSearchStores/risk"
            })),
        ),
        "list" => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "store_name": "fileSearchStores/risk",
                "documents": [
                    {"name": "fileSearchStores/risk/documents/a", "display_name": "policy.md",
                     "create_time": "2025-01-01T00:00:00Z", "update_time": "2025-01-01T00:00:00Z",
                     "state": "STATE_ACTIVE", "size_bytes": 5, "mime_type": "text/plain"}
                ],
                "count": 1,
                "pages_fetched": 1
            })),
        ),
        "delete" if body.get("document_name").is_none() => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Missing required parameter: document_name"})),
        ),
        "delete" => (
            StatusCode::OK,
            Json(json!({"success": false, "error": "Delete failed: not found"})),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "error": "Unknown operation"})),
        ),
    }
}

async fn start() -> (FileSearchClient, StoreState) {
    let state = StoreState::default();
    let app = Router::new().route("/", post(handle)).with_state(state.clone());
    let base_url = common::spawn_server(app).await;
    let client = FileSearchClient::new(format!("{base_url}/"), Duration::from_secs(5)).unwrap();
    (client, state)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_sends_base64_and_derived_mime_type() {
    let (client, state) = start().await;

    let receipt = client.upload_file("policy.md", b"hello", None).await.unwrap();
    assert_eq!(receipt.filename, "policy.md");
    assert_eq!(receipt.size_bytes, 5);

    let requests = state.requests.lock().await.clone();
    assert_eq!(
        requests[0],
        json!({
            "operation": "upload",
            "file_data": "aGVsbG8=",
            "filename": "policy.md",
            "mime_type": "text/plain",
            "display_name": "policy.md"
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upload_keeps_explicit_mime_type() {
    let (client, state) = start().await;

    client
        .upload_file("report.bin", b"%PDF", Some("application/pdf"))
        .await
        .unwrap();
    client
        .upload_file("scan.pdf", b"%PDF", Some("application/octet-stream"))
        .await
        .unwrap();

    let requests = state.requests.lock().await.clone();
    assert_eq!(requests[0]["mime_type"], "application/pdf");
    assert_eq!(requests[1]["mime_type"], "application/pdf");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn search_returns_answer_and_citations() {
    let (client, state) = start().await;

    let result = client.search("access reviews").await.unwrap();
    assert_eq!(result.answer, "Access is reviewed quarterly.");
    assert_eq!(result.citations.len(), 1);
    assert_eq!(result.citations[0].source, "access.pdf");
    assert_eq!(
        state.requests.lock().await[0],
        json!({"operation": "search", "query": "access reviews"})
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_failure_prefers_service_error_text() {
    let (client, _state) = start().await;

    let error = client.search("boom").await.unwrap_err();
    assert_eq!(
        error,
        FileSearchError::Transport(TransportError::Status {
            status: 500,
            message: "Search failed: quota exceeded".into(),
        })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn success_false_is_api_error() {
    let (client, _state) = start().await;

    let error = client.delete_document("fileSearchStores/risk/documents/x").await.unwrap_err();
    assert_eq!(error, FileSearchError::Api("Delete failed: not found".into()));
    assert_eq!(error.to_string(), "File Search error: Delete failed: not found");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_documents_decodes_store_listing() {
    let (client, _state) = start().await;

    let list = client.list_documents().await.unwrap();
    assert_eq!(list.count, 1);
    assert_eq!(list.pages_fetched, 1);
    assert_eq!(list.documents[0].label(), "policy.md");
    assert_eq!(list.documents[0].mime_type, "text/plain");
}
