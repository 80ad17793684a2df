use super::*;
use std::sync::Arc;

use serde_json::{Value, json};

use crate::state::test_helpers::{MockImageModel, MockLlm, test_app_state};

const THREE_PANELS: &str = r#"{"comics":[
    {"prompt":"Lily boards a sailboat","caption":"All aboard!"},
    {"prompt":"Lily steers through waves","caption":"Steady, Captain."},
    {"prompt":"Lily naps at sunset","caption":"Sweet dreams."}
]}"#;

async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn prompt(text: Option<&str>) -> Bytes {
    let body = match text {
        Some(text) => json!({ "prompt": text }),
        None => json!({}),
    };
    Bytes::from(serde_json::to_vec(&body).unwrap())
}

// =============================================================================
// POST /api/generate_imgs
// =============================================================================

#[tokio::test]
async fn imgs_success_returns_image_url() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), prompt(Some("Lily on a boat"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "imageUrl": "https://img.test/0.webp" }));
    assert_eq!(images.prompts(), vec!["Lily on a boat".to_string()]);
}

#[tokio::test]
async fn imgs_missing_prompt_is_400_without_model_call() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), prompt(None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({ "error": "Prompt is required" }));
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn imgs_empty_prompt_is_400_without_model_call() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), prompt(Some(""))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({ "error": "Prompt is required" }));
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn imgs_upstream_failure_is_500_generic() {
    let images = Arc::new(MockImageModel::failing());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), prompt(Some("Lily on a boat"))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to generate image" }));
    assert!(!body.to_string().contains("CUDA"));
    assert_eq!(images.calls(), 1);
}

#[tokio::test]
async fn imgs_whitespace_prompt_reaches_model() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), prompt(Some("   "))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(images.prompts(), vec!["   ".to_string()]);
}

#[tokio::test]
async fn imgs_non_json_body_is_400_without_model_call() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(None, images.clone());

    let resp = generate_imgs(State(state), Bytes::from_static(b"prompt=Lily")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(images.calls(), 0);
}

// =============================================================================
// Body parsing
// =============================================================================

#[test]
fn prompt_from_reads_string_prompt() {
    assert_eq!(prompt_from(br#"{"prompt":"Lily on a boat"}"#).as_deref(), Some("Lily on a boat"));
}

#[test]
fn prompt_from_treats_unreadable_bodies_as_missing() {
    assert_eq!(prompt_from(b""), None);
    assert_eq!(prompt_from(b"{not json"), None);
    assert_eq!(prompt_from(br#"{"prompt":42}"#), None);
    assert_eq!(prompt_from(br#"{"other":"x"}"#), None);
}

// =============================================================================
// POST /api/generate_plot
// =============================================================================

#[tokio::test]
async fn plot_success_wraps_comics_in_result() {
    let llm = Arc::new(MockLlm::replying(THREE_PANELS));
    let state = test_app_state(Some(llm.clone()), Arc::new(MockImageModel::succeeding()));

    let resp = generate_plot(State(state), prompt(Some("boat adventure"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let comics = body["result"]["comics"].as_array().unwrap();
    assert_eq!(comics.len(), 3);
    assert_eq!(comics[0], json!({ "prompt": "Lily boards a sailboat", "caption": "All aboard!" }));
    assert_eq!(llm.last_prompt().as_deref(), Some("boat adventure"));
}

#[tokio::test]
async fn plot_refusal_is_200_with_empty_comics() {
    let llm = Arc::new(MockLlm::replying("Sorry, I can't write that."));
    let state = test_app_state(Some(llm), Arc::new(MockImageModel::succeeding()));

    let resp = generate_plot(State(state), prompt(Some("something scary"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "result": { "comics": [] } }));
}

#[tokio::test]
async fn plot_missing_prompt_is_400() {
    let llm = Arc::new(MockLlm::replying(THREE_PANELS));
    let state = test_app_state(Some(llm.clone()), Arc::new(MockImageModel::succeeding()));

    let resp = generate_plot(State(state), prompt(None)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({ "error": "Prompt is required" }));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn plot_without_llm_is_503() {
    let state = test_app_state(None, Arc::new(MockImageModel::succeeding()));

    let resp = generate_plot(State(state), prompt(Some("boat adventure"))).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await, json!({ "error": "Story generation not configured" }));
}

#[tokio::test]
async fn plot_llm_failure_is_500_generic() {
    let state = test_app_state(Some(Arc::new(MockLlm::failing())), Arc::new(MockImageModel::succeeding()));

    let resp = generate_plot(State(state), prompt(Some("boat adventure"))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert_eq!(body, json!({ "error": "Failed to generate story" }));
    assert!(!body.to_string().contains("overloaded"));
}

// =============================================================================
// Router over TCP: body parsing edge cases
// =============================================================================

async fn spawn_api(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = crate::routes::api_routes(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

#[tokio::test]
async fn router_malformed_body_is_prompt_required() {
    let images = Arc::new(MockImageModel::succeeding());
    let base = spawn_api(test_app_state(None, images.clone())).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate_imgs"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Prompt is required" }));
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn router_non_string_prompt_is_prompt_required() {
    let images = Arc::new(MockImageModel::succeeding());
    let base = spawn_api(test_app_state(None, images.clone())).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate_imgs"))
        .json(&json!({ "prompt": 42 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn router_accepts_json_without_content_type() {
    let images = Arc::new(MockImageModel::succeeding());
    let base = spawn_api(test_app_state(None, images.clone())).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate_imgs"))
        .body(r#"{"prompt":"Lily on a boat"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: ImageResponse = resp.json().await.unwrap();
    assert_eq!(body.image_url, "https://img.test/0.webp");
    assert_eq!(images.prompts(), vec!["Lily on a boat".to_string()]);
}

#[tokio::test]
async fn router_plot_accepts_text_plain_body() {
    let llm = Arc::new(MockLlm::replying(THREE_PANELS));
    let base = spawn_api(test_app_state(Some(llm.clone()), Arc::new(MockImageModel::succeeding()))).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate_plot"))
        .header("content-type", "text/plain;charset=UTF-8")
        .body(r#"{"prompt":"boat adventure"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: StoryResponse = resp.json().await.unwrap();
    assert_eq!(body.result.comics.len(), 3);
    assert_eq!(llm.last_prompt().as_deref(), Some("boat adventure"));
}

#[tokio::test]
async fn router_round_trip_image_request() {
    let base = spawn_api(test_app_state(None, Arc::new(MockImageModel::succeeding()))).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/api/generate_imgs"))
        .json(&json!({ "prompt": "Lily on a boat" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: ImageResponse = resp.json().await.unwrap();
    assert_eq!(body.image_url, "https://img.test/0.webp");
}

#[tokio::test]
async fn router_healthz_ok() {
    let base = spawn_api(test_app_state(None, Arc::new(MockImageModel::succeeding()))).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}
