use super::*;

#[test]
fn prompt_request_serializes_single_field() {
    let body = serde_json::to_value(PromptRequest { prompt: "boat adventure" }).unwrap();
    assert_eq!(body, serde_json::json!({ "prompt": "boat adventure" }));
}

#[test]
fn story_response_yields_panels_in_order() {
    let resp: StoryResponse = serde_json::from_str(
        r#"{"result":{"comics":[{"prompt":"a","caption":"A"},{"prompt":"b","caption":"B"}]}}"#,
    )
    .unwrap();
    let panels = resp.into_panels();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[0].prompt, "a");
    assert_eq!(panels[1].caption, "B");
}

#[test]
fn story_response_missing_caption_defaults_empty() {
    let resp: StoryResponse = serde_json::from_str(r#"{"result":{"comics":[{"prompt":"a"}]}}"#).unwrap();
    assert_eq!(resp.into_panels()[0].caption, "");
}

#[test]
fn story_response_without_comics_is_empty() {
    let resp: StoryResponse = serde_json::from_str(r#"{"result":{}}"#).unwrap();
    assert!(resp.into_panels().is_empty());
}

#[test]
fn story_error_body_is_empty() {
    let resp: StoryResponse = serde_json::from_str(r#"{"error":"Failed to generate story"}"#).unwrap();
    assert!(resp.into_panels().is_empty());
}

#[test]
fn image_response_reads_url() {
    let resp: ImageResponse = serde_json::from_str(r#"{"imageUrl":"https://img.test/0.webp"}"#).unwrap();
    assert_eq!(resp.into_url().as_deref(), Some("https://img.test/0.webp"));
}

#[test]
fn image_response_error_or_empty_has_no_url() {
    let resp: ImageResponse = serde_json::from_str(r#"{"error":"Failed to generate image"}"#).unwrap();
    assert_eq!(resp.error.as_deref(), Some("Failed to generate image"));
    assert!(resp.into_url().is_none());

    let resp: ImageResponse = serde_json::from_str(r#"{"imageUrl":""}"#).unwrap();
    assert!(resp.into_url().is_none());
}
