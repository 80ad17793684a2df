use super::*;
use super::test_helpers::{MockImageModel, MockLlm, test_app_state};

#[test]
fn app_state_without_llm() {
    let state = test_app_state(None, Arc::new(MockImageModel::succeeding()));
    assert!(state.llm.is_none());
    assert_eq!(state.story, StorySettings::default());
}

#[tokio::test]
async fn app_state_clones_share_image_model() {
    let images = Arc::new(MockImageModel::succeeding());
    let state = test_app_state(Some(Arc::new(MockLlm::replying("{}"))), images.clone());
    let copy = state.clone();

    state.images.generate("a").await.unwrap();
    copy.images.generate("b").await.unwrap();

    assert_eq!(images.calls(), 2);
    assert!(copy.llm.is_some());
}

#[tokio::test]
async fn mock_image_model_numbers_urls_by_call() {
    let images = MockImageModel::succeeding();
    assert_eq!(images.generate("a").await.unwrap(), "https://img.test/0.webp");
    assert_eq!(images.generate("b").await.unwrap(), "https://img.test/1.webp");
    assert_eq!(images.prompts(), vec!["a".to_string(), "b".to_string()]);
}
