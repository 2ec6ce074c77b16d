use super::*;
use crate::controller::{Completion, UiState};
use async_trait::async_trait;
use serde_json::json;
use shared::protocol::GenerateResponse;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Search(String),
    Generate(String),
}

struct FakeGalleryApi {
    calls: Mutex<Vec<Call>>,
    generate_response: Result<GenerateResponse, GalleryError>,
    search_response: Result<Vec<ImageRecord>, GalleryError>,
}

impl FakeGalleryApi {
    fn new(
        generate_response: Result<GenerateResponse, GalleryError>,
        search_response: Result<Vec<ImageRecord>, GalleryError>,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            generate_response,
            search_response,
        }
    }

    fn accepting(records: Vec<ImageRecord>) -> Self {
        Self::new(
            Ok(GenerateResponse {
                image_url: Some(json!("/static/static/storage/a cat.png")),
                error: None,
            }),
            Ok(records),
        )
    }

    async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl GalleryApi for FakeGalleryApi {
    async fn search_images(&self, input: &str) -> Result<Vec<ImageRecord>, GalleryError> {
        self.calls.lock().await.push(Call::Search(input.to_string()));
        self.search_response.clone()
    }

    async fn generate(&self, input: &str) -> Result<GenerateResponse, GalleryError> {
        self.calls.lock().await.push(Call::Generate(input.to_string()));
        self.generate_response.clone()
    }
}

fn cat_records() -> Vec<ImageRecord> {
    vec![ImageRecord::new("static/storage/a cat.png", "a cat")]
}

#[tokio::test]
async fn generate_then_refreshes_with_sentinel_query() {
    let api = FakeGalleryApi::accepting(cat_records());
    let mut steps = Vec::new();

    let records = generate_and_refresh(&api, "a cat", "any", |step| steps.push(step))
        .await
        .expect("generate");

    assert_eq!(records, cat_records());
    assert_eq!(
        api.calls().await,
        vec![
            Call::Generate("a cat".to_string()),
            Call::Search("any".to_string())
        ]
    );
    assert_eq!(
        steps,
        vec![
            GenerateStep::Submitting,
            GenerateStep::AwaitingConfirmation,
            GenerateStep::Refreshing,
            GenerateStep::Done,
        ]
    );
}

#[tokio::test]
async fn application_error_short_circuits_before_refresh() {
    let api = FakeGalleryApi::new(
        Ok(GenerateResponse {
            image_url: None,
            error: Some(json!("quota exceeded")),
        }),
        Ok(cat_records()),
    );
    let mut steps = Vec::new();

    let err = generate_and_refresh(&api, "a cat", "any", |step| steps.push(step))
        .await
        .expect_err("must fail");

    assert_eq!(err.to_string(), "server reported an error: quota exceeded");
    assert_eq!(api.calls().await, vec![Call::Generate("a cat".to_string())]);
    assert_eq!(
        steps,
        vec![
            GenerateStep::Submitting,
            GenerateStep::AwaitingConfirmation,
            GenerateStep::Failed,
        ]
    );
}

#[tokio::test]
async fn transport_failure_on_submit_reports_failed_step() {
    let api = FakeGalleryApi::new(
        Err(GalleryError::transport("/api/generate", "connection reset")),
        Ok(cat_records()),
    );
    let mut steps = Vec::new();

    let err = generate_and_refresh(&api, "a cat", "any", |step| steps.push(step))
        .await
        .expect_err("must fail");

    assert!(matches!(err, GalleryError::Transport { .. }));
    assert_eq!(steps, vec![GenerateStep::Submitting, GenerateStep::Failed]);
    assert!(steps.last().expect("step").is_terminal());
}

#[tokio::test]
async fn refresh_failure_surfaces_search_error() {
    let api = FakeGalleryApi::new(
        Ok(GenerateResponse::default()),
        Err(GalleryError::decode("/api/search_images", 500, "expected value")),
    );

    let err = generate_and_refresh(&api, "a cat", "any", |_| {})
        .await
        .expect_err("must fail");

    assert!(matches!(err, GalleryError::Decode { status: 500, .. }));
    assert_eq!(api.calls().await.len(), 2);
}

#[tokio::test]
async fn execute_search_issues_one_request_with_input() {
    let api = FakeGalleryApi::accepting(cat_records());
    let mut state = UiState::with_input("a cat");
    let command = state.begin_search();
    let token = command.token();

    let finished = execute(&api, command, "any", |_| panic!("search has no steps")).await;

    assert_eq!(finished.token, token);
    assert_eq!(api.calls().await, vec![Call::Search("a cat".to_string())]);
    assert_eq!(state.complete(finished.token, finished.result), Completion::Applied);
    assert_eq!(state.gallery(), cat_records().as_slice());
    assert_eq!(state.input, "a cat");
}

#[tokio::test]
async fn execute_generate_end_to_end_clears_input() {
    let api = FakeGalleryApi::accepting(cat_records());
    let mut state = UiState::with_input("a cat");
    let command = state.begin_generate();

    let finished = execute(&api, command, "any", |_| {}).await;
    state.complete(finished.token, finished.result);

    assert_eq!(state.input, "");
    assert_eq!(state.gallery(), cat_records().as_slice());
    assert!(!state.loading());
}

#[tokio::test]
async fn execute_rejected_generate_leaves_state_untouched() {
    let api = FakeGalleryApi::new(
        Ok(GenerateResponse {
            image_url: None,
            error: Some(json!("quota exceeded")),
        }),
        Ok(cat_records()),
    );
    let mut state = UiState::with_input("a cat");
    let command = state.begin_generate();

    let finished = execute(&api, command, "any", |_| {}).await;
    assert_eq!(state.complete(finished.token, finished.result), Completion::Failed);

    assert_eq!(state.input, "a cat");
    assert!(state.gallery().is_empty());
    assert!(!state.loading());
    assert_eq!(api.calls().await, vec![Call::Generate("a cat".to_string())]);
}
