//! Async execution of controller commands against a [`GalleryApi`].

use shared::domain::ImageRecord;
use tracing::info;

use crate::{
    controller::{Command, RequestToken},
    error::GalleryError,
    GalleryApi,
};

/// Progress of the generate-then-refresh sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateStep {
    Submitting,
    AwaitingConfirmation,
    Refreshing,
    Done,
    Failed,
}

impl GenerateStep {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub token: RequestToken,
    pub result: Result<Vec<ImageRecord>, GalleryError>,
}

/// Runs the network work behind `command`. `observe` sees every generate step;
/// searches report nothing.
pub async fn execute<A, F>(api: &A, command: Command, refresh_query: &str, observe: F) -> Finished
where
    A: GalleryApi + ?Sized,
    F: FnMut(GenerateStep) + Send,
{
    let token = command.token();
    let result = match command {
        Command::Search { input, .. } => api.search_images(&input).await,
        Command::Generate { input, .. } => {
            generate_and_refresh(api, &input, refresh_query, observe).await
        }
    };
    Finished { token, result }
}

/// Submits `input` for generation and, once the server accepts it, fetches
/// the gallery again with `refresh_query`.
pub async fn generate_and_refresh<A, F>(
    api: &A,
    input: &str,
    refresh_query: &str,
    mut observe: F,
) -> Result<Vec<ImageRecord>, GalleryError>
where
    A: GalleryApi + ?Sized,
    F: FnMut(GenerateStep) + Send,
{
    let result = run_steps(api, input, refresh_query, &mut observe).await;
    observe(if result.is_ok() {
        GenerateStep::Done
    } else {
        GenerateStep::Failed
    });
    result
}

async fn run_steps<A, F>(
    api: &A,
    input: &str,
    refresh_query: &str,
    observe: &mut F,
) -> Result<Vec<ImageRecord>, GalleryError>
where
    A: GalleryApi + ?Sized,
    F: FnMut(GenerateStep) + Send,
{
    observe(GenerateStep::Submitting);
    let response = api.generate(input).await?;

    observe(GenerateStep::AwaitingConfirmation);
    let accepted = response.into_result()?;
    info!(
        input,
        image_url = accepted.image_url.as_deref().unwrap_or("<none>"),
        "image generated"
    );

    observe(GenerateStep::Refreshing);
    api.search_images(refresh_query).await
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
