//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{execute, ClientSettings, Finished, HttpGalleryClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::media::decode_thumbnail;

pub fn spawn_backend_thread(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let client = Arc::new(HttpGalleryClient::from_settings(&settings));
        let refresh_query: Arc<str> = Arc::from(settings.refresh_query.as_str());
        tracing::info!(server_url = client.server_url(), "backend worker started");

        // Each command runs as its own task so a slow generate never blocks a search.
        while let Ok(cmd) = cmd_rx.recv() {
            let client = client.clone();
            let ui_tx = ui_tx.clone();
            match cmd {
                BackendCommand::Run(command) => {
                    let refresh_query = refresh_query.clone();
                    runtime.spawn(async move {
                        let token = command.token();
                        let progress_tx = ui_tx.clone();
                        let finished = execute(client.as_ref(), command, &refresh_query, move |step| {
                            let _ = progress_tx.try_send(UiEvent::GenerateProgress { token, step });
                        })
                        .await;
                        deliver_finished(ui_tx, finished).await;
                    });
                }
                BackendCommand::FetchThumbnail { src } => {
                    let max_px = settings.thumbnail_px;
                    runtime.spawn(async move {
                        let decoded = match client.fetch_image_bytes(&src).await {
                            Ok(bytes) => decode_thumbnail(&bytes, max_px),
                            Err(err) => Err(err.to_string()),
                        };
                        let event = match decoded {
                            Ok(image) => UiEvent::ThumbnailLoaded { src, image },
                            Err(reason) => {
                                tracing::warn!(%src, "thumbnail unavailable: {reason}");
                                UiEvent::ThumbnailFailed { src, reason }
                            }
                        };
                        let _ = ui_tx.try_send(event);
                    });
                }
            }
        }

        tracing::info!("ui command queue closed; backend worker stopping");
    });
}

/// Hands an action result to the UI thread, waiting for queue space if needed.
///
/// Progress and thumbnail events may be dropped under load, but the UI only
/// clears its loading state when `Finished` arrives.
async fn deliver_finished(ui_tx: Sender<UiEvent>, finished: Finished) {
    let token = finished.token;
    let sent =
        tokio::task::spawn_blocking(move || ui_tx.send(UiEvent::Finished(finished))).await;
    match sent {
        Ok(Ok(())) => {}
        Ok(Err(_)) => {
            tracing::error!(token = token.0, "dropped action result; ui event queue disconnected")
        }
        Err(err) => tracing::error!(token = token.0, "failed to deliver action result: {err}"),
    }
}
