//! Events sent from the backend worker to the UI thread.

use client_core::{Finished, GenerateStep, RequestToken};

use crate::media::PreviewImage;

pub enum UiEvent {
    Finished(Finished),
    GenerateProgress {
        token: RequestToken,
        step: GenerateStep,
    },
    ThumbnailLoaded {
        src: String,
        image: PreviewImage,
    },
    ThumbnailFailed {
        src: String,
        reason: String,
    },
    Error(String),
}
