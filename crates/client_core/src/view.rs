//! Display projection of [`UiState`].

use std::fmt;

use crate::controller::UiState;

/// Presentational size class every tile carries; front ends map it to a
/// fixed square thumbnail.
pub const TILE_SIZE_CLASS: &str = "w-32 h-32";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryTile {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub size_class: &'static str,
}

impl fmt::Display for GalleryTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.title, self.src)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub input: String,
    pub loading_visible: bool,
    pub tiles: Vec<GalleryTile>,
    pub status: Option<String>,
}

impl GalleryView {
    /// Builds the complete display from scratch. Rendering the same state
    /// twice yields equal views.
    pub fn render(state: &UiState) -> Self {
        let tiles = state
            .gallery()
            .iter()
            .map(|record| GalleryTile {
                src: record.image_path.clone(),
                alt: record.user_input.clone(),
                title: record.user_input.clone(),
                size_class: TILE_SIZE_CLASS,
            })
            .collect();

        Self {
            input: state.input.clone(),
            loading_visible: state.loading(),
            tiles,
            status: state
                .last_failure()
                .map(|failure| format!("{} failed: {}", failure.action.label(), failure.error)),
        }
    }
}
