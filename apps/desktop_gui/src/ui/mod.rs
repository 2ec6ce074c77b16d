//! UI layer for the desktop gallery: prompt bar, gallery grid and status line.

pub mod app;

pub use app::GalleryApp;
