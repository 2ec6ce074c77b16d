//! Bridge between the UI thread and the tokio worker that performs network calls.

pub mod commands;
pub mod runtime;
