//! Backend commands queued from UI to backend worker.

use client_core::Command;

pub enum BackendCommand {
    /// Network work for a search or generate action.
    Run(Command),
    FetchThumbnail {
        src: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Run(Command::Search { .. }) => "search",
            BackendCommand::Run(Command::Generate { .. }) => "generate",
            BackendCommand::FetchThumbnail { .. } => "fetch_thumbnail",
        }
    }
}
