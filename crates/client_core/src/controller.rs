//! Gallery UI state and the transitions driven by user actions and network outcomes.
//!
//! Front ends own a [`UiState`], call [`UiState::begin_search`] or
//! [`UiState::begin_generate`] when a button is pressed, run the returned
//! [`Command`] off the UI thread, and feed the result back through
//! [`UiState::complete`]. Only the most recently started action may change the
//! display; anything older is dropped as stale.

use shared::domain::ImageRecord;
use tracing::{debug, error, warn};

use crate::error::GalleryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Search,
    Generate,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Generate => "generate",
        }
    }
}

/// Network work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { token: RequestToken, input: String },
    Generate { token: RequestToken, input: String },
}

impl Command {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Search { token, .. } | Self::Generate { token, .. } => *token,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Search { .. } => ActionKind::Search,
            Self::Generate { .. } => ActionKind::Generate,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            Self::Search { input, .. } | Self::Generate { input, .. } => input,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFailure {
    pub action: ActionKind,
    pub error: GalleryError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    token: RequestToken,
    kind: ActionKind,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Current contents of the prompt field.
    pub input: String,
    gallery: Vec<ImageRecord>,
    in_flight: Option<InFlight>,
    last_issued: u64,
    last_failure: Option<ActionFailure>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    pub fn gallery(&self) -> &[ImageRecord] {
        &self.gallery
    }

    pub fn loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<(RequestToken, ActionKind)> {
        self.in_flight.map(|flight| (flight.token, flight.kind))
    }

    pub fn last_failure(&self) -> Option<&ActionFailure> {
        self.last_failure.as_ref()
    }

    pub fn begin_search(&mut self) -> Command {
        let token = self.begin(ActionKind::Search);
        Command::Search {
            token,
            input: self.input.clone(),
        }
    }

    pub fn begin_generate(&mut self) -> Command {
        let token = self.begin(ActionKind::Generate);
        Command::Generate {
            token,
            input: self.input.clone(),
        }
    }

    fn begin(&mut self, kind: ActionKind) -> RequestToken {
        self.last_issued += 1;
        let token = RequestToken(self.last_issued);
        if let Some(previous) = self.in_flight {
            debug!(
                previous = previous.token.0,
                action = previous.kind.label(),
                "superseding in-flight action"
            );
        }
        self.in_flight = Some(InFlight { token, kind });
        self.last_failure = None;
        token
    }

    /// Applies the result of the action identified by `token`.
    ///
    /// A successful generate also clears the prompt field. Failures leave the
    /// gallery and the prompt untouched.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<Vec<ImageRecord>, GalleryError>,
    ) -> Completion {
        let Some(flight) = self.in_flight.filter(|flight| flight.token == token) else {
            let current = self.in_flight.map(|flight| flight.token.0);
            match &result {
                Ok(records) => warn!(
                    token = token.0,
                    current,
                    count = records.len(),
                    "discarding stale gallery response"
                ),
                // Superseded, but still a real failure worth reporting.
                Err(err) => error!(token = token.0, current, stale = true, "Error: {err}"),
            }
            return Completion::Stale;
        };
        self.in_flight = None;

        match result {
            Ok(records) => {
                debug!(
                    token = token.0,
                    action = flight.kind.label(),
                    count = records.len(),
                    "replacing gallery"
                );
                if flight.kind == ActionKind::Generate {
                    self.input.clear();
                }
                self.gallery = records;
                Completion::Applied
            }
            Err(err) => {
                error!(token = token.0, action = flight.kind.label(), "Error: {err}");
                self.last_failure = Some(ActionFailure {
                    action: flight.kind,
                    error: err,
                });
                Completion::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
