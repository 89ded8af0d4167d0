use crate::models::queue_types::QueuedFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Predicted genre label keyed by the uploaded file's original name.
pub type PredictionMap = HashMap<String, String>;

/// Success body returned by the classification endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct GenreResponse {
    pub genre: String,
}

/// The single error shown to the user.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ErrorState {
    /// Submit was attempted with nothing queued.
    Validation(String),
    /// Error body sent back by the endpoint, kept verbatim.
    Remote(serde_json::Value),
    /// Transport failure or unreadable response.
    Message(String),
}

impl ErrorState {
    /// The payload as it is echoed to the user.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            ErrorState::Validation(msg) | ErrorState::Message(msg) => {
                serde_json::Value::String(msg.clone())
            }
            ErrorState::Remote(body) => body.clone(),
        }
    }
}

/// Read-only projection of a demo session.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DemoSnapshot {
    pub files: Vec<QueuedFile>,
    pub predictions: PredictionMap,
    pub error: Option<ErrorState>,
    pub loading: bool,
}

/// What a single submit call did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every upload succeeded; holds the number of labelled files.
    Predicted(usize),
    /// At least one upload failed; the error is in the session state.
    Failed,
    /// Nothing was queued.
    NothingQueued,
    /// A dispatch is already in flight.
    Busy,
}
