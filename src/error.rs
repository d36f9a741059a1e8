use thiserror::Error;

use crate::model::GroupSummary;

#[derive(Debug, Error)]
pub enum ChatGraphError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("No group matches '{selector}' ({} groups known)", .candidates.len())]
    GroupNotFound {
        selector: String,
        candidates: Vec<GroupSummary>,
    },

    #[error("Contact not found: {id}")]
    ContactNotFound { id: String },

    #[error("No snapshot stored in the database")]
    SnapshotNotFound,

    #[error("Source not ready: {0}")]
    SourceNotReady(String),

    #[error("Bridge error: {0}")]
    Bridge(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type ChatGraphResult<T> = Result<T, ChatGraphError>;
