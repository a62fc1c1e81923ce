use thiserror::Error;

use crate::embed::MAX_EMBED_INPUTS;
use crate::rerank::MAX_RERANK_DOCUMENTS;

/// Request rejected before anything was sent over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("input is required")]
    InputRequired,

    #[error("input length must be less than or equal to {max}", max = MAX_EMBED_INPUTS)]
    InputTooLarge,

    #[error("documents are required")]
    DocumentsRequired,

    #[error(
        "documents length must be less than or equal to {max}",
        max = MAX_RERANK_DOCUMENTS
    )]
    DocumentsTooLarge,

    #[error("query is required")]
    QueryRequired,

    #[error("model is required")]
    ModelRequired,
}

#[derive(Debug, Error)]
pub enum VoyageError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("voyage returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("voyage API error: status={status}, detail={detail}")]
    Api { status: u16, detail: String },
}

impl VoyageError {
    pub const fn validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(kind) => Some(*kind),
            _ => None,
        }
    }

    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
