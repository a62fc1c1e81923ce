use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::RerankModel;
use crate::types::Usage;

pub const MAX_RERANK_DOCUMENTS: usize = 1000;

/// Body of `POST /v1/rerank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerankRequest {
    pub query: String,
    /// Candidates to score, at most [`MAX_RERANK_DOCUMENTS`] per call.
    pub documents: Vec<String>,
    pub model: RerankModel,
    /// Only the `top_k` most relevant documents are returned; all of them when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<NonZeroU32>,
    pub return_documents: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<bool>,
}

impl RerankRequest {
    pub fn new<I, S>(query: impl Into<String>, documents: I, model: impl Into<RerankModel>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query: query.into(),
            documents: documents.into_iter().map(Into::into).collect(),
            model: model.into(),
            top_k: None,
            return_documents: false,
            truncate: None,
        }
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: NonZeroU32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    #[must_use]
    pub fn with_return_documents(mut self, return_documents: bool) -> Self {
        self.return_documents = return_documents;
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.documents.is_empty() {
            return Err(ValidationError::DocumentsRequired);
        }
        if self.documents.len() > MAX_RERANK_DOCUMENTS {
            return Err(ValidationError::DocumentsTooLarge);
        }
        if self.query.is_empty() {
            return Err(ValidationError::QueryRequired);
        }
        if self.model.is_empty() {
            return Err(ValidationError::ModelRequired);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    pub object: String,
    pub data: Vec<RerankResponseData>,
    pub model: RerankModel,
    pub usage: Usage,
}

impl RerankResponse {
    /// Entries from most to least relevant.
    pub fn ranked(&self) -> Vec<&RerankResponseData> {
        let mut items: Vec<&RerankResponseData> = self.data.iter().collect();
        items.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        items
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponseData {
    /// Only present when the request set `return_documents`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub relevance_score: f64,
    /// Position of the document in [`RerankRequest::documents`].
    pub index: usize,
}
