//! Client for the Voyage AI embedding (`/v1/embeddings`) and rerank
//! (`/v1/rerank`) endpoints.
//!
//! ```rust,no_run
//! use voyage::{EmbedRequest, EmbeddingModel, InputType, VoyageApi, VoyageClient};
//!
//! # async fn example() -> Result<(), voyage::VoyageError> {
//! let client = VoyageClient::from_env();
//! let request = EmbedRequest::new(["I like cats", "I also like dogs"], EmbeddingModel::Voyage3)
//!     .with_input_type(InputType::Document);
//! let vectors = client.embed(request).await?.into_vectors();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod embed;
mod encoding;
pub mod error;
pub mod models;
pub mod rerank;
pub mod traits;
pub mod types;

pub use client::VoyageClient;
pub use config::*;
pub use embed::*;
pub use error::{ValidationError, VoyageError};
pub use models::*;
pub use rerank::*;
pub use traits::*;
pub use types::*;
