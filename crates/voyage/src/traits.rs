use async_trait::async_trait;

use crate::embed::{EmbedRequest, EmbedResponse};
use crate::error::VoyageError;
use crate::rerank::{RerankRequest, RerankResponse};

#[async_trait]
pub trait VoyageApi: Send + Sync {
    async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse, VoyageError>;

    async fn rerank(&self, request: RerankRequest) -> Result<RerankResponse, VoyageError>;
}
