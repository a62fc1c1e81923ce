use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{API_KEY_ENV, ClientConfig, DEFAULT_BASE_URL, redact};
use crate::embed::{EmbedRequest, EmbedResponse, WireEmbedResponse};
use crate::error::VoyageError;
use crate::rerank::{RerankRequest, RerankResponse};
use crate::traits::VoyageApi;

const EMBEDDINGS_PATH: &str = "/v1/embeddings";
const RERANK_PATH: &str = "/v1/rerank";

#[derive(Clone)]
pub struct VoyageClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl VoyageClient {
    /// Builds a client, reading `VOYAGE_API_KEY` if the config has no key.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_env(config, |name| std::env::var(name).ok())
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::default())
    }

    /// Like [`VoyageClient::new`] but resolves environment variables through
    /// `lookup`. This is the only place configuration touches the
    /// environment.
    pub fn with_env<F>(config: ClientConfig, lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = if config.api_key.is_empty() {
            lookup(API_KEY_ENV).unwrap_or_default()
        } else {
            config.api_key
        };

        let base_url = if config.base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.base_url.trim().trim_end_matches('/').to_string()
        };

        Self {
            api_key,
            base_url,
            client: config.http_client.unwrap_or_default(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_json<Req, Res>(&self, path: &str, payload: &Req) -> Result<Res, VoyageError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let body = serde_json::to_vec(payload)?;

        let res = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .body(body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = read_error_detail(res.text().await);
            warn!(%url, status = status.as_u16(), %detail, "voyage request failed");
            return Err(VoyageError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = res.bytes().await?;
        debug!(%url, status = status.as_u16(), bytes = bytes.len(), "voyage response received");
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl VoyageApi for VoyageClient {
    async fn embed(&self, request: EmbedRequest) -> Result<EmbedResponse, VoyageError> {
        request.validate()?;
        debug!(
            inputs = request.input.len(),
            model = %request.model,
            "sending embed request"
        );

        let wire: WireEmbedResponse = self.post_json(EMBEDDINGS_PATH, &request).await?;
        let response = wire.into_response(request.output_dtype)?;
        debug!(
            embeddings = response.data.len(),
            total_tokens = response.usage.total_tokens,
            "embed request completed"
        );
        Ok(response)
    }

    async fn rerank(&self, request: RerankRequest) -> Result<RerankResponse, VoyageError> {
        request.validate()?;
        debug!(
            documents = request.documents.len(),
            model = %request.model,
            top_k = request.top_k.map(|k| k.get()),
            "sending rerank request"
        );

        let response: RerankResponse = self.post_json(RERANK_PATH, &request).await?;
        debug!(
            results = response.data.len(),
            total_tokens = response.usage.total_tokens,
            "rerank request completed"
        );
        Ok(response)
    }
}

impl fmt::Debug for VoyageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoyageClient")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

fn read_error_detail(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(body) => error_detail(&body),
        Err(e) => format!("failed to read error body: {e}"),
    }
}

/// Voyage reports failures as `{"detail": ...}`; anything else is kept raw.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ApiErrorBody { detail }) => detail.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
