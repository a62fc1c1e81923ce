use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::encoding::decode_base64_embedding;
use crate::error::{ValidationError, VoyageError};
use crate::models::{EmbeddingModel, EncodingFormat, InputType, OutputDtype};
use crate::types::Usage;

pub const MAX_EMBED_INPUTS: usize = 128;

/// Body of `POST /v1/embeddings`.
///
/// Unset options are left off the wire entirely so the service applies its
/// own defaults. In particular an absent `output_dimension` means "model
/// default", not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedRequest {
    /// Texts to embed, at most [`MAX_EMBED_INPUTS`] per call.
    pub input: Vec<String>,
    pub model: EmbeddingModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
    /// Truncate over-length inputs instead of failing. Service default: true.
    #[serde(rename = "truncation", skip_serializing_if = "Option::is_none")]
    pub truncate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dimension: Option<NonZeroU32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dtype: Option<OutputDtype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EncodingFormat>,
}

impl EmbedRequest {
    pub fn new<I, S>(input: I, model: impl Into<EmbeddingModel>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            model: model.into(),
            input_type: None,
            truncate: None,
            output_dimension: None,
            output_dtype: None,
            encoding_format: None,
        }
    }

    pub fn single(input: impl Into<String>, model: impl Into<EmbeddingModel>) -> Self {
        let input: String = input.into();
        Self::new([input], model)
    }

    #[must_use]
    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    #[must_use]
    pub fn with_truncate(mut self, truncate: bool) -> Self {
        self.truncate = Some(truncate);
        self
    }

    #[must_use]
    pub fn with_output_dimension(mut self, dimension: NonZeroU32) -> Self {
        self.output_dimension = Some(dimension);
        self
    }

    #[must_use]
    pub fn with_output_dtype(mut self, dtype: OutputDtype) -> Self {
        self.output_dtype = Some(dtype);
        self
    }

    #[must_use]
    pub fn with_encoding_format(mut self, format: EncodingFormat) -> Self {
        self.encoding_format = Some(format);
        self
    }

    /// Checks cardinality rules in a fixed order and reports the first
    /// violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.input.is_empty() {
            return Err(ValidationError::InputRequired);
        }
        if self.input.len() > MAX_EMBED_INPUTS {
            return Err(ValidationError::InputTooLarge);
        }
        if self.model.is_empty() {
            return Err(ValidationError::ModelRequired);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Always `"list"`.
    pub object: String,
    pub data: Vec<EmbedResponseData>,
    pub model: EmbeddingModel,
    pub usage: Usage,
}

impl EmbedResponse {
    /// Embedding vectors ordered by their position in the request input.
    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        let mut data = self.data;
        data.sort_by_key(|it| it.index);
        data.into_iter().map(|it| it.embedding).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedResponseData {
    /// Always `"embedding"`.
    pub object: String,
    /// Quantized dtypes arrive as integers and are widened to `f32`.
    pub embedding: Vec<f32>,
    /// Position of the source text in [`EmbedRequest::input`].
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireEmbedResponse {
    object: String,
    data: Vec<WireEmbedData>,
    model: EmbeddingModel,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct WireEmbedData {
    object: String,
    embedding: WireEmbedding,
    index: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireEmbedding {
    Values(Vec<f32>),
    Base64(String),
}

impl WireEmbedResponse {
    pub(crate) fn into_response(
        self,
        dtype: Option<OutputDtype>,
    ) -> Result<EmbedResponse, VoyageError> {
        let dtype = dtype.unwrap_or_default();
        let data = self
            .data
            .into_iter()
            .map(|it| {
                let embedding = match it.embedding {
                    WireEmbedding::Values(values) => values,
                    WireEmbedding::Base64(encoded) => decode_base64_embedding(&encoded, dtype)?,
                };
                Ok(EmbedResponseData {
                    object: it.object,
                    embedding,
                    index: it.index,
                })
            })
            .collect::<Result<Vec<_>, VoyageError>>()?;

        Ok(EmbedResponse {
            object: self.object,
            data,
            model: self.model,
            usage: self.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected_first() {
        let req = EmbedRequest::new(Vec::<String>::new(), "");
        assert_eq!(req.validate(), Err(ValidationError::InputRequired));
    }

    #[test]
    fn input_limit_is_inclusive() {
        let at_limit = EmbedRequest::new(vec!["x"; MAX_EMBED_INPUTS], EmbeddingModel::Voyage3);
        assert_eq!(at_limit.validate(), Ok(()));

        let over = EmbedRequest::new(vec!["x"; MAX_EMBED_INPUTS + 1], "");
        assert_eq!(over.validate(), Err(ValidationError::InputTooLarge));
    }

    #[test]
    fn empty_model_is_rejected() {
        let req = EmbedRequest::single("hello", "");
        assert_eq!(req.validate(), Err(ValidationError::ModelRequired));
    }

    #[test]
    fn whitespace_model_is_passed_through_to_the_service() {
        let req = EmbedRequest::single("hello", " ");
        assert_eq!(req.validate(), Ok(()));
    }

    #[test]
    fn unset_options_are_omitted_from_body() {
        let req = EmbedRequest::new(["a", "b"], EmbeddingModel::Voyage3);
        let body = serde_json::to_value(&req).expect("serialize request");
        assert_eq!(
            body,
            serde_json::json!({"input": ["a", "b"], "model": "voyage-3"})
        );
    }

    #[test]
    fn set_options_use_wire_field_names() {
        let req = EmbedRequest::single("a", EmbeddingModel::Voyage3Large)
            .with_input_type(InputType::Query)
            .with_truncate(false)
            .with_output_dimension(NonZeroU32::new(512).expect("non-zero"))
            .with_output_dtype(OutputDtype::Int8)
            .with_encoding_format(EncodingFormat::Base64);
        let body = serde_json::to_value(&req).expect("serialize request");
        assert_eq!(
            body,
            serde_json::json!({
                "input": ["a"],
                "model": "voyage-3-large",
                "input_type": "query",
                "truncation": false,
                "output_dimension": 512,
                "output_dtype": "int8",
                "encoding_format": "base64"
            })
        );
    }

    #[test]
    fn wire_response_keeps_index_order() {
        let raw = r#"{"object":"list","data":[
            {"object":"embedding","embedding":[0.3,0.4],"index":1},
            {"object":"embedding","embedding":[0.1,0.2],"index":0}
        ],"model":"voyage-3","usage":{"total_tokens":8}}"#;
        let wire: WireEmbedResponse = serde_json::from_str(raw).expect("parse response");
        let res = wire.into_response(None).expect("convert response");

        assert_eq!(res.model, EmbeddingModel::Voyage3);
        assert_eq!(res.usage.total_tokens, 8);
        assert_eq!(res.data[0].index, 1);
        assert_eq!(res.into_vectors(), vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[test]
    fn integer_embeddings_widen_to_floats() {
        let raw = r#"{"object":"list","data":[
            {"object":"embedding","embedding":[-3,0,127],"index":0}
        ],"model":"voyage-code-3","usage":{"total_tokens":2}}"#;
        let wire: WireEmbedResponse = serde_json::from_str(raw).expect("parse response");
        let res = wire
            .into_response(Some(OutputDtype::Int8))
            .expect("convert response");
        assert_eq!(res.data[0].embedding, vec![-3.0, 0.0, 127.0]);
    }

    #[test]
    fn base64_embeddings_follow_requested_dtype() {
        // [1, 255] as uint8
        let raw = r#"{"object":"list","data":[
            {"object":"embedding","embedding":"Af8=","index":0}
        ],"model":"voyage-3-large","usage":{"total_tokens":1}}"#;
        let wire: WireEmbedResponse = serde_json::from_str(raw).expect("parse response");
        let res = wire
            .into_response(Some(OutputDtype::Uint8))
            .expect("convert response");
        assert_eq!(res.data[0].embedding, vec![1.0, 255.0]);
    }
}
