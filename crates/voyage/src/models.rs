use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declares a model identifier enum that round-trips through its wire string.
///
/// Unknown identifiers land in `Custom` so newly released models stay usable
/// before this crate learns their names.
macro_rules! model_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Custom(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Custom(name) => name.as_str(),
                }
            }

            pub fn is_empty(&self) -> bool {
                self.as_str().is_empty()
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Custom(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Custom(name) => name,
                    other => other.as_str().to_string(),
                }
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

model_enum! {
    /// Embedding models served by `/v1/embeddings`.
    EmbeddingModel {
        Voyage3Large => "voyage-3-large",
        Voyage3 => "voyage-3",
        Voyage3Lite => "voyage-3-lite",
        VoyageCode3 => "voyage-code-3",
        VoyageFinance2 => "voyage-finance-2",
        VoyageLaw2 => "voyage-law-2",
        VoyageMultilingual2 => "voyage-multilingual-2",
        VoyageLarge2Instruct => "voyage-large-2-instruct",
        VoyageLarge2 => "voyage-large-2",
        Voyage2 => "voyage-2",
        VoyageLite02Instruct => "voyage-lite-02-instruct",
        Voyage02 => "voyage-02",
        Voyage01 => "voyage-01",
        VoyageLite01 => "voyage-lite-01",
        VoyageLite01Instruct => "voyage-lite-01-instruct",
    }
}

model_enum! {
    /// Reranker models served by `/v1/rerank`.
    RerankModel {
        Rerank2 => "rerank-2",
        Rerank2Lite => "rerank-2-lite",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// Tells the service whether inputs are search queries or documents so it
/// can prepend the matching retrieval prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Query,
    Document,
}

impl InputType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Document => "document",
        }
    }
}

impl FromStr for InputType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "document" => Ok(Self::Document),
            _ => Err(ParseEnumError {
                kind: "input type",
                value: s.to_string(),
                expected: "query, document",
            }),
        }
    }
}

/// Numeric type of returned embeddings. Everything except `Float` is a
/// quantized representation; `Binary`/`Ubinary` are bit-packed, so the
/// returned vector is one eighth of `output_dimension`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDtype {
    #[default]
    Float,
    Int8,
    Uint8,
    Binary,
    Ubinary,
}

impl OutputDtype {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Binary => "binary",
            Self::Ubinary => "ubinary",
        }
    }
}

impl FromStr for OutputDtype {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" => Ok(Self::Float),
            "int8" => Ok(Self::Int8),
            "uint8" => Ok(Self::Uint8),
            "binary" => Ok(Self::Binary),
            "ubinary" => Ok(Self::Ubinary),
            _ => Err(ParseEnumError {
                kind: "output dtype",
                value: s.to_string(),
                expected: "float, int8, uint8, binary, ubinary",
            }),
        }
    }
}

/// Wire encoding of embeddings. Leaving the field unset returns plain JSON
/// number arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    Base64,
}

impl FromStr for EncodingFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            _ => Err(ParseEnumError {
                kind: "encoding format",
                value: s.to_string(),
                expected: "base64",
            }),
        }
    }
}
