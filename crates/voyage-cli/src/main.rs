mod logging;

use std::io::{self, Write};
use std::num::NonZeroU32;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use voyage::{
    API_KEY_ENV, ClientConfig, EmbedRequest, EmbeddingModel, EncodingFormat, InputType,
    OutputDtype, RerankModel, RerankRequest, VoyageApi, VoyageClient,
};

#[derive(Debug, Parser)]
#[command(name = "voyage", version, about = "Embed and rerank text with the Voyage AI API")]
struct Cli {
    /// Defaults to the `VOYAGE_API_KEY` environment variable.
    #[arg(long, global = true, env = API_KEY_ENV, hide_env_values = true, default_value = "")]
    api_key: String,

    /// API root; defaults to https://api.voyageai.com.
    #[arg(long, global = true, default_value = "")]
    base_url: String,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate embeddings for one or more texts.
    Embed(EmbedArgs),
    /// Score documents against a query.
    Rerank(RerankArgs),
}

impl Command {
    const fn name(&self) -> &'static str {
        match self {
            Self::Embed(_) => "embed",
            Self::Rerank(_) => "rerank",
        }
    }
}

#[derive(Debug, Args)]
struct EmbedArgs {
    #[arg(long, short, default_value = "voyage-3")]
    model: EmbeddingModel,
    #[arg(long)]
    input_type: Option<InputType>,
    #[arg(long)]
    truncate: Option<bool>,
    #[arg(long)]
    output_dimension: Option<NonZeroU32>,
    #[arg(long)]
    output_dtype: Option<OutputDtype>,
    #[arg(long)]
    encoding_format: Option<EncodingFormat>,
    #[arg(required = true)]
    texts: Vec<String>,
}

impl EmbedArgs {
    fn into_request(self) -> EmbedRequest {
        let mut request = EmbedRequest::new(self.texts, self.model);
        request.input_type = self.input_type;
        request.truncate = self.truncate;
        request.output_dimension = self.output_dimension;
        request.output_dtype = self.output_dtype;
        request.encoding_format = self.encoding_format;
        request
    }
}

#[derive(Debug, Args)]
struct RerankArgs {
    #[arg(long, short)]
    query: String,
    #[arg(long, short, default_value = "rerank-2")]
    model: RerankModel,
    #[arg(long)]
    top_k: Option<NonZeroU32>,
    #[arg(long)]
    return_documents: bool,
    #[arg(long)]
    truncate: Option<bool>,
    #[arg(required = true)]
    documents: Vec<String>,
}

impl RerankArgs {
    fn into_request(self) -> RerankRequest {
        let mut request = RerankRequest::new(self.query, self.documents, self.model)
            .with_return_documents(self.return_documents);
        request.top_k = self.top_k;
        request.truncate = self.truncate;
        request
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    let client = VoyageClient::new(
        ClientConfig::new(cli.api_key).with_base_url(cli.base_url),
    );
    tracing::debug!(
        command = cli.command.name(),
        base_url = client.base_url(),
        api_key_set = !client.api_key().is_empty(),
        "voyage client ready"
    );

    let output = match cli.command {
        Command::Embed(args) => {
            let response = client
                .embed(args.into_request())
                .await
                .context("embed request failed")?;
            serde_json::to_vec_pretty(&response)?
        }
        Command::Rerank(args) => {
            let response = client
                .rerank(args.into_request())
                .await
                .context("rerank request failed")?;
            serde_json::to_vec_pretty(&response)?
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_flags_map_onto_request() {
        let cli = Cli::try_parse_from([
            "voyage",
            "embed",
            "--model",
            "voyage-3-large",
            "--input-type",
            "query",
            "--output-dimension",
            "256",
            "--output-dtype",
            "ubinary",
            "first",
            "second",
        ])
        .expect("parse embed args");

        assert_eq!(cli.command.name(), "embed");
        let Command::Embed(args) = cli.command else {
            panic!("expected embed subcommand");
        };
        let request = args.into_request();
        assert_eq!(request.input, vec!["first", "second"]);
        assert_eq!(request.model, EmbeddingModel::Voyage3Large);
        assert_eq!(request.input_type, Some(InputType::Query));
        assert_eq!(request.output_dimension, NonZeroU32::new(256));
        assert_eq!(request.output_dtype, Some(OutputDtype::Ubinary));
        assert_eq!(request.encoding_format, None);
    }

    #[test]
    fn rerank_defaults_to_rerank_2_without_documents_echo() {
        let cli = Cli::try_parse_from([
            "voyage",
            "--base-url",
            "http://localhost:8080",
            "rerank",
            "--query",
            "what is rust",
            "doc a",
            "doc b",
        ])
        .expect("parse rerank args");

        assert_eq!(cli.base_url, "http://localhost:8080");
        assert_eq!(cli.command.name(), "rerank");
        let Command::Rerank(args) = cli.command else {
            panic!("expected rerank subcommand");
        };
        let request = args.into_request();
        assert_eq!(request.model, RerankModel::Rerank2);
        assert_eq!(request.query, "what is rust");
        assert_eq!(request.documents.len(), 2);
        assert!(!request.return_documents);
        assert_eq!(request.top_k, None);
    }

    #[test]
    fn zero_output_dimension_is_rejected() {
        let parsed = Cli::try_parse_from([
            "voyage",
            "embed",
            "--output-dimension",
            "0",
            "text",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn texts_are_required() {
        assert!(Cli::try_parse_from(["voyage", "embed"]).is_err());
    }
}
