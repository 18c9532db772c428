use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError};

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Embedder backed by an Ollama-compatible `/api/embed` endpoint.
/// One HTTP call per batch, no retries.
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embed", self.base_url)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(self.endpoint())
            .json(&EmbedRequest {
                model: &self.model,
                input: inputs,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let embed_response: EmbedResponse = response.json().await?;
        if embed_response.embeddings.len() != inputs.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: inputs.len(),
                actual: embed_response.embeddings.len(),
            });
        }

        debug!(
            "Embedded {} inputs with model {} (dim={})",
            inputs.len(),
            self.model,
            embed_response.embeddings.first().map_or(0, Vec::len)
        );
        Ok(embed_response.embeddings)
    }

    fn backend(&self) -> &str {
        "ollama"
    }
}
