//! Embedding backends — turn text into fixed-length vectors for semantic matching.
//!
//! `AppState` holds an `Option<Arc<dyn Embedder>>`; `None` means semantic
//! matching is disabled and only keyword results are reported.

use async_trait::async_trait;
use thiserror::Error;

pub mod ollama;

pub use ollama::OllamaEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// The embedder trait. Implement this to swap embedding backends without
/// touching the matcher or handler code.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds every input, returning one vector per input in the same order.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Short backend label for logs.
    fn backend(&self) -> &str;
}

/// Cosine similarity in `[-1, 1]`.
///
/// Vectors of different length, empty vectors and zero-norm vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f32, 0.0_f32, 0.0_f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0)
}
