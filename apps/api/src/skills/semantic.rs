//! Semantic skill matcher — vocabulary phrases whose embedding sits close to the text.
//!
//! A soft signal: generic relatedness produces false positives and short,
//! ambiguous phrases produce false negatives. Callers treat it as a supplement
//! to keyword matches, never a replacement.

use std::collections::BTreeSet;

use tracing::debug;

use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::skills::vocabulary::SkillVocabulary;

/// Default similarity a phrase must strictly exceed.
pub const DEFAULT_THRESHOLD: f32 = 0.4;

/// Returns every vocabulary phrase whose cosine similarity to `text` strictly
/// exceeds `threshold`.
///
/// The text and all phrases are embedded in one batch, text first.
pub async fn match_semantic(
    text: &str,
    vocabulary: &SkillVocabulary,
    embedder: &dyn Embedder,
    threshold: f32,
) -> Result<BTreeSet<String>, EmbeddingError> {
    if text.trim().is_empty() || vocabulary.is_empty() {
        return Ok(BTreeSet::new());
    }

    let mut inputs = Vec::with_capacity(vocabulary.len() + 1);
    inputs.push(text.to_string());
    inputs.extend(vocabulary.phrases().iter().cloned());

    let embeddings = embedder.embed_batch(&inputs).await?;
    if embeddings.len() != inputs.len() {
        return Err(EmbeddingError::CountMismatch {
            expected: inputs.len(),
            actual: embeddings.len(),
        });
    }

    let (text_embedding, phrase_embeddings) = embeddings.split_at(1);
    let text_embedding = &text_embedding[0];

    let matched: BTreeSet<String> = vocabulary
        .phrases()
        .iter()
        .zip(phrase_embeddings)
        .filter_map(|(phrase, embedding)| {
            let similarity = cosine_similarity(text_embedding, embedding);
            (similarity > threshold).then(|| {
                debug!("Semantic match '{phrase}' (similarity={similarity:.3})");
                phrase.clone()
            })
        })
        .collect();

    Ok(matched)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Test embedder: the text (first input) maps to `[1, 0]`; phrases listed in
    /// `related` map to the same vector, everything else is orthogonal.
    pub(crate) struct StubEmbedder {
        pub related: Vec<&'static str>,
    }

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(inputs
                .iter()
                .enumerate()
                .map(|(i, input)| {
                    if i == 0 || self.related.contains(&input.as_str()) {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }

        fn backend(&self) -> &str {
            "stub"
        }
    }

    /// Always returns one vector too few.
    pub(crate) struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(vec![vec![1.0]; inputs.len().saturating_sub(1)])
        }

        fn backend(&self) -> &str {
            "short"
        }
    }

    #[tokio::test]
    async fn test_identical_embedding_is_included() {
        let vocab = SkillVocabulary::new(["docker", "tableau"]).unwrap();
        let embedder = StubEmbedder {
            related: vec!["docker"],
        };

        let found = match_semantic("containers everywhere", &vocab, &embedder, DEFAULT_THRESHOLD)
            .await
            .unwrap();
        assert_eq!(found, BTreeSet::from(["docker".to_string()]));
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let vocab = SkillVocabulary::new(["docker"]).unwrap();
        let embedder = StubEmbedder {
            related: vec!["docker"],
        };

        let found = match_semantic("containers", &vocab, &embedder, 1.0)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_skips_embedding() {
        let vocab = SkillVocabulary::new(["docker"]).unwrap();
        let found = match_semantic("   ", &vocab, &ShortEmbedder, DEFAULT_THRESHOLD)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_count_mismatch_is_error() {
        let vocab = SkillVocabulary::new(["docker", "git"]).unwrap();
        let err = match_semantic("text", &vocab, &ShortEmbedder, DEFAULT_THRESHOLD)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::CountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }
}
