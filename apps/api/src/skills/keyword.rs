//! Keyword skill matcher — whole-phrase occurrences of vocabulary terms.

use std::collections::BTreeSet;

use crate::skills::vocabulary::SkillVocabulary;

/// Returns every vocabulary phrase that occurs in `text` as a whole word or phrase.
///
/// The text is lower-cased once and scanned in a single pass over the
/// vocabulary's compiled pattern set. The result is always a subset of the
/// vocabulary.
pub fn match_keywords(text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    if text.trim().is_empty() || vocabulary.is_empty() {
        return BTreeSet::new();
    }

    let lowered = text.to_lowercase();
    vocabulary
        .patterns()
        .matches(&lowered)
        .into_iter()
        .map(|idx| vocabulary.phrases()[idx].clone())
        .collect()
}
