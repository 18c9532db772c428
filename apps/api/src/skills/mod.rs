// Skill detection: the vocabulary plus the two matchers that run against it.
// Keyword matching is exact and deterministic; semantic matching needs an embedder.

pub mod keyword;
pub mod semantic;
pub mod vocabulary;

pub use keyword::match_keywords;
pub use semantic::match_semantic;
pub use vocabulary::SkillVocabulary;
