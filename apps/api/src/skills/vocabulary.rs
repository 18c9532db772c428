//! Skill vocabulary — the fixed universe of phrases every matcher works against.
//!
//! Loaded once in `main` and shared read-only through `AppState`.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::RegexSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read skills file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Skills file '{0}' contains no usable phrases")]
    Empty(String),

    #[error("Failed to compile skill patterns: {0}")]
    Pattern(#[from] regex::Error),
}

/// Tech-role skill set shipped with the service.
const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c",
    "javascript",
    "html",
    "css",
    "react",
    "node.js",
    "angular",
    "flask",
    "django",
    "spring boot",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "firebase",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
    "mlops",
    "docker",
    "kubernetes",
    "aws",
    "gcp",
    "azure",
    "airflow",
    "bigquery",
    "snowflake",
    "data analysis",
    "etl",
    "data engineering",
    "data visualization",
    "tableau",
    "power bi",
    "jira",
    "git",
    "ci/cd",
    "api",
    "rest api",
    "bash",
    "linux",
    "streamlit",
    "langchain",
    "hugging face",
    "prompt engineering",
    "llm",
    "llms",
    "chatgpt",
    "transformers",
];

/// Common English stop words. A vocabulary phrase equal to one of these is dropped.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Immutable set of lower-cased skill phrases with their compiled boundary patterns.
///
/// `phrases` and the pattern set share indices: pattern `i` matches `phrases[i]`.
#[derive(Debug)]
pub struct SkillVocabulary {
    phrases: Vec<String>,
    patterns: RegexSet,
}

impl SkillVocabulary {
    /// Builds a vocabulary from raw phrases: trimmed, lower-cased, stop words and
    /// duplicates removed, sorted.
    pub fn new<I, S>(phrases: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty() && !STOP_WORDS.contains(p.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let patterns = RegexSet::new(phrases.iter().map(|p| boundary_pattern(p)))?;
        Ok(Self { phrases, patterns })
    }

    /// The built-in tech-role vocabulary.
    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::new(DEFAULT_SKILLS)
    }

    /// Loads a newline-delimited skills file. Blank lines and `#` comments are ignored.
    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let vocabulary = Self::new(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )?;

        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty(path.display().to_string()));
        }
        Ok(vocabulary)
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub(crate) fn patterns(&self) -> &RegexSet {
        &self.patterns
    }
}

/// Whole-phrase pattern: the phrase may not touch a word character on either side.
///
/// Plain `\b` anchors would never match phrases ending in punctuation such as
/// `c++` when followed by a space, so adjacency is expressed directly instead.
/// The same rule applies at the start: `.net` matches a standalone `.net` but
/// not the tail of `asp.net`.
fn boundary_pattern(phrase: &str) -> String {
    format!(r"(?:^|\W){}(?:\W|$)", regex::escape(phrase))
}
