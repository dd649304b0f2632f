//! Vocabulary Vectorizer — term-frequency space fixed by the reference document.
//!
//! Two-phase contract: `VectorSpace::build` fits the vocabulary on the
//! reference text alone, `VectorSpace::project` maps any other text into it.
//! Candidate terms the reference never used are dropped, so the reference
//! defines every dimension that can contribute to similarity.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VectorizeError {
    #[error("Reference text produced no vocabulary terms")]
    EmptyVocabulary,
}

/// Runs of two or more word characters, Unicode aware.
fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Splits text into lowercase tokens. Single-character words are skipped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    token_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
}

/// Term counts laid out in the column order of a `VectorSpace`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector(Vec<u32>);

impl TermVector {
    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Fixed vocabulary built from the reference text.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    columns: HashMap<String, usize>,
    terms: Vec<String>,
    reference: TermVector,
}

impl VectorSpace {
    /// Fits the vocabulary on `reference_text`. Columns are assigned in
    /// first-seen order.
    pub fn build(reference_text: &str) -> Result<Self, VectorizeError> {
        let mut columns: HashMap<String, usize> = HashMap::new();
        let mut terms = Vec::new();
        let mut counts: Vec<u32> = Vec::new();

        for token in tokenize(reference_text) {
            match columns.get(&token) {
                Some(&column) => counts[column] += 1,
                None => {
                    columns.insert(token.clone(), terms.len());
                    terms.push(token);
                    counts.push(1);
                }
            }
        }

        if terms.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        Ok(Self {
            columns,
            terms,
            reference: TermVector(counts),
        })
    }

    /// Counts vocabulary terms in `text`. Unknown tokens are ignored.
    pub fn project(&self, text: &str) -> TermVector {
        let mut counts = vec![0u32; self.terms.len()];
        for token in tokenize(text) {
            if let Some(&column) = self.columns.get(&token) {
                counts[column] += 1;
            }
        }
        TermVector(counts)
    }

    /// The reference document's own term counts.
    pub fn reference_vector(&self) -> &TermVector {
        &self.reference
    }

    #[allow(dead_code)]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[allow(dead_code)]
    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_single_characters_and_punctuation() {
        let tokens: Vec<String> = tokenize("I know C, C++ and Rust (5 yrs).").collect();
        assert_eq!(tokens, vec!["know", "and", "rust", "yrs"]);
    }

    #[test]
    fn test_tokenize_is_case_insensitive() {
        let tokens: Vec<String> = tokenize("Python PYTHON python").collect();
        assert_eq!(tokens, vec!["python", "python", "python"]);
    }

    #[test]
    fn test_tokenize_keeps_digits_and_underscores() {
        let tokens: Vec<String> = tokenize("python3 snake_case 42").collect();
        assert_eq!(tokens, vec!["python3", "snake_case", "42"]);
    }

    #[test]
    fn test_build_assigns_first_seen_columns() {
        let space = VectorSpace::build("rust tokio rust axum").unwrap();
        assert_eq!(space.terms(), ["rust", "tokio", "axum"]);
        assert_eq!(space.column("tokio"), Some(1));
        assert_eq!(space.reference_vector().counts(), [2, 1, 1]);
    }

    #[test]
    fn test_build_empty_reference_is_empty_vocabulary() {
        assert_eq!(
            VectorSpace::build("").unwrap_err(),
            VectorizeError::EmptyVocabulary
        );
        assert_eq!(
            VectorSpace::build("a b c ! ?").unwrap_err(),
            VectorizeError::EmptyVocabulary
        );
    }

    #[test]
    fn test_project_ignores_out_of_vocabulary_terms() {
        let space = VectorSpace::build("python data analysis").unwrap();
        let vector = space.project("python python java kotlin data");
        assert_eq!(vector.counts(), [2, 1, 0]);
        assert_eq!(vector.len(), space.len());
    }

    #[test]
    fn test_project_does_not_grow_vocabulary() {
        let space = VectorSpace::build("python").unwrap();
        let _ = space.project("java scala go");
        assert_eq!(space.len(), 1);
        assert_eq!(space.column("java"), None);
    }
}
