//! Keyword weight table: recognized technical terms count for more than ordinary words.

use std::collections::HashSet;

/// Weight of an overlapping token that is not a recognized technical term.
pub const ORDINARY_TERM_WEIGHT: f64 = 1.0;

/// Weight of an overlapping token found in the technical-term dictionary.
pub const TECH_TERM_WEIGHT: f64 = 1.5;

/// Technical terms recognized by the standard weight table. Lower-case, tokenizer form.
const STANDARD_TECH_TERMS: &[&str] = &[
    "python",
    "flask",
    "sql",
    "pandas",
    "javascript",
    "react",
    "docker",
    "aws",
    "gcp",
    "azure",
    "ml",
    "nlp",
];

/// Immutable mapping from token to overlap weight.
///
/// Built once at startup and shared read-only across evaluations.
#[derive(Debug, Clone)]
pub struct KeywordWeights {
    tech_terms: HashSet<String>,
    tech_weight: f64,
    ordinary_weight: f64,
}

impl Default for KeywordWeights {
    fn default() -> Self {
        Self::new(
            STANDARD_TECH_TERMS.iter().copied(),
            TECH_TERM_WEIGHT,
            ORDINARY_TERM_WEIGHT,
        )
    }
}

impl KeywordWeights {
    pub fn new<'a>(
        tech_terms: impl IntoIterator<Item = &'a str>,
        tech_weight: f64,
        ordinary_weight: f64,
    ) -> Self {
        Self {
            tech_terms: tech_terms.into_iter().map(str::to_lowercase).collect(),
            tech_weight,
            ordinary_weight,
        }
    }

    /// Weight contributed by `token` when it appears in both resume and job description.
    pub fn weight_of(&self, token: &str) -> f64 {
        if self.is_tech_term(token) {
            self.tech_weight
        } else {
            self.ordinary_weight
        }
    }

    pub fn is_tech_term(&self, token: &str) -> bool {
        self.tech_terms.contains(token)
    }
}
