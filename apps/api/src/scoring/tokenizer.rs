//! Tokenizers shared by the scorer and the narrative selector.
//!
//! Two shapes of token exist:
//! - technical tokens (`tokenize`): a letter followed by letters or `+ . # -`, so
//!   `c++`, `node.js` and `c#` survive as one token. Used for overlap scoring.
//! - plain words (`plain_words`): alphanumeric runs only. Used for keyword frequency.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static TECH_TOKEN_RE: OnceLock<Regex> = OnceLock::new();
static PLAIN_WORD_RE: OnceLock<Regex> = OnceLock::new();

/// Lower-cases `text` and returns its technical tokens in order of appearance.
///
/// Sentence punctuation left hanging off a token ("Python." / "full-") is trimmed;
/// interior punctuation is kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let re = TECH_TOKEN_RE
        .get_or_init(|| Regex::new(r"[a-z][a-z+.#-]*").expect("tech token regex"));
    let lowered = text.to_lowercase();
    re.find_iter(&lowered)
        .map(|m| m.as_str().trim_end_matches(['.', '-']).to_string())
        .collect()
}

/// Distinct technical tokens of `text`.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Lower-cases `text` and returns its plain alphanumeric words in order of appearance.
pub fn plain_words(text: &str) -> Vec<String> {
    let re = PLAIN_WORD_RE.get_or_init(|| Regex::new(r"[a-z0-9]+").expect("plain word regex"));
    let lowered = text.to_lowercase();
    re.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
