//! Job-description keyword extraction and resume matching.

use std::collections::{HashMap, HashSet};

use crate::scoring::tokenizer::plain_words;

/// Number of top keywords extracted from a job description.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;

/// Number of top keywords substituted when none of them appear in the resume.
pub const FALLBACK_KEYWORD_COUNT: usize = 3;

/// Articles, conjunctions, common prepositions, pronouns and auxiliaries.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "of", "to",
    "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under", "about",
    "as", "per", "via", "within", "across", "through", "is", "are", "was", "were", "be",
    "been", "being", "will", "would", "can", "could", "should", "may", "must", "have", "has",
    "had", "do", "does", "we", "you", "our", "your", "us", "they", "their", "it", "its",
    "this", "that", "these", "those", "who", "which", "what", "i", "me", "my",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// The `n` most frequent non-stopword words of `job_desc`.
///
/// Ties keep the order in which the words were first encountered.
pub fn top_keywords(job_desc: &str, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in plain_words(job_desc) {
        if is_stopword(&word) {
            continue;
        }
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-encounter order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(word, _)| word).collect()
}

/// Resume matches for a job's top keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatches {
    /// Keywords to mention in the narrative, in top-keyword order.
    pub keywords: Vec<String>,
    /// True when nothing matched and `keywords` holds the substituted top keywords.
    pub fallback: bool,
}

impl KeywordMatches {
    /// Number of keywords genuinely found in the resume. Zero for a fallback list.
    pub fn match_count(&self) -> usize {
        if self.fallback {
            0
        } else {
            self.keywords.len()
        }
    }
}

/// Top keywords that occur as whole words in `resume_text`, in top-keyword order.
///
/// FALLBACK: when nothing matches, the first `FALLBACK_KEYWORD_COUNT` top keywords are
/// returned instead so the narrative always has terms to mention. This list is only
/// used for narrative text; the numeric score never sees it, and the tier is chosen
/// from the genuine match count (zero).
pub fn match_keywords(top_keywords: &[String], resume_text: &str) -> KeywordMatches {
    let resume_words: HashSet<String> = plain_words(resume_text).into_iter().collect();

    let matched: Vec<String> = top_keywords
        .iter()
        .filter(|kw| resume_words.contains(kw.to_lowercase().as_str()))
        .cloned()
        .collect();

    if matched.is_empty() {
        KeywordMatches {
            keywords: top_keywords
                .iter()
                .take(FALLBACK_KEYWORD_COUNT)
                .cloned()
                .collect(),
            fallback: true,
        }
    } else {
        KeywordMatches {
            keywords: matched,
            fallback: false,
        }
    }
}

/// Keyword list of `match_keywords`, fallback included.
pub fn matched_keywords(top_keywords: &[String], resume_text: &str) -> Vec<String> {
    match_keywords(top_keywords, resume_text).keywords
}
