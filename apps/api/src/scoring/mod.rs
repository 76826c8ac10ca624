// Tokenizer & Scorer: raw text → token sets → weighted overlap → bounded score.
// Pure functions only; the weight table is injected and never mutated.

pub mod scorer;
pub mod tokenizer;
pub mod weights;
