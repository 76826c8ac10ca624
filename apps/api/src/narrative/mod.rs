// Narrative Selector: job keywords → resume matches → tiered template → highlighted text.
// The hosted-model generator sits behind the same trait and always degrades to templates.

pub mod generator;
pub mod keywords;
pub mod prompts;
pub mod selector;
pub mod templates;
