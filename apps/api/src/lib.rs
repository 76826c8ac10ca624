//! Resume fit analyzer: keyword-overlap scoring and deterministic narratives,
//! served over HTTP by the `resume-analyzer` binary.
//!
//! Core contract: [`scoring::scorer::score_resume`] and
//! [`narrative::selector::build_narrative`].

pub mod config;
pub mod errors;
pub mod evaluation;
pub mod extraction;
pub mod jobs;
pub mod llm_client;
pub mod narrative;
pub mod routes;
pub mod scoring;
pub mod state;
