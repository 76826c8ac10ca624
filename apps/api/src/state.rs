use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobCatalog;
use crate::narrative::generator::NarrativeGenerator;
use crate::scoring::weights::KeywordWeights;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Overlap weight table used by the scorer.
    pub weights: Arc<KeywordWeights>,
    /// Read-only job catalog loaded from the seed file.
    pub jobs: Arc<JobCatalog>,
    /// Pluggable narrative source. Default: TemplateNarrator. Swap via ENABLE_LLM_NARRATIVE.
    pub narrator: Arc<dyn NarrativeGenerator>,
}
