use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Nothing is required; the hosted-model narrative is opt-in.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_narrative: bool,
    pub max_upload_bytes: usize,
    /// Job catalog seed file. `None` uses the bundled catalog.
    pub jobs_seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            enable_llm_narrative: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            jobs_seed_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(v) => v
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => defaults.max_upload_bytes,
        };

        let enable_llm_narrative = match lookup("ENABLE_LLM_NARRATIVE") {
            Some(v) => parse_flag(&v).context("ENABLE_LLM_NARRATIVE must be true or false")?,
            None => defaults.enable_llm_narrative,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        let jobs_seed_path = lookup("JOBS_SEED_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key,
            enable_llm_narrative,
            max_upload_bytes,
            jobs_seed_path,
        })
    }

    /// API key to use for narratives, if the hosted model is both enabled and configured.
    pub fn llm_narrative_key(&self) -> Option<&str> {
        if self.enable_llm_narrative {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.llm_narrative_key().is_none());
        assert!(config.jobs_seed_path.is_none());
    }

    #[test]
    fn test_jobs_seed_path_is_read() {
        let config = config_from(&[("JOBS_SEED_PATH", "/srv/jobs.json")]).unwrap();
        assert_eq!(config.jobs_seed_path, Some(PathBuf::from("/srv/jobs.json")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(config_from(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn test_llm_needs_flag_and_key() {
        let key_only = config_from(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert!(key_only.llm_narrative_key().is_none());

        let flag_only = config_from(&[("ENABLE_LLM_NARRATIVE", "true")]).unwrap();
        assert!(flag_only.llm_narrative_key().is_none());

        let both = config_from(&[
            ("ENABLE_LLM_NARRATIVE", "yes"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ])
        .unwrap();
        assert_eq!(both.llm_narrative_key(), Some("sk-test"));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = config_from(&[("ENABLE_LLM_NARRATIVE", "1"), ("ANTHROPIC_API_KEY", "  ")])
            .unwrap();
        assert!(config.llm_narrative_key().is_none());
    }

    #[test]
    fn test_bad_flag_is_rejected() {
        assert!(config_from(&[("ENABLE_LLM_NARRATIVE", "maybe")]).is_err());
    }
}
