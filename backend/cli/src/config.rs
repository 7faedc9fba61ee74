use serde::Deserialize;

use docsmith_planner::generator::DEFAULT_MODEL;
use docsmith_planner::providers::openai::DEFAULT_BASE_URL;

/// docsmith runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OpenAI-compatible API key
    pub openai_api_key: Option<String>,
    /// OpenAI-compatible base URL
    pub openai_base_url: String,
    /// Chat model used for generation and refinement
    pub model: String,
    /// SQLite database path
    pub db_path: String,
    /// Directory for the rolling JSON log file
    pub log_dir: String,
    /// Log level
    pub log_level: String,

    // Supabase auth
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,

    /// Owner used when no bearer token is given
    pub local_user: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            db_path: "docsmith.db".to_string(),
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            local_user: "local".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            model: get("MODEL_NAME").unwrap_or(defaults.model),
            db_path: get("DOCSMITH_DB").unwrap_or(defaults.db_path),
            log_dir: get("DOCSMITH_LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: get("RUST_LOG").unwrap_or(defaults.log_level),
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            local_user: get("DOCSMITH_USER").unwrap_or(defaults.local_user),
        }
    }

    /// Supabase URL and anon key, when both are configured.
    pub fn supabase(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.db_path, "docsmith.db");
        assert_eq!(config.local_user, "local");
        assert!(config.openai_api_key.is_none());
        assert!(config.supabase().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = config(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL_NAME", "gpt-4o-mini"),
            ("DOCSMITH_DB", "/tmp/d.db"),
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]);
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.db_path, "/tmp/d.db");
        assert_eq!(config.supabase(), Some(("https://x.supabase.co", "anon")));
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config(&[("OPENAI_API_KEY", ""), ("MODEL_NAME", "  ")]);
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.model, "gpt-4.1");
    }
}
