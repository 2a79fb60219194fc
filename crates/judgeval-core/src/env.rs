use std::sync::OnceLock;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_API_URL: &str = "https://api.judgmentlabs.ai";
pub const DEFAULT_GPT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const ENV_PREFIX: &str = "JUDGMENT";

/// Deployment settings read from `JUDGMENT_*` environment variables.
///
/// | variable                     | default                       |
/// |------------------------------|-------------------------------|
/// | `JUDGMENT_API_KEY`           | -                             |
/// | `JUDGMENT_ORG_ID`            | -                             |
/// | `JUDGMENT_API_URL`           | `https://api.judgmentlabs.ai` |
/// | `JUDGMENT_DEFAULT_GPT_MODEL` | `gpt-4.1`                     |
/// | `JUDGMENT_NO_COLOR`          | -                             |
/// | `JUDGMENT_LOG_LEVEL`         | `warn`                        |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Env {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
    pub api_url: String,
    pub default_gpt_model: String,
    #[serde(default)]
    pub no_color: Option<String>,
    pub log_level: String,
}

impl Env {
    /// Process-wide settings, resolved on first use and never re-read.
    pub fn global() -> &'static Env {
        static GLOBAL: OnceLock<Env> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            Env::load().unwrap_or_else(|err| {
                tracing::warn!("Failed to read JUDGMENT_* environment, using defaults: {}", err);
                Env::default()
            })
        })
    }

    /// Reads the current process environment.
    pub fn load() -> Result<Self> {
        Self::resolve(Environment::with_prefix(ENV_PREFIX))
    }

    /// Resolves settings from an explicit set of variables instead of the
    /// process environment. Keys use the full names, e.g. `JUDGMENT_API_URL`.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::resolve(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    fn resolve(source: Environment) -> Result<Self> {
        let config = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("default_gpt_model", DEFAULT_GPT_MODEL)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(source)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn no_color(&self) -> bool {
        self.no_color.is_some()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self {
            api_key: None,
            org_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            default_gpt_model: DEFAULT_GPT_MODEL.to_string(),
            no_color: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let env = Env::from_vars(Vec::<(String, String)>::new()).unwrap();

        assert_eq!(env.api_url, "https://api.judgmentlabs.ai");
        assert_eq!(env.default_gpt_model, "gpt-4.1");
        assert_eq!(env.log_level, "warn");
        assert!(env.api_key.is_none());
        assert!(env.org_id.is_none());
        assert!(!env.no_color());
        assert_eq!(env, Env::default());
    }

    #[test]
    fn test_api_url_is_taken_verbatim() {
        let env = Env::from_vars([("JUDGMENT_API_URL", "http://localhost:8000/")]).unwrap();
        assert_eq!(env.api_url, "http://localhost:8000/");
    }

    #[test]
    fn test_reads_all_variables() {
        let env = Env::from_vars([
            ("JUDGMENT_API_KEY", "sk-test"),
            ("JUDGMENT_ORG_ID", "org-1"),
            ("JUDGMENT_DEFAULT_GPT_MODEL", "gpt-4o-mini"),
            ("JUDGMENT_NO_COLOR", "1"),
            ("JUDGMENT_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(env.api_key.as_deref(), Some("sk-test"));
        assert_eq!(env.org_id.as_deref(), Some("org-1"));
        assert_eq!(env.default_gpt_model, "gpt-4o-mini");
        assert!(env.no_color());
        assert_eq!(env.log_level, "debug");
    }

    #[test]
    fn test_ignores_unrelated_variables() {
        let env = Env::from_vars([("OPENAI_API_KEY", "sk-other"), ("JUDGMENT_ORG_ID", "org-2")]).unwrap();
        assert!(env.api_key.is_none());
        assert_eq!(env.org_id.as_deref(), Some("org-2"));
    }
}
