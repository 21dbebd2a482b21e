use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Run settings. Every field has a built-in default and can be overridden
/// with a `DEVJOBS_`-prefixed environment variable, e.g. `DEVJOBS_PAGE_COUNT=8`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub query: String,
    pub page_count: u32,
    pub page_stride: u32,
    pub user_agent: String,
    pub db_path: PathBuf,
    pub raw_csv: PathBuf,
    pub clean_csv: PathBuf,
    pub plots_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_env(Environment::with_prefix("DEVJOBS").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self> {
        Config::builder()
            .set_default("base_url", "https://devjobs.at")?
            .set_default("query", "wien")?
            .set_default("page_count", 4_i64)?
            .set_default("page_stride", 10_i64)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("db_path", "jobs.db")?
            .set_default("raw_csv", "jobs.csv")?
            .set_default("clean_csv", "jobs_clean.csv")?
            .set_default("plots_dir", "analysis/plots")?
            .add_source(env)
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_vars(vars: &[(&str, &str)]) -> Result<Settings> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_env(
            Environment::with_prefix("DEVJOBS")
                .try_parsing(true)
                .source(Some(source)),
        )
    }

    #[test]
    fn defaults() {
        let s = with_vars(&[]).unwrap();
        assert_eq!(s.base_url, "https://devjobs.at");
        assert_eq!(s.query, "wien");
        assert_eq!((s.page_count, s.page_stride), (4, 10));
        assert!(s.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(s.plots_dir, PathBuf::from("analysis/plots"));
    }

    #[test]
    fn env_overrides() {
        let s = with_vars(&[
            ("DEVJOBS_PAGE_COUNT", "30"),
            ("DEVJOBS_PAGE_STRIDE", "2"),
            ("DEVJOBS_QUERY", "graz"),
        ])
        .unwrap();
        assert_eq!((s.page_count, s.page_stride), (30, 2));
        assert_eq!(s.query, "graz");
    }
}
