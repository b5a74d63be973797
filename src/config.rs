use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Names a JSON file with overrides for any [`DashboardConfig`] field.
pub const CONFIG_PATH_ENV: &str = "BREWERY_DASHBOARD_CONFIG";
pub const API_URL_ENV: &str = "BREWERY_API_URL";
pub const PAGE_SIZE_ENV: &str = "BREWERY_PAGE_SIZE";
pub const DISPLAY_ROWS_ENV: &str = "BREWERY_DISPLAY_ROWS";

/// Runtime settings for the catalog fetch and the results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Catalog endpoint, without the `per_page` query parameter.
    pub api_url: String,
    /// Records requested from the single catalog page.
    pub page_size: u32,
    pub request_timeout_secs: u64,
    /// Rows shown in the results table; the summary still covers every match.
    pub display_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openbrewerydb.org/v1/breweries".to_owned(),
            page_size: 50,
            request_timeout_secs: 30,
            display_rows: 10,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then the optional JSON file, then environment overrides.
    ///
    /// Problems with any source are logged and that source is skipped.
    pub fn load() -> Self {
        Self::from_sources(|key| std::env::var(key).ok())
    }

    /// Same as [`DashboardConfig::load`] with an injectable environment lookup.
    pub fn from_sources(env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match env(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(Path::new(&path)).unwrap_or_else(|e| {
                log::warn!("Ignoring config file {path}: {e:#}");
                Self::default()
            }),
            None => Self::default(),
        };
        config.apply_env(env);
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(n) = parse_positive(&env, PAGE_SIZE_ENV) {
            self.page_size = n;
        }
        if let Some(n) = parse_positive(&env, DISPLAY_ROWS_ENV) {
            self.display_rows = n;
        }
    }
}

fn parse_positive<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let raw = env(key)?;
    match raw.trim().parse::<T>() {
        Ok(n) if n > T::default() => Some(n),
        _ => {
            log::warn!("Ignoring {key}={raw:?}: expected a positive integer");
            None
        }
    }
}
