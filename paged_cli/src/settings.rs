//! Pager configuration for the CLI: file, then environment, then flags.

use std::path::Path;

use anyhow::{Context, Result};
use paged::PagerConfig;

pub const DEFAULT_LIMIT_VAR: &str = "PAGED_DEFAULT_LIMIT";
pub const MAX_LIMIT_VAR: &str = "PAGED_MAX_LIMIT";

/// Values passed on the command line; these win over everything else.
#[derive(Debug, Default)]
pub struct Overrides {
    pub default_limit: Option<u64>,
    pub max_limit: Option<u64>,
}

pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<PagerConfig> {
    let base = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            PagerConfig::from_toml_str(&content)
                .with_context(|| format!("load config {}", path.display()))?
        }
        None => PagerConfig::default(),
    };
    let config = apply_env(base, |name| std::env::var(name).ok())?;
    let config = apply_overrides(config, overrides);
    tracing::debug!(
        default_limit = config.default_limit,
        max_limit = config.max_limit,
        "pager configuration"
    );
    Ok(config.validate()?)
}

fn apply_env<F>(mut config: PagerConfig, lookup: F) -> Result<PagerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(limit) = env_u64(&lookup, DEFAULT_LIMIT_VAR)? {
        config.default_limit = limit;
    }
    if let Some(max) = env_u64(&lookup, MAX_LIMIT_VAR)? {
        config.max_limit = Some(max);
    }
    Ok(config)
}

fn apply_overrides(mut config: PagerConfig, overrides: &Overrides) -> PagerConfig {
    if let Some(limit) = overrides.default_limit {
        config.default_limit = limit;
    }
    if let Some(max) = overrides.max_limit {
        config.max_limit = Some(max);
    }
    config
}

fn env_u64<F>(lookup: &F, name: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", name, raw)),
        _ => Ok(None),
    }
}
