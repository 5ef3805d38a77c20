//! Pager configuration: default page size and an optional cap.

use serde::Deserialize;

use crate::Error;

/// Page size used when a request carries no usable `limit`.
pub const DEFAULT_LIMIT: u64 = 20;

/// Tunables for [`Pager`](crate::Pager) extraction.
///
/// Deserializes from TOML (or any serde format) with every field optional:
///
/// ```toml
/// default_limit = 50
/// max_limit = 200
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagerConfig {
    /// Limit substituted for a missing, non-positive or unparsable `limit`.
    pub default_limit: u64,
    /// Upper bound for `limit`. `None` leaves requested limits uncapped.
    pub max_limit: Option<u64>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

impl PagerConfig {
    pub fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }

    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = Some(max_limit);
        self
    }

    /// Default and cap as the pager applies them. A zero default falls back
    /// to [`DEFAULT_LIMIT`], a zero cap means no cap, and the default never
    /// exceeds the cap.
    pub(crate) fn effective_limits(&self) -> (u64, Option<u64>) {
        let max = self.max_limit.filter(|max| *max > 0);
        let default = match self.default_limit {
            0 => DEFAULT_LIMIT,
            limit => limit,
        };
        match max {
            Some(max) => (default.min(max), Some(max)),
            None => (default, None),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: PagerConfig =
            toml::from_str(content).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()
    }

    /// Rejects a zero default limit, a zero cap, or a default above the cap.
    pub fn validate(self) -> Result<Self, Error> {
        if self.default_limit == 0 {
            return Err(Error::InvalidConfig(
                "default_limit must be positive".to_string(),
            ));
        }
        if let Some(max) = self.max_limit {
            if max == 0 {
                return Err(Error::InvalidConfig("max_limit must be positive".to_string()));
            }
            if self.default_limit > max {
                return Err(Error::InvalidConfig(format!(
                    "default_limit {} exceeds max_limit {}",
                    self.default_limit, max
                )));
            }
        }
        Ok(self)
    }
}
