//! CLI subcommand implementations.

pub mod envelope;
pub mod links;

use anyhow::{bail, Result};
use paged::{Pager, PagerConfig, QueryParams};
use url::Url;

/// How request URLs given on the command line are turned into a [`Pager`].
pub struct Extraction {
    pub config: PagerConfig,
    pub strict: bool,
}

impl Extraction {
    /// Accepts an absolute URL or a bare `/path?query`.
    pub fn pager(&self, request: &str) -> Result<Pager> {
        let pager = match Url::parse(request) {
            Ok(url) if self.strict => Pager::try_from_url_with(&url, &self.config)?,
            Ok(url) => Pager::from_url_with(&url, &self.config),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let (base, query) = split_relative(request);
                if self.strict {
                    Pager::try_extract_with(&query, base, &self.config)?
                } else {
                    Pager::extract_with(&query, base, &self.config)
                }
            }
            Err(e) => bail!("invalid request URL '{}': {}", request, e),
        };
        Ok(pager)
    }
}

/// Splits `/path?query#fragment` into its path and query.
fn split_relative(request: &str) -> (&str, QueryParams) {
    let request = request.split('#').next().unwrap_or_default();
    let (path, query) = request.split_once('?').unwrap_or((request, ""));
    (path, QueryParams::parse(query))
}
