//! Uniform JSON response envelopes and limit/offset pagination links.
//!
//! Handlers pull a [`Pager`] out of the request query, do their own work,
//! then wrap the result with [`ResponseWrapper::success`],
//! [`ResponseWrapper::collection`] or [`ResponseWrapper::error`].

mod config;
mod errors;
mod params;
pub mod types;
pub use self::config::{PagerConfig, DEFAULT_LIMIT};
pub use self::errors::Error;
pub use self::params::{NavigationUrls, Pager, PaginationParams, QueryParams, SCOPE_KEY};
pub use self::types::{ResponseWrapper, Status};
