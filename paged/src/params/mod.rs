mod common;
pub use self::common::QueryParams;

mod pager;
pub use self::pager::{NavigationUrls, Pager, PaginationParams, SCOPE_KEY};
