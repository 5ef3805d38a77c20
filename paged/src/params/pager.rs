use url::{form_urlencoded, Url};

use crate::{Error, PagerConfig};

use super::common::QueryParams;

pub const LIMIT_KEY: &str = "limit";
pub const OFFSET_KEY: &str = "offset";
pub const SCOPE_KEY: &str = "scope";

const PAGING_KEYS: [&str; 2] = [LIMIT_KEY, OFFSET_KEY];

/// Limit/offset window requested by a client, plus everything else it sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page size. Always positive.
    pub limit: u64,
    /// Number of items skipped before this page.
    pub offset: u64,
    /// Every other query parameter, `scope` included, echoed into
    /// navigation URLs with all of its values.
    pub extra_filters: QueryParams,
}

impl PaginationParams {
    /// Opaque caller-defined filter: the first `scope` value, or empty.
    pub fn scope(&self) -> &str {
        self.extra_filters.first(SCOPE_KEY).unwrap_or_default()
    }

    /// Offset of the preceding page, if one starts at or after zero.
    pub fn previous_offset(&self) -> Option<u64> {
        self.offset.checked_sub(self.limit)
    }

    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// Encoded query string for the page starting at `offset`.
    ///
    /// Order is `limit`, `offset`, then the extra filters in the order they
    /// first appeared.
    pub fn query_string(&self, offset: u64) -> String {
        let mut pairs = form_urlencoded::Serializer::new(String::new());
        self.append_pairs(&mut pairs, offset);
        pairs.finish()
    }

    /// URL for the page starting at `offset`. Any query or fragment already
    /// on `base_path` is dropped.
    pub fn page_url(&self, base_path: &str, offset: u64) -> String {
        format!("{}?{}", strip_query(base_path), self.query_string(offset))
    }

    /// Replaces the query of `url` with these parameters at `offset`.
    pub fn add_to_url(&self, url: &Url, offset: u64) -> Url {
        let mut url = url.clone();
        url.set_fragment(None);
        url.set_query(None);
        self.append_pairs(&mut url.query_pairs_mut(), offset);
        url
    }

    /// Previous/next links relative to `base_path`.
    pub fn navigation(&self, base_path: &str) -> NavigationUrls {
        NavigationUrls {
            previous: self
                .previous_offset()
                .map(|offset| self.page_url(base_path, offset)),
            next: self.page_url(base_path, self.next_offset()),
        }
    }

    fn append_pairs<T: form_urlencoded::Target>(
        &self,
        pairs: &mut form_urlencoded::Serializer<'_, T>,
        offset: u64,
    ) {
        pairs.append_pair(LIMIT_KEY, &self.limit.to_string());
        pairs.append_pair(OFFSET_KEY, &offset.to_string());
        self.extra_filters.append_to(pairs);
    }
}

/// Links to the neighbouring pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationUrls {
    /// `None` when stepping back would go below offset zero.
    pub previous: Option<String>,
    /// Always present; the total result size is unknown here.
    pub next: String,
}

/// Pagination parameters of one request together with their navigation
/// links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    params: PaginationParams,
    links: NavigationUrls,
}

impl Pager {
    /// Extracts pagination from `query` using the default configuration.
    /// Malformed values fall back to defaults; this never fails.
    pub fn extract(query: &QueryParams, base_path: &str) -> Self {
        Self::extract_with(query, base_path, &PagerConfig::default())
    }

    pub fn extract_with(query: &QueryParams, base_path: &str, config: &PagerConfig) -> Self {
        let (default_limit, max_limit) = config.effective_limits();
        let limit = match read_number(query, LIMIT_KEY) {
            Some(Ok(limit)) if limit > 0 => limit,
            Some(Ok(_)) | Some(Err(_)) => {
                tracing::debug!(
                    value = query.first(LIMIT_KEY),
                    default = default_limit,
                    "ignoring invalid limit"
                );
                default_limit
            }
            None => default_limit,
        };
        let limit = match max_limit {
            Some(max) if limit > max => {
                tracing::debug!(limit, max, "clamping limit");
                max
            }
            _ => limit,
        };

        let offset = match read_number(query, OFFSET_KEY) {
            Some(Ok(offset)) => offset,
            Some(Err(raw)) => {
                tracing::debug!(value = raw.as_str(), "ignoring invalid offset");
                0
            }
            None => 0,
        };

        Self::assemble(query, base_path, limit, offset)
    }

    /// Like [`Pager::extract`], but rejects malformed `limit`/`offset`
    /// values instead of defaulting them.
    pub fn try_extract(query: &QueryParams, base_path: &str) -> Result<Self, Error> {
        Self::try_extract_with(query, base_path, &PagerConfig::default())
    }

    pub fn try_extract_with(
        query: &QueryParams,
        base_path: &str,
        config: &PagerConfig,
    ) -> Result<Self, Error> {
        let (default_limit, max_limit) = config.effective_limits();
        let limit = match read_number(query, LIMIT_KEY) {
            Some(Ok(limit)) if limit > 0 => limit,
            Some(Ok(limit)) => {
                return Err(Error::InvalidLimit {
                    value: limit.to_string(),
                    reason: "must be a positive integer".to_string(),
                })
            }
            Some(Err(value)) => {
                return Err(Error::InvalidLimit {
                    value,
                    reason: "must be a positive integer".to_string(),
                })
            }
            None => default_limit,
        };
        if let Some(max) = max_limit {
            if limit > max {
                return Err(Error::InvalidLimit {
                    value: limit.to_string(),
                    reason: format!("exceeds maximum of {}", max),
                });
            }
        }

        let offset = match read_number(query, OFFSET_KEY) {
            Some(Ok(offset)) => offset,
            Some(Err(value)) => return Err(Error::InvalidOffset { value }),
            None => 0,
        };

        Ok(Self::assemble(query, base_path, limit, offset))
    }

    /// Extracts pagination from a full request URL. Links keep the URL's
    /// scheme, host and path.
    pub fn from_url(url: &Url) -> Self {
        Self::from_url_with(url, &PagerConfig::default())
    }

    pub fn from_url_with(url: &Url, config: &PagerConfig) -> Self {
        Self::extract_with(&QueryParams::from_url(url), &url_base(url), config)
    }

    /// Strict counterpart of [`Pager::from_url_with`].
    pub fn try_from_url_with(url: &Url, config: &PagerConfig) -> Result<Self, Error> {
        Self::try_extract_with(&QueryParams::from_url(url), &url_base(url), config)
    }

    fn assemble(query: &QueryParams, base_path: &str, limit: u64, offset: u64) -> Self {
        let params = PaginationParams {
            limit,
            offset,
            extra_filters: query.without(&PAGING_KEYS),
        };
        let links = params.navigation(base_path);
        Self { params, links }
    }

    pub fn params(&self) -> &PaginationParams {
        &self.params
    }

    pub fn limit(&self) -> u64 {
        self.params.limit
    }

    pub fn offset(&self) -> u64 {
        self.params.offset
    }

    pub fn scope(&self) -> &str {
        self.params.scope()
    }

    pub fn extra_filters(&self) -> &QueryParams {
        &self.params.extra_filters
    }

    pub fn links(&self) -> &NavigationUrls {
        &self.links
    }

    pub fn previous_url(&self) -> Option<&str> {
        self.links.previous.as_deref()
    }

    pub fn next_url(&self) -> &str {
        &self.links.next
    }

    pub fn into_parts(self) -> (PaginationParams, NavigationUrls) {
        (self.params, self.links)
    }
}

/// First value of `key` as an unsigned integer. Absent and empty values are
/// `None`; anything unparsable comes back as the raw string.
fn read_number(query: &QueryParams, key: &str) -> Option<Result<u64, String>> {
    let raw = query.first(key).filter(|raw| !raw.is_empty())?;
    Some(raw.parse::<u64>().map_err(|_| raw.to_string()))
}

/// Scheme, host and path of `url`, without query or fragment.
fn url_base(url: &Url) -> String {
    let mut base = url.clone();
    base.set_fragment(None);
    base.set_query(None);
    base.into()
}

fn strip_query(base_path: &str) -> &str {
    match base_path.find(|c: char| c == '?' || c == '#') {
        Some(idx) => &base_path[..idx],
        None => base_path,
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn extract(query: &str, base: &str) -> Pager {
        Pager::extract(&QueryParams::parse(query), base)
    }

    #[test]
    fn test_navigation_urls() {
        let pager = extract("limit=2&offset=1&scope=fluffy&a=1&b=2", "/");
        insta::assert_snapshot!(pager.next_url(), @"/?limit=2&offset=3&scope=fluffy&a=1&b=2");

        let pager = extract("", "/items");
        insta::assert_snapshot!(pager.next_url(), @"/items?limit=20&offset=20");

        let pager = extract("offset=40&limit=10&tag=b&tag=a", "/items");
        insta::assert_snapshot!(
            pager.previous_url().unwrap_or_default(),
            @"/items?limit=10&offset=30&tag=b&tag=a"
        );

        let pager = extract(
            "q=two words&path=/x",
            "https://api.example.com/v1/things?stale=1#top",
        );
        insta::assert_snapshot!(
            pager.next_url(),
            @"https://api.example.com/v1/things?limit=20&offset=20&q=two+words&path=%2Fx"
        );
    }

    #[test]
    fn valid_values_pass_through() {
        let pager = extract("limit=7&offset=14", "/");
        assert_eq!(pager.limit(), 7);
        assert_eq!(pager.offset(), 14);
        assert_eq!(pager.scope(), "");
        assert!(pager.extra_filters().is_empty());
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        for query in ["limit=0", "limit=-5", "limit=abc", "limit=", "limit=2.5"] {
            assert_eq!(extract(query, "/").limit(), 20, "query {query}");
        }
        for query in ["offset=-1", "offset=x", "offset=", "offset=99999999999999999999"] {
            assert_eq!(extract(query, "/").offset(), 0, "query {query}");
        }
    }

    #[test]
    fn previous_boundary() {
        assert_eq!(extract("limit=10&offset=9", "/").previous_url(), None);
        assert_eq!(
            extract("limit=10&offset=10", "/").previous_url(),
            Some("/?limit=10&offset=0")
        );
    }

    #[test]
    fn next_offset_saturates() {
        let pager = extract(&format!("limit=10&offset={}", u64::MAX - 1), "/");
        assert_eq!(
            pager.next_url(),
            format!("/?limit=10&offset={}", u64::MAX)
        );
    }

    #[test]
    fn duplicate_reserved_keys_take_first_value() {
        let pager = extract("limit=5&limit=50&offset=10&offset=0&scope=a&scope=b", "/");
        assert_eq!(pager.limit(), 5);
        assert_eq!(pager.offset(), 10);
        assert_eq!(pager.scope(), "a");
        assert_eq!(pager.next_url(), "/?limit=5&offset=15&scope=a&scope=b");
    }

    #[test]
    fn empty_scope_is_echoed() {
        let pager = extract("scope=&a=1", "/");
        assert_eq!(pager.scope(), "");
        assert_eq!(pager.next_url(), "/?limit=20&offset=20&scope=&a=1");
    }

    #[test]
    fn scope_keeps_its_position_among_filters() {
        let pager = extract("a=1&scope=fluffy&b=2&offset=4&limit=2", "/");
        assert_eq!(pager.scope(), "fluffy");
        assert_eq!(
            pager.previous_url(),
            Some("/?limit=2&offset=2&a=1&scope=fluffy&b=2")
        );
    }

    #[test]
    fn zero_default_limit_falls_back() {
        let config = PagerConfig::default().with_default_limit(0);
        let pager = Pager::extract_with(&QueryParams::parse("offset=10"), "/", &config);
        assert_eq!(pager.limit(), 20);
        assert_eq!(pager.previous_url(), None);
        assert_eq!(pager.next_url(), "/?limit=20&offset=30");
    }

    #[test]
    fn zero_max_limit_is_no_cap() {
        let config = PagerConfig::default().with_max_limit(0);
        let pager = Pager::extract_with(&QueryParams::parse("limit=5&offset=10"), "/", &config);
        assert_eq!(pager.limit(), 5);
        assert_eq!(pager.next_url(), "/?limit=5&offset=15");

        let pager =
            Pager::try_extract_with(&QueryParams::parse("limit=5"), "/", &config).unwrap();
        assert_eq!(pager.limit(), 5);
    }

    #[test]
    fn default_limit_above_max_is_clamped_in_strict_mode() {
        let config = PagerConfig::default().with_default_limit(50).with_max_limit(10);
        let pager = Pager::try_extract_with(&QueryParams::new(), "/", &config).unwrap();
        assert_eq!(pager.limit(), 10);
    }

    #[test]
    fn strict_from_url() {
        let url = Url::parse("https://example.com/items?limit=x").unwrap();
        assert!(Pager::try_from_url_with(&url, &PagerConfig::default()).is_err());

        let url = Url::parse("https://example.com/items?limit=3&scope=s").unwrap();
        let pager = Pager::try_from_url_with(&url, &PagerConfig::default()).unwrap();
        assert_eq!(pager.next_url(), "https://example.com/items?limit=3&offset=3&scope=s");
    }

    #[test]
    fn max_limit_clamps() {
        let config = PagerConfig::default().with_max_limit(100);
        let pager = Pager::extract_with(&QueryParams::parse("limit=500"), "/", &config);
        assert_eq!(pager.limit(), 100);
    }

    #[test]
    fn custom_default_limit() {
        let config = PagerConfig::default().with_default_limit(50);
        let pager = Pager::extract_with(&QueryParams::new(), "/p", &config);
        assert_eq!(pager.next_url(), "/p?limit=50&offset=50");
    }

    #[test]
    fn strict_rejects_malformed() {
        let err = Pager::try_extract(&QueryParams::parse("limit=abc"), "/").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidLimit {
                value: "abc".to_string(),
                reason: "must be a positive integer".to_string(),
            }
        );

        let err = Pager::try_extract(&QueryParams::parse("limit=0"), "/").unwrap_err();
        assert!(matches!(err, Error::InvalidLimit { .. }));

        let err = Pager::try_extract(&QueryParams::parse("offset=-3"), "/").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidOffset {
                value: "-3".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid offset '-3': must be a non-negative integer"
        );
    }

    #[test]
    fn strict_rejects_above_max() {
        let config = PagerConfig::default().with_max_limit(100);
        let err =
            Pager::try_extract_with(&QueryParams::parse("limit=101"), "/", &config).unwrap_err();
        assert_eq!(err.to_string(), "invalid limit '101': exceeds maximum of 100");
    }

    #[test]
    fn strict_accepts_what_lenient_accepts() {
        let query = QueryParams::parse("limit=3&offset=6&scope=s&x=1");
        assert_eq!(
            Pager::try_extract(&query, "/r").unwrap(),
            Pager::extract(&query, "/r")
        );
    }

    #[test]
    fn from_url_keeps_origin() {
        let url = Url::parse("http://localhost:8080/items?limit=5&offset=5&sort=name#frag").unwrap();
        let pager = Pager::from_url(&url);
        assert_eq!(
            pager.previous_url(),
            Some("http://localhost:8080/items?limit=5&offset=0&sort=name")
        );
        assert_eq!(
            pager.next_url(),
            "http://localhost:8080/items?limit=5&offset=10&sort=name"
        );
    }

    #[test]
    fn add_to_url_replaces_query() {
        let pager = extract("limit=4&offset=8&scope=mine", "/");
        let url = Url::parse("https://example.com/list?old=1").unwrap();
        assert_eq!(
            pager.params().add_to_url(&url, 12).as_str(),
            "https://example.com/list?limit=4&offset=12&scope=mine"
        );
    }
}
