//! Query parameter models for the content API endpoints.
//!
//! Each query knows how to turn itself into the list of URL query parameters
//! the API expects. Values are passed through verbatim; the API is the one
//! that decides whether a page size or language code is acceptable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default page size used by every paged endpoint
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Default language filter for content searches
pub const DEFAULT_LANG: &str = "en";

/// Default number of pages walked by a multi-page search
pub const DEFAULT_PAGES: u32 = 100;

/// Ordering of search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    /// Wire value for the `order-by` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(OrderBy::Newest),
            "oldest" => Ok(OrderBy::Oldest),
            "relevance" => Ok(OrderBy::Relevance),
            other => Err(format!("unknown ordering '{}'", other)),
        }
    }
}

/// URL query parameters, in the order they are sent
pub type Params = Vec<(&'static str, String)>;

/// Content search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Keyword to search for. Empty means "latest content", and `q` is omitted.
    pub keyword: String,

    /// Page to fetch (1-based)
    pub page: u32,

    /// Result ordering
    pub order_by: OrderBy,

    /// Results per page
    pub page_size: u32,

    /// ISO language code
    pub lang: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            page: 1,
            order_by: OrderBy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl SearchQuery {
    /// Create a new search query for a keyword
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    /// Query for the latest content without a keyword
    pub fn latest() -> Self {
        Self::default()
    }

    /// Set the page
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the ordering
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = order;
        self
    }

    /// Set results per page
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Set the language code
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Parameters for this query, without the credential
    pub fn params(&self) -> Params {
        let mut params = Vec::with_capacity(5);
        if !self.keyword.is_empty() {
            params.push(("q", self.keyword.clone()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("order-by", self.order_by.as_str().to_string()));
        params.push(("page-size", self.page_size.to_string()));
        params.push(("lang", self.lang.clone()));
        params
    }
}

/// Tag lookup parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagQuery {
    /// Text the tag title must contain
    pub web_title: String,
    pub page: u32,
    pub page_size: u32,
}

impl TagQuery {
    pub fn new(web_title: impl Into<String>) -> Self {
        Self {
            web_title: web_title.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn params(&self) -> Params {
        vec![
            ("web-title", self.web_title.clone()),
            ("page", self.page.to_string()),
            ("page-size", self.page_size.to_string()),
        ]
    }
}

/// Section lookup parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionQuery {
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

impl SectionQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn params(&self) -> Params {
        vec![
            ("q", self.query.clone()),
            ("page", self.page.to_string()),
            ("page-size", self.page_size.to_string()),
        ]
    }
}

/// Edition lookup parameters. The editions endpoint is not paged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionQuery {
    pub query: String,
}

impl EditionQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn params(&self) -> Params {
        vec![("q", self.query.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_defaults() {
        let query = SearchQuery::new("sport");
        assert_eq!(query.page, 1);
        assert_eq!(query.order_by, OrderBy::Newest);
        assert_eq!(query.page_size, 50);
        assert_eq!(query.lang, "en");
    }

    #[test]
    fn test_search_query_params_order() {
        let query = SearchQuery::new("film")
            .page(3)
            .order_by(OrderBy::Relevance)
            .page_size(10)
            .lang("fr");

        let names: Vec<&str> = query.params().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, vec!["q", "page", "order-by", "page-size", "lang"]);

        let params = query.params();
        assert_eq!(params[0].1, "film");
        assert_eq!(params[1].1, "3");
        assert_eq!(params[2].1, "relevance");
        assert_eq!(params[3].1, "10");
        assert_eq!(params[4].1, "fr");
    }

    #[test]
    fn test_latest_query_omits_keyword() {
        let params = SearchQuery::latest().params();
        assert!(params.iter().all(|(k, _)| *k != "q"));
    }

    #[test]
    fn test_order_by_from_str() {
        assert_eq!("Oldest".parse::<OrderBy>().unwrap(), OrderBy::Oldest);
        assert_eq!(" relevance ".parse::<OrderBy>().unwrap(), OrderBy::Relevance);
        assert!("sideways".parse::<OrderBy>().is_err());
    }

    #[test]
    fn test_tag_query_uses_web_title() {
        let params = TagQuery::new("liverpool").page_size(5).params();
        assert_eq!(params[0], ("web-title", "liverpool".to_string()));
        assert_eq!(params[2], ("page-size", "5".to_string()));
    }

    #[test]
    fn test_edition_query_is_unpaged() {
        let params = EditionQuery::new("uk").params();
        assert_eq!(params, vec![("q", "uk".to_string())]);
    }
}
