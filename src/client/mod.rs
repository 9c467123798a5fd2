//! Client for the Guardian content API.
//!
//! [`GuardianClient`] wraps one HTTP client and one API key. Every operation
//! is a single GET (or, for [`GuardianClient::search_pages`], a sequence of
//! GETs issued one after another) whose JSON body is flattened into a
//! [`ResultTable`]. There is no retry and no caching: a failed request fails
//! the call.
//!
//! ```rust,no_run
//! use guardian_content::client::GuardianClient;
//! use guardian_content::models::SearchQuery;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GuardianClient::new("my-api-key")?;
//! let table = client.search(&SearchQuery::new("sport")).await?;
//! for row in &table {
//!     println!("{} ({})", row.title, row.section);
//! }
//! # Ok(())
//! # }
//! ```

mod endpoint;
mod wire;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ApiConfig, DEFAULT_BASE_URL};
use crate::models::{
    ContentRecord, EditionQuery, EditionRecord, Params, PillarRecord, ResultTable, SearchQuery,
    SectionQuery, SectionRecord, TagQuery, TagRecord,
};
use crate::utils::HttpClient;
use endpoint::{Editions, Endpoint, LinkSearch, PillarSearch, Search, Sections, Tags};
use wire::{ContentPayload, Envelope, ResultsPayload};

/// Dates in multi-page searches keep only `YYYY-MM`
pub const MONTH_PREFIX_LEN: usize = 7;

/// Client for the content API endpoints
#[derive(Debug, Clone)]
pub struct GuardianClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
}

impl GuardianClient {
    /// Create a client for the public API with the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self {
            http: HttpClient::new()?,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a client from configuration. Fails if no key is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let api_key = config
            .key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        Self {
            http: HttpClient::from_config(config)?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
        .with_base_url(&config.base_url)
    }

    /// Point the client at another base URL (a proxy or a test server)
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        Url::parse(base_url)?;
        self.base_url = base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search content, one row per result: title, section, date, type.
    pub async fn search(&self, query: &SearchQuery) -> Result<ResultTable<ContentRecord>, ClientError> {
        self.fetch::<Search>(query).await
    }

    /// Search content including each item's pillar.
    pub async fn search_with_pillar(
        &self,
        query: &SearchQuery,
    ) -> Result<ResultTable<PillarRecord>, ClientError> {
        self.fetch::<PillarSearch>(query).await
    }

    /// Search across pages `1..pages` and accumulate the rows into one table.
    ///
    /// The upper bound is exclusive, so `pages` = N issues N - 1 requests and
    /// `pages` <= 1 issues none. The `page` of `query` is ignored. Dates are
    /// cut to `YYYY-MM`. The first failing page fails the whole call.
    pub async fn search_pages(
        &self,
        query: &SearchQuery,
        pages: u32,
    ) -> Result<ResultTable<ContentRecord>, ClientError> {
        let mut table = ResultTable::default();

        for page in 1..pages {
            let page_query = query.clone().page(page);
            let rows = self.fetch::<Search>(&page_query).await?;
            info!(page, rows = rows.len(), "fetched search page");
            table.append(rows.map_rows(|r| r.truncate_date(MONTH_PREFIX_LEN)));
        }

        info!(rows = table.len(), "multi-page search complete");
        Ok(table)
    }

    /// Look up tags whose title contains the query text: tag, type.
    pub async fn tags(&self, query: &TagQuery) -> Result<ResultTable<TagRecord>, ClientError> {
        self.fetch::<Tags>(query).await
    }

    /// Look up sections matching the query text.
    pub async fn sections(
        &self,
        query: &SectionQuery,
    ) -> Result<ResultTable<SectionRecord>, ClientError> {
        self.fetch::<Sections>(query).await
    }

    /// Look up editions matching the query text.
    pub async fn editions(
        &self,
        query: &EditionQuery,
    ) -> Result<ResultTable<EditionRecord>, ClientError> {
        self.fetch::<Editions>(query).await
    }

    /// API URL of the first search result.
    ///
    /// Returns [`ClientError::NoResults`] when the search matches nothing.
    pub async fn item_url(&self, query: &SearchQuery) -> Result<String, ClientError> {
        let links = self.fetch::<LinkSearch>(query).await?;
        links
            .into_iter()
            .next()
            .map(|link| link.api_url)
            .ok_or_else(|| ClientError::NoResults(query.keyword.clone()))
    }

    /// Fetch a single item by its API URL.
    ///
    /// The URL is requested directly and also sent as the `id` parameter.
    pub async fn item(&self, api_url: &str) -> Result<ContentRecord, ClientError> {
        let url = Url::parse(api_url)
            .map_err(|e| ClientError::InvalidRequest(format!("item URL {:?}: {}", api_url, e)))?;

        let params = vec![("id", api_url.to_string())];
        let envelope: Envelope<ContentPayload> = self.get_json(url, &params).await?;
        Ok(endpoint::content_record(envelope.response.content))
    }

    /// Title of a single item.
    pub async fn item_title(&self, api_url: &str) -> Result<String, ClientError> {
        Ok(self.item(api_url).await?.title)
    }

    async fn fetch<E: Endpoint>(
        &self,
        query: &E::Query,
    ) -> Result<ResultTable<E::Record>, ClientError> {
        let url = self.endpoint_url(E::PATH)?;
        let envelope: Envelope<ResultsPayload<E::Item>> =
            self.get_json(url, &E::params(query)).await?;

        let payload = envelope.response;
        let page_info = payload.page_info();
        let table: ResultTable<E::Record> = payload.results.into_iter().map(E::project).collect();

        debug!(endpoint = E::PATH, rows = table.len(), "parsed results");
        Ok(match page_info {
            Some(info) => table.with_page_info(info),
            None => table,
        })
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &Params,
    ) -> Result<T, ClientError> {
        let path = url.path().to_string();
        debug!(path = %path, params = ?param_names(params), "GET");

        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        query.push(("api-key", self.api_key.as_str()));
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .http
            .client()
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ClientError::Network(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(format!("reading {} body failed: {}", path, e)))?;

        if !status.is_success() {
            let message = wire::error_message(&body);
            warn!(path = %path, status = status.as_u16(), %message, "API returned an error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Error bodies lack the payload fields, so they only show up as a
        // failed typed parse
        serde_json::from_str(&body).map_err(|e| {
            if wire::is_error_status(&body) {
                let message = wire::error_message(&body);
                warn!(path = %path, %message, "API reported an error status");
                ClientError::Api {
                    status: status.as_u16(),
                    message,
                }
            } else {
                ClientError::MalformedResponse(format!("{}: {}", path, e))
            }
        })
    }
}

/// Parameter names only, so the key never reaches the logs
fn param_names(params: &Params) -> Vec<&'static str> {
    params.iter().map(|(k, _)| *k).collect()
}

/// Errors that can occur when talking to the API
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with an error status
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The body was not JSON or lacked an expected field
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A lookup that needs at least one result found none
    #[error("No results for query {0:?}")]
    NoResults(String),

    /// A table column was selected by a name it does not have
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Invalid request parameters or URL
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No credential available
    #[error("No API key configured (set GUARDIAN_API_KEY or [api] key)")]
    MissingApiKey,

    /// IO error (writing chart output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(format!("JSON: {}", err))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidRequest(format!("URL: {}", err))
    }
}
