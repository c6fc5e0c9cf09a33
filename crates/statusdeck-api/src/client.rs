// REST API HTTP client
//
// Wraps `reqwest::Client` with base-URL path construction, status
// checking and JSON decoding. Endpoint methods live in `servers.rs` and
// `statuses.rs` as inherent impls so this module stays focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Where the backend lives. Fixed; only tests point elsewhere.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Longest body excerpt carried in an [`Error::Api`] message.
const ERROR_PREVIEW_LEN: usize = 200;

/// Raw HTTP client for the server status checker API.
///
/// Every method maps to exactly one HTTP request. Nothing is cached and
/// nothing is retried; callers decide what to re-fetch afterwards.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client for the fixed local backend.
    pub fn localhost(transport: &TransportConfig) -> Result<Self, Error> {
        Self::new(Url::parse(DEFAULT_BASE_URL)?, transport)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Build `{base}/{path}?{key}={value}` with the value percent-encoded.
    pub(crate) fn api_url_with_query(
        &self,
        path: &str,
        key: &str,
        value: &str,
    ) -> Result<Url, Error> {
        let mut url = self.api_url(path)?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        parse_json(resp).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        parse_json(resp).await
    }

    /// Send a bodiless POST request, expecting no content back.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).send().await?;
        expect_success(resp).await
    }

    /// Send a PUT request with a JSON body and decode the JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        parse_json(resp).await
    }

    /// Send a DELETE request, expecting no content back.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        expect_success(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Turn a non-2xx response into `Error::Api`, keeping a body excerpt.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = preview(body.trim());
    Err(Error::Api {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message.to_owned()
        },
    })
}

async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let resp = check_status(resp).await?;
    let body = resp.text().await?;
    trace!(len = body.len(), "response body received");

    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

async fn expect_success(resp: reqwest::Response) -> Result<(), Error> {
    let resp = check_status(resp).await?;
    // Drain so the connection can be reused; the content is irrelevant.
    let _ = resp.bytes().await?;
    Ok(())
}

/// First `ERROR_PREVIEW_LEN` bytes of `body`, cut on a char boundary.
fn preview(body: &str) -> &str {
    if body.len() <= ERROR_PREVIEW_LEN {
        return body;
    }
    let mut end = ERROR_PREVIEW_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn api_url_joins_without_double_slash() {
        let c = client("http://localhost:8080/api/");
        assert_eq!(
            c.api_url("/servers").unwrap().as_str(),
            "http://localhost:8080/api/servers"
        );
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let c = client(DEFAULT_BASE_URL);
        let url = c
            .api_url_with_query("server-status/check", "url", "http://x/?a=1&b=2")
            .unwrap();
        assert_eq!(url.path(), "/api/server-status/check");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, "http://x/?a=1&b=2");
        assert!(!url.as_str().contains("&b=2"));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let body = "é".repeat(150);
        let cut = preview(&body);
        assert!(cut.len() <= ERROR_PREVIEW_LEN);
        assert!(body.starts_with(cut));
    }
}
