//! HTTP transport seam.
//!
//! [`CatalogClient`](crate::CatalogClient) only needs "GET this path with this
//! query and give me the status and body". [`Transport`] captures exactly that
//! so the paging and caching logic can run against canned responses in tests.

use std::future::Future;
use std::time::Duration;

use bv_core::ApiConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::error::ClientError;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl Response {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for HTTP 200.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Issues authenticated GET requests relative to the catalog base URL.
pub trait Transport {
    /// Returns the absolute URL for `path`, used in logs and errors.
    fn url(&self, path: &str) -> String;

    /// Sends `GET {base}/{path}?{query}`.
    ///
    /// Only failures to complete the exchange are errors; any status code is
    /// returned as a [`Response`].
    fn get(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> impl Future<Output = Result<Response, ClientError>> + Send;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport from API settings.
    ///
    /// The key is sent on every request as `Authorization: key <api_key>`.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        let base_url = config.base_url.trim_end_matches('/').to_owned();
        reqwest::Url::parse(&base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut auth = HeaderValue::from_str(&format!("key {}", key.trim()))
            .map_err(|_| ClientError::InvalidApiKey)?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("brickview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { http, base_url })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, ClientError> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Http { url, source })?;

        Ok(Response { status, body })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory transport with canned responses.

    use std::future::Future;

    use parking_lot::Mutex;
    use rustc_hash::FxHashMap;

    use super::{Response, Transport};
    use crate::error::ClientError;

    /// Responses keyed by `path` or `path?k=v&k=v`; unknown keys return 404.
    #[derive(Debug, Default)]
    pub struct FakeTransport {
        routes: FxHashMap<String, Response>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, key: &str, status: u16, body: impl Into<String>) -> Self {
            self.routes.insert(key.to_owned(), Response::new(status, body));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        pub fn call_count(&self, key: &str) -> usize {
            self.calls.lock().iter().filter(|c| *c == key).count()
        }

        fn key(path: &str, query: &[(&str, String)]) -> String {
            if query.is_empty() {
                return path.to_owned();
            }
            let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{path}?{}", query.join("&"))
        }
    }

    impl Transport for FakeTransport {
        fn url(&self, path: &str) -> String {
            format!("fake://{path}")
        }

        fn get(
            &self,
            path: &str,
            query: &[(&str, String)],
        ) -> impl Future<Output = Result<Response, ClientError>> + Send {
            let key = Self::key(path, query);
            self.calls.lock().push(key.clone());
            let response = self
                .routes
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Response::new(404, r#"{"detail":"Not found."}"#));
            std::future::ready(Ok(response))
        }
    }
}
