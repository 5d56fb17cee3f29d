//! HTTP transport for the Campaign Finance API.
//!
//! [`Transport`] is the seam between query dispatch and the network. The
//! trait abstraction enables:
//!
//! - Easy mocking in unit tests via [`mock::MockTransport`]
//! - HTTP-level testing with a stub server in integration tests
//! - Swapping the backing HTTP stack without touching normalization
//!
//! [`HttpTransport`] is the production implementation: an authenticated
//! GET against the versioned base URL, decoding the JSON envelope every
//! endpoint wraps its items in. Normalization never sees a failure; any
//! error a caller observes originated here and propagates unwrapped.

use async_trait::async_trait;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::Value;

/// Production endpoint serving campaign-finance filings.
pub const DEFAULT_BASE_URL: &str = "https://api.propublica.org/campaign-finance/v1";

/// Errors surfaced by the transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure, a non-JSON body, or an envelope missing `results`.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx status from the API, message taken from the response body.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// JSON envelope every endpoint wraps its results in.
///
/// Only `results` is required; a reply without it fails decoding and
/// surfaces as [`Error::Request`]. The metadata fields vary by endpoint
/// and decode leniently (`cycle` and `offset` arrive as numbers on some
/// endpoints and quoted strings on others).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub base_uri: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub cycle: Option<u16>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub offset: Option<u32>,
    /// Raw per-item payloads, normalized downstream by the record builders.
    pub results: Vec<Value>,
}

/// Authenticated access to the Campaign Finance API.
///
/// Implementations perform one GET per call and return the decoded
/// envelope. They do not retry, cache, or paginate; an offset parameter
/// passes through like any other.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `path` (relative to the API root, without extension) with the
    /// given query parameters.
    ///
    /// # Errors
    /// Returns [`Error`] on network failures, non-2xx statuses, and
    /// undecodable envelopes.
    async fn invoke(&self, path: &str, params: &[(&str, String)]) -> Result<Envelope, Error>;
}

/// Production [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Transport against [`DEFAULT_BASE_URL`] with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Transport against a custom base URL (stub servers, proxies).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Transport with a caller-configured `reqwest::Client`. Timeouts,
    /// TLS settings and proxies belong to that client, not to this crate.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, path: &str, params: &[(&str, String)]) -> Result<Envelope, Error> {
        // Every resource in this API version is addressed with a .json
        // suffix; building the URL here keeps dispatch paths extension-free.
        let url = format!("{}/{}.json", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope = response.json().await?;
        tracing::debug!(
            path,
            status = status.as_u16(),
            results = envelope.results.len(),
            "campaign finance API reply"
        );
        Ok(envelope)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::must_use_candidate)]
pub mod mock {
    //! Mock transport for unit testing without HTTP.

    use super::{Envelope, Error, Transport};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Queue-backed [`Transport`] for tests.
    ///
    /// Push replies with [`push_envelope`](Self::push_envelope) and
    /// [`push_error`](Self::push_error), then assert on the recorded
    /// `(path, params)` call log. An exhausted queue yields an empty
    /// envelope, the shape the API uses for queries with no matches.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        replies: Mutex<VecDeque<Result<Envelope, Error>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful reply.
        pub fn push_envelope(&self, envelope: Envelope) {
            self.replies.lock().unwrap().push_back(Ok(envelope));
        }

        /// Queue a failure.
        pub fn push_error(&self, error: Error) {
            self.replies.lock().unwrap().push_back(Err(error));
        }

        /// Paths and query parameters of every call made so far.
        pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn invoke(&self, path: &str, params: &[(&str, String)]) -> Result<Envelope, Error> {
            self.calls.lock().unwrap().push((
                path.to_owned(),
                params
                    .iter()
                    .map(|(key, value)| ((*key).to_owned(), value.clone()))
                    .collect(),
            ));

            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Envelope::default()))
        }
    }
}
