//! Reqwest-backed random-user API source.
//!
//! The client owns transport details only: it issues one GET per call, maps
//! connection failures and non-success statuses to [`FetchError`], and hands
//! back the raw body for [`crate::parse_sample`] to decode.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::FetchError;
use crate::query::request_target;

/// Public random-user API host.
pub const DEFAULT_BASE_URL: &str = "https://randomuser.me/";

/// Source of raw random-user response bodies.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Fetches the response body for a query built by [`crate::build_query`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request cannot be completed or the API
    /// answers with a non-success status.
    async fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// HTTP client for one random-user API host.
#[derive(Debug, Clone)]
pub struct RandomUserClient {
    client: Client,
    base_url: Url,
}

impl RandomUserClient {
    /// Builds a client for `base_url` with default transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] when `base_url` is not an
    /// absolute URL.
    ///
    /// # Example
    ///
    /// ```
    /// use random_user_export::RandomUserClient;
    ///
    /// let client = RandomUserClient::new("https://randomuser.me/").expect("valid URL");
    /// assert_eq!(client.base_url().as_str(), "https://randomuser.me/");
    /// assert!(RandomUserClient::new("not a url").is_err());
    /// ```
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(base_url).map_err(|err| FetchError::InvalidEndpoint {
            endpoint: base_url.to_owned(),
            message: err.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url: parsed,
        })
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl UserSource for RandomUserClient {
    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let target = request_target(self.base_url.as_str(), query);
        debug!(target_url = %target, "requesting random users");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    debug!(error = %err, "error response body unreadable");
                    String::new()
                }
            };
            return Err(map_status_error(status, &body));
        }
        response.text().await.map_err(map_transport_error)
    }
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    FetchError::Transport {
        message: error.to_string(),
    }
}

fn map_status_error(status: StatusCode, body: &str) -> FetchError {
    let preview = body_preview(body);
    FetchError::Status {
        status: status.as_u16(),
        body: if preview.is_empty() {
            preview
        } else {
            format!(": {preview}")
        },
    }
}

fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
