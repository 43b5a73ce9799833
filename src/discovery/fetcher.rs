//! HTTP fetcher for pages and JavaScript resources.

use crate::types::{FetchResponse, HttpConfig, Method, Result, XtractError};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace};

/// Fetcher issuing GET and HEAD requests with fixed timeouts and user agent.
///
/// Network failures are reported as [`XtractError::Unreachable`]; any status code,
/// including 404 or 500, comes back as a successful [`FetchResponse`].
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    probe_client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        // HEAD probes report redirects as-is
        let probe_client = Client::builder()
            .timeout(Duration::from_secs(config.probe_timeout_secs))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            probe_client,
        })
    }

    /// Perform a request with the given method.
    pub async fn fetch(&self, url: &str, method: Method) -> Result<FetchResponse> {
        let request = match method {
            Method::Get => self.client.get(url),
            Method::Head => self.probe_client.head(url),
        };

        trace!("{:?} {}", method, url);

        let response = request.send().await.map_err(|e| XtractError::Unreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status().as_u16();

        let body = match method {
            Method::Get => Some(response.text().await.map_err(|e| XtractError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?),
            Method::Head => None,
        };

        debug!(
            "{:?} {} -> {} ({} bytes)",
            method,
            url,
            status,
            body.as_ref().map_or(0, String::len)
        );

        Ok(FetchResponse {
            url: url.to_string(),
            status,
            body,
        })
    }

    /// GET with the content timeout.
    pub async fn get(&self, url: &str) -> Result<FetchResponse> {
        self.fetch(url, Method::Get).await
    }

    /// HEAD with the probe timeout.
    pub async fn head(&self, url: &str) -> Result<FetchResponse> {
        self.fetch(url, Method::Head).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/app.js"))
            .and(header("user-agent", crate::config::USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string("console.log(1);"))
            .mount(&server)
            .await;

        let url = format!("{}/app.js", server.uri());
        let response = fetcher().get(&url).await.unwrap();
        assert!(response.is_ok());
        assert_eq!(response.body.as_deref(), Some("console.log(1);"));
    }

    #[tokio::test]
    async fn test_non_success_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.js"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.js", server.uri());
        let response = fetcher().get(&url).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_head_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/old.js"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new.js"))
            .mount(&server)
            .await;

        let url = format!("{}/old.js", server.uri());
        let response = fetcher().head(&url).await.unwrap();
        assert_eq!(response.status, 301);
        assert!(response.body.is_none());
    }

    #[tokio::test]
    async fn test_unreachable() {
        let result = fetcher().get("http://127.0.0.1:1/app.js").await;
        assert!(matches!(result, Err(XtractError::Unreachable { .. })));
    }
}
