//! Liveness probing - HEAD checks that keep dead links out of the frontier.

use crate::discovery::HttpFetcher;
use crate::parser::is_valid_url;
use crate::types::{Result, XtractError};
use futures::stream::{self, StreamExt};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Prober confirming that candidate URLs exist before they are tracked.
#[derive(Clone)]
pub struct LivenessProber {
    fetcher: HttpFetcher,
    concurrency: usize,
}

impl LivenessProber {
    /// Create a new prober running at most `concurrency` probes at once.
    pub fn new(fetcher: HttpFetcher, concurrency: usize) -> Self {
        Self {
            fetcher,
            concurrency: concurrency.max(1),
        }
    }

    /// Probe a URL: it must be a valid absolute URL answering HEAD with 200.
    pub async fn probe(&self, url: &str) -> Result<()> {
        if !is_valid_url(url) {
            return Err(XtractError::InvalidUrl(url.to_string()));
        }

        let response = self.fetcher.head(url).await?;
        if !response.is_ok() {
            return Err(XtractError::NonSuccessStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        Ok(())
    }

    /// Probe a URL, logging why it was dropped if it is not live.
    pub async fn is_live(&self, url: &str) -> bool {
        match self.probe(url).await {
            Ok(()) => {
                debug!("Live: {}", url);
                true
            }
            Err(XtractError::InvalidUrl(_)) => {
                info!("Invalid URL: {}", url);
                false
            }
            Err(e) => {
                info!("Filtered out {} ({})", url, e.filter_reason());
                false
            }
        }
    }

    /// Keep only the live candidates.
    pub async fn filter_live<I>(&self, candidates: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = String>,
    {
        stream::iter(candidates)
            .map(|url| async move {
                let live = self.is_live(&url).await;
                (url, live)
            })
            .buffered(self.concurrency)
            .filter_map(|(url, live)| async move { live.then_some(url) })
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober() -> LivenessProber {
        LivenessProber::new(HttpFetcher::new(HttpConfig::default()).unwrap(), 4)
    }

    #[tokio::test]
    async fn test_probe_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/live.js"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/dead.js"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let prober = prober();
        assert!(prober.probe(&format!("{}/live.js", server.uri())).await.is_ok());
        assert!(matches!(
            prober.probe(&format!("{}/dead.js", server.uri())).await,
            Err(XtractError::NonSuccessStatus { status: 404, .. })
        ));
        assert!(matches!(
            prober.probe("not-a-url").await,
            Err(XtractError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_filter_live() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/a.js"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/b.json"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/gone.js"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let candidates = vec![
            format!("{}/a.js", server.uri()),
            format!("{}/gone.js", server.uri()),
            format!("{}/b.json", server.uri()),
            "http://127.0.0.1:1/unreachable.js".to_string(),
        ];

        let live = prober().filter_live(candidates).await;
        let expected: BTreeSet<String> = [
            format!("{}/a.js", server.uri()),
            format!("{}/b.json", server.uri()),
        ]
        .into_iter()
        .collect();
        assert_eq!(live, expected);
    }
}
