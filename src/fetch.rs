//! Remote config fetching — HTTP GET the browserslist config and extract
//! the quoted query fragments from its body.
//!
//! The fragments are whatever appears between double quotes, in order of
//! appearance, duplicates included. Whether a fragment is a meaningful
//! browserslist query is the resolver's problem, not ours.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

/// HTTP client for the config fetch.
#[derive(Clone)]
pub struct ConfigFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

fn quoted_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""([^"]+)""#).expect("quoted pattern is valid"))
}

/// Extract every quoted substring from `body`, in order, duplicates kept.
pub fn extract_queries(body: &str) -> Vec<String> {
    quoted_pattern()
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

impl ConfigFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("browsershelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client, timeout }
    }

    /// Fetch the remote config and return its query fragments.
    ///
    /// An erroring request or an empty body is a failure; the caller decides
    /// whether a cached value papers over it.
    pub async fn fetch(&self, url: &str) -> Result<Vec<String>> {
        let body = self.get_body(url).await?;
        if body.is_empty() {
            bail!("config response from {url} has an empty body");
        }

        let queries = extract_queries(&body);
        tracing::debug!("extracted {} query fragments from {url}", queries.len());
        Ok(queries)
    }

    /// Single GET with bounded retry on 5xx.
    async fn get_body(&self, url: &str) -> Result<String> {
        let mut retries = 0u32;
        let max_retries = 2;

        loop {
            let resp = self
                .client
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .with_context(|| format!("config request to {url} failed"));

            match resp {
                Ok(r) => {
                    let status = r.status();
                    if status.is_server_error() && retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tracing::debug!("config fetch got {status}, retrying in {delay:?}");
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    if !status.is_success() {
                        bail!("config request to {url} returned {status}");
                    }
                    return r
                        .text()
                        .await
                        .with_context(|| format!("failed to read config body from {url}"));
                }
                Err(e) => {
                    if retries < max_retries {
                        retries += 1;
                        let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }
}
