//! Resolver abstraction over the external browserslist compatibility tool.
//!
//! The production implementation shells out to `npx browserslist` with the
//! comma-joined query fragments as a single argument and returns its stdout
//! lines. The trait exists so pipeline tests can substitute an in-process
//! resolver.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

/// Default wall-clock budget for one resolver invocation.
pub const DEFAULT_RESOLVER_TIMEOUT: Duration = Duration::from_secs(30);

/// A compatibility resolver: query fragments in, `"<id> <version>"` lines out.
#[async_trait]
pub trait BrowserResolver: Send + Sync {
    /// Resolve query fragments to raw browser tokens, best-effort.
    ///
    /// An empty input or any invocation failure yields an empty output; line
    /// validation is the classifier's job.
    async fn resolve(&self, queries: &[String]) -> Vec<String>;
}

#[async_trait]
impl<T: BrowserResolver + ?Sized> BrowserResolver for std::sync::Arc<T> {
    async fn resolve(&self, queries: &[String]) -> Vec<String> {
        (**self).resolve(queries).await
    }
}

/// Find the `npx` launcher on the system PATH.
pub fn find_npx() -> Option<PathBuf> {
    which::which("npx").ok()
}

/// Join query fragments into the single resolver argument.
pub fn join_queries(queries: &[String]) -> String {
    queries.join(", ")
}

/// Resolver that invokes `npx browserslist` as a subprocess.
pub struct BrowserslistCommand {
    timeout: Duration,
}

impl BrowserslistCommand {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for BrowserslistCommand {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVER_TIMEOUT)
    }
}

#[async_trait]
impl BrowserResolver for BrowserslistCommand {
    async fn resolve(&self, queries: &[String]) -> Vec<String> {
        if queries.is_empty() {
            return Vec::new();
        }

        let npx = match find_npx() {
            Some(p) => p,
            None => {
                tracing::warn!("npx not found on PATH; browser resolution unavailable");
                return Vec::new();
            }
        };

        let joined = join_queries(queries);
        tracing::debug!("invoking browserslist with query {joined:?}");

        let child = match tokio::process::Command::new(&npx)
            .arg("browserslist")
            .arg(&joined)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("failed to spawn {}: {e}", npx.display());
                return Vec::new();
            }
        };

        // kill_on_drop reaps the subprocess if the timeout fires first.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(out)) => out,
            Ok(Err(e)) => {
                tracing::warn!("failed to wait for browserslist: {e}");
                return Vec::new();
            }
            Err(_) => {
                tracing::warn!("browserslist timed out after {:?}", self.timeout);
                return Vec::new();
            }
        };

        if !output.status.success() {
            tracing::warn!(
                "browserslist exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Vec::new();
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_queries_separator() {
        let queries = vec!["chrome 90".to_string(), "firefox 88".to_string()];
        assert_eq!(join_queries(&queries), "chrome 90, firefox 88");
    }

    #[test]
    fn test_join_single_query() {
        assert_eq!(join_queries(&["> 1%".to_string()]), "> 1%");
    }

    #[tokio::test]
    async fn test_empty_queries_short_circuits() {
        // Must return without any subprocess invocation, so it completes even
        // with a zero timeout.
        let resolver = BrowserslistCommand::new(Duration::from_secs(0));
        assert!(resolver.resolve(&[]).await.is_empty());
    }
}
