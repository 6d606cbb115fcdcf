//! Config caching — store fetched browserslist query fragments on disk with
//! a freshness window.
//!
//! One JSON file per key under the cache directory. An expired entry is not
//! served, but a failed refresh never overwrites a previously written file:
//! `get_or_populate` only writes when the populate step produced a non-empty
//! result.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default freshness window for the remote config: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Fixed cache key used by the pipeline for the remote config.
pub const CONFIG_CACHE_KEY: &str = "config_remote";

/// On-disk cache entry.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Unix seconds at write time.
    cached_at: u64,
    /// Freshness window in seconds.
    ttl_secs: u64,
    /// The cached query fragments, in extraction order.
    values: Vec<String>,
}

impl CacheEntry {
    fn is_expired(&self, now: SystemTime) -> bool {
        let age = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs().saturating_sub(self.cached_at))
            .unwrap_or(u64::MAX);
        age > self.ttl_secs
    }
}

/// File-backed key-value cache with expiry.
pub struct ConfigCache {
    cache_dir: PathBuf,
}

impl ConfigCache {
    /// Open (and create if needed) a cache rooted at `cache_dir`.
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("failed to create cache dir: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{key}.json"))
    }

    /// Return the cached values for `key` if the entry exists and is fresh.
    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        let path = self.entry_path(key);
        let data = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&data) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("discarding unreadable cache entry {}: {e}", path.display());
                return None;
            }
        };
        if entry.is_expired(SystemTime::now()) {
            tracing::debug!("cache entry {key} expired");
            return None;
        }
        Some(entry.values)
    }

    /// Write `values` for `key` with expiry `now + ttl`.
    pub fn put(&self, key: &str, values: &[String], ttl: Duration) -> Result<()> {
        let entry = CacheEntry {
            cached_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            ttl_secs: ttl.as_secs(),
            values: values.to_vec(),
        };
        let path = self.entry_path(key);
        let data = serde_json::to_string(&entry).context("failed to serialize cache entry")?;
        fs::write(&path, data)
            .with_context(|| format!("failed to write cache file: {}", path.display()))?;
        Ok(())
    }

    /// Get a fresh entry, or run `populate` and store its non-empty result.
    ///
    /// A fresh hit never invokes `populate`. An empty or failed populate
    /// result is returned as an error without touching the stored entry.
    pub async fn get_or_populate<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        populate: F,
    ) -> Result<Vec<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>>>,
    {
        if let Some(values) = self.get(key) {
            tracing::debug!("cache hit for {key} ({} fragments)", values.len());
            return Ok(values);
        }

        let values = populate().await?;
        if values.is_empty() {
            bail!("populate for cache key {key} produced no values");
        }

        self.put(key, &values, ttl)?;
        tracing::debug!("cache repopulated {key} ({} fragments)", values.len());
        Ok(values)
    }

    /// Remove every entry file. Missing directory contents are not an error.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.cache_dir)
            .with_context(|| format!("failed to read cache dir: {}", self.cache_dir.display()))?
            .flatten()
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                fs::remove_file(&path)
                    .with_context(|| format!("failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Cache directory path.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();

        let values = strings(&["> 1%", "last 2 versions"]);
        cache.put("config_remote", &values, Duration::from_secs(3600)).unwrap();
        assert_eq!(cache.get("config_remote"), Some(values));
    }

    #[test]
    fn test_expired_entry_not_served() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();

        cache
            .put("config_remote", &strings(&["> 1%"]), Duration::from_secs(0))
            .unwrap();
        // Zero TTL: an entry older than zero seconds may still read as fresh
        // within the same second, so backdate it on disk.
        let path = dir.path().join("config_remote.json");
        let data = std::fs::read_to_string(&path).unwrap();
        let mut entry: serde_json::Value = serde_json::from_str(&data).unwrap();
        entry["cached_at"] = serde_json::json!(0);
        std::fs::write(&path, entry.to_string()).unwrap();

        assert_eq!(cache.get("config_remote"), None);
    }

    #[test]
    fn test_corrupt_entry_treated_as_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();

        std::fs::write(dir.path().join("config_remote.json"), "not json").unwrap();
        assert_eq!(cache.get("config_remote"), None);
    }

    #[tokio::test]
    async fn test_populate_called_once_then_cached() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_populate("config_remote", Duration::from_secs(3600), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, anyhow::Error>(strings(&["> 1%"]))
                })
                .await
                .unwrap();
            assert_eq!(got, strings(&["> 1%"]));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_populate_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();

        cache
            .put("config_remote", &strings(&["last 2 versions"]), Duration::from_secs(3600))
            .unwrap();

        // Empty populate result is a failure and must not clobber the entry.
        let result = cache
            .get_or_populate("other_key", Duration::from_secs(3600), || async {
                Ok::<_, anyhow::Error>(Vec::new())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.get("config_remote"), Some(strings(&["last 2 versions"])));
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ConfigCache::new(dir.path().to_path_buf()).unwrap();

        cache.put("a", &strings(&["x"]), Duration::from_secs(60)).unwrap();
        cache.put("b", &strings(&["y"]), Duration::from_secs(60)).unwrap();
        assert_eq!(cache.clear().unwrap(), 2);
        assert_eq!(cache.get("a"), None);
    }
}
