//! Pipeline service wiring cache, fetcher, resolver, and classifier.
//!
//! All fetch and resolve failures degrade to empty buckets at their own
//! layer; nothing past this module ever sees an error. The user-visible
//! effect of total failure is an empty list, not an error page.

use anyhow::Result;

use crate::cache::{ConfigCache, CONFIG_CACHE_KEY};
use crate::classify::{self, ClassifiedBrowsers};
use crate::config::Settings;
use crate::fetch::ConfigFetcher;
use crate::render::{self, HeadingTag};
use crate::resolver::{BrowserResolver, BrowserslistCommand};

pub struct ShelfService {
    settings: Settings,
    cache: ConfigCache,
    fetcher: ConfigFetcher,
    resolver: Box<dyn BrowserResolver>,
}

impl ShelfService {
    /// Build the production pipeline (subprocess resolver).
    pub fn new(settings: Settings) -> Result<Self> {
        let resolver = Box::new(BrowserslistCommand::new(settings.resolver_timeout));
        Self::with_resolver(settings, resolver)
    }

    /// Build the pipeline with a custom resolver (used by tests).
    pub fn with_resolver(settings: Settings, resolver: Box<dyn BrowserResolver>) -> Result<Self> {
        settings.validate()?;
        let cache = ConfigCache::new(settings.cache_dir.clone())?;
        let fetcher = ConfigFetcher::new(settings.http_timeout);
        Ok(Self {
            settings,
            cache,
            fetcher,
            resolver,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    /// The query fragments, from cache or a fresh fetch.
    ///
    /// `fresh` bypasses the cache read but a successful fetch still
    /// re-populates the entry. Failure degrades to an empty list.
    pub async fn queries(&self, fresh: bool) -> Vec<String> {
        let url = self.settings.config_url.clone();

        let result = if fresh {
            match self.fetcher.fetch(&url).await {
                Ok(values) if !values.is_empty() => {
                    self.cache
                        .put(CONFIG_CACHE_KEY, &values, self.settings.cache_ttl)
                        .map(|_| values)
                }
                Ok(_) => Err(anyhow::anyhow!("config at {url} contained no fragments")),
                Err(e) => Err(e),
            }
        } else {
            self.cache
                .get_or_populate(CONFIG_CACHE_KEY, self.settings.cache_ttl, || {
                    self.fetcher.fetch(&url)
                })
                .await
        };

        match result {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("no browserslist config available: {e:#}");
                Vec::new()
            }
        }
    }

    /// The grouped, ordered browser records — the core output contract.
    pub async fn classified(&self, fresh: bool) -> ClassifiedBrowsers {
        let queries = self.queries(fresh).await;
        let tokens = self.resolver.resolve(&queries).await;
        classify::classify(&tokens, &self.settings.icon_base_url)
    }

    /// Render the grouped records as HTML.
    pub async fn render_html(&self, heading: HeadingTag, fresh: bool) -> String {
        let browsers = self.classified(fresh).await;
        render::render_html(&browsers, heading)
    }
}
