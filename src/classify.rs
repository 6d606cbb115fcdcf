//! Token classification — turn raw `"<id> <version>"` resolver lines into
//! display-ready records bucketed by platform.
//!
//! A malformed token or an id outside the catalog drops that single record
//! with a warning; it never aborts the remaining tokens. Buckets preserve
//! input order and are never de-duplicated.

use crate::catalog::{self, PlatformClass};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A single browser entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserRecord {
    /// Short browserslist id (e.g. `ios_saf`).
    pub browser_id: String,
    /// Version or version range as emitted by the resolver (e.g. `14.0-14.4`).
    pub version: String,
    /// Human-readable name from the catalog.
    pub display_name: String,
    /// Icon URL: `<icon_base_url>/images/<browser_id>.png`. Not checked for existence.
    pub icon_path: String,
    /// Mobile or desktop bucket.
    pub platform_class: PlatformClass,
}

/// Classifier output: the two ordered platform buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedBrowsers {
    pub mobile: Vec<BrowserRecord>,
    pub desktop: Vec<BrowserRecord>,
}

impl ClassifiedBrowsers {
    pub fn is_empty(&self) -> bool {
        self.mobile.is_empty() && self.desktop.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mobile.len() + self.desktop.len()
    }
}

/// Why a single resolver token was dropped.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token {0:?} does not match \"<id> <version>\"")]
    Malformed(String),
    #[error("browser id {0:?} is not in the catalog")]
    UnknownBrowserId(String),
}

fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // First match wins; trailing content after the version is ignored.
    RE.get_or_init(|| Regex::new(r"^([a-z_]+) ([\d\-.]+)").expect("token pattern is valid"))
}

/// Parse one resolver output line into a record.
pub fn parse_token(token: &str, icon_base_url: &str) -> Result<BrowserRecord, TokenError> {
    let caps = token_pattern()
        .captures(token)
        .ok_or_else(|| TokenError::Malformed(token.to_string()))?;

    let browser_id = &caps[1];
    let version = &caps[2];

    let display_name = catalog::display_name(browser_id)
        .ok_or_else(|| TokenError::UnknownBrowserId(browser_id.to_string()))?;

    Ok(BrowserRecord {
        browser_id: browser_id.to_string(),
        version: version.to_string(),
        display_name: display_name.to_string(),
        icon_path: format!("{}/images/{}.png", icon_base_url.trim_end_matches('/'), browser_id),
        platform_class: catalog::platform_class(browser_id),
    })
}

/// Classify resolver tokens into mobile/desktop buckets, in input order.
///
/// Tokens that fail to parse are skipped with a warning; one bad line must not
/// blank the whole list.
pub fn classify<S: AsRef<str>>(tokens: &[S], icon_base_url: &str) -> ClassifiedBrowsers {
    let mut out = ClassifiedBrowsers::default();

    for token in tokens {
        let token = token.as_ref();
        match parse_token(token, icon_base_url) {
            Ok(record) => match record.platform_class {
                PlatformClass::Mobile => out.mobile.push(record),
                PlatformClass::Desktop => out.desktop.push(record),
            },
            Err(e) => {
                tracing::warn!("skipping resolver token: {e}");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICONS: &str = "https://example.com/plugin";

    #[test]
    fn test_one_record_per_valid_token() {
        let tokens = ["chrome 90.0", "firefox 88.0", "ios_saf 14.0-14.4"];
        let out = classify(&tokens, ICONS);
        assert_eq!(out.len(), 3);
        assert_eq!(out.desktop.len(), 2);
        assert_eq!(out.mobile.len(), 1);
    }

    #[test]
    fn test_scenario_desktop_only() {
        let out = classify(&["chrome 90.0", "firefox 88.0"], ICONS);
        assert!(out.mobile.is_empty());
        assert_eq!(out.desktop[0].browser_id, "chrome");
        assert_eq!(out.desktop[0].version, "90.0");
        assert_eq!(out.desktop[1].browser_id, "firefox");
        assert_eq!(out.desktop[1].version, "88.0");
    }

    #[test]
    fn test_scenario_ios_saf() {
        let out = classify(&["ios_saf 14.0"], ICONS);
        assert_eq!(out.mobile.len(), 1);
        let rec = &out.mobile[0];
        assert_eq!(rec.display_name, "iOS Safari");
        assert!(rec.icon_path.ends_with("/images/ios_saf.png"));
        assert_eq!(rec.platform_class, PlatformClass::Mobile);
    }

    #[test]
    fn test_version_range_token() {
        let rec = parse_token("ios_saf 15.6-15.8", ICONS).unwrap();
        assert_eq!(rec.version, "15.6-15.8");
    }

    #[test]
    fn test_trailing_content_ignored() {
        let rec = parse_token("chrome 109 (extended support)", ICONS).unwrap();
        assert_eq!(rec.browser_id, "chrome");
        assert_eq!(rec.version, "109");
    }

    #[test]
    fn test_malformed_token_is_error() {
        assert_eq!(
            parse_token("Chrome90", ICONS),
            Err(TokenError::Malformed("Chrome90".to_string()))
        );
    }

    #[test]
    fn test_unknown_id_skipped_without_aborting() {
        let tokens = ["chrome 90.0", "netscape 4.0", "firefox 88.0"];
        let out = classify(&tokens, ICONS);
        assert_eq!(out.desktop.len(), 2);
        assert!(out.mobile.is_empty());
        // The bad token is skipped, not reordered around.
        assert_eq!(out.desktop[1].browser_id, "firefox");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let tokens = ["samsung 14.0", "edge 110", "and_chr 110", "edge 110"];
        let a = classify(&tokens, ICONS);
        let b = classify(&tokens, ICONS);
        assert_eq!(a, b);
        // Duplicates are kept.
        assert_eq!(a.desktop.len(), 2);
    }

    #[test]
    fn test_icon_base_trailing_slash_normalized() {
        let rec = parse_token("opera 95", "https://example.com/plugin/").unwrap();
        assert_eq!(rec.icon_path, "https://example.com/plugin/images/opera.png");
    }
}
