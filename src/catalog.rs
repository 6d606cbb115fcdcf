//! Static browser catalog — id → display name, plus the desktop set.
//!
//! The browserslist tool emits short ids (`and_chr`, `ios_saf`, ...). This
//! module owns the fixed translation table and the mobile/desktop split.
//! Every id not in the desktop set classifies as mobile.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Platform bucket for a browser id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformClass {
    Mobile,
    Desktop,
}

impl PlatformClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Build and cache the id → display name table (17 known ids).
fn display_names() -> &'static HashMap<&'static str, &'static str> {
    static NAMES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    NAMES.get_or_init(|| {
        HashMap::from([
            ("and_chr", "Chrome for Android"),
            ("and_ff", "Firefox for Android"),
            ("and_uc", "UC Browser for Android"),
            ("and_qq", "QQ Browser"),
            ("android", "Android Browser"),
            ("baidu", "Baidu Browser"),
            ("chrome", "Chrome"),
            ("edge", "Edge"),
            ("firefox", "Firefox"),
            ("ie", "Internet Explorer"),
            ("ie_mob", "IE Mobile"),
            ("ios_saf", "iOS Safari"),
            ("op_mini", "Opera Mini"),
            ("op_mob", "Opera Mobile"),
            ("opera", "Opera"),
            ("safari", "Safari"),
            ("samsung", "Samsung Internet"),
        ])
    })
}

/// Human-readable name for a browser id, or `None` for ids outside the catalog.
pub fn display_name(browser_id: &str) -> Option<&'static str> {
    display_names().get(browser_id).copied()
}

/// Whether the id belongs to the fixed desktop set. Everything else is mobile.
pub fn is_desktop(browser_id: &str) -> bool {
    matches!(
        browser_id,
        "chrome" | "edge" | "firefox" | "ie" | "opera" | "safari"
    )
}

/// Classify a browser id into its platform bucket. Total over all ids.
pub fn platform_class(browser_id: &str) -> PlatformClass {
    if is_desktop(browser_id) {
        PlatformClass::Desktop
    } else {
        PlatformClass::Mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_known_ids_have_names() {
        assert_eq!(display_names().len(), 17);
        assert_eq!(display_name("ios_saf"), Some("iOS Safari"));
        assert_eq!(display_name("and_chr"), Some("Chrome for Android"));
        assert_eq!(display_name("netscape"), None);
    }

    #[test]
    fn test_desktop_set_is_exact() {
        for id in ["chrome", "edge", "firefox", "ie", "opera", "safari"] {
            assert_eq!(platform_class(id), PlatformClass::Desktop);
        }
        for id in [
            "and_chr", "and_ff", "and_uc", "and_qq", "android", "baidu", "ie_mob", "ios_saf",
            "op_mini", "op_mob", "samsung",
        ] {
            assert_eq!(platform_class(id), PlatformClass::Mobile);
        }
    }

    #[test]
    fn test_unknown_ids_default_to_mobile() {
        // Classification is total even over ids the name table rejects.
        assert_eq!(platform_class("kaios"), PlatformClass::Mobile);
    }
}
