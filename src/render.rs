//! HTML rendering of classified browser records.
//!
//! The markup mirrors the original widget: an outer `div.browserslist` with
//! one section per platform, each holding a heading and a `ul` of icon +
//! name + version items. The heading tag is constrained to h1-h6 so caller
//! input can never inject markup.

use crate::catalog::PlatformClass;
use crate::classify::{BrowserRecord, ClassifiedBrowsers};
use std::fmt;
use std::str::FromStr;

/// Allowed heading tags for the platform sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

impl Default for HeadingTag {
    fn default() -> Self {
        Self::H2
    }
}

impl fmt::Display for HeadingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid heading tag {0:?} (expected h1-h6)")]
pub struct InvalidHeadingTag(String);

impl FromStr for HeadingTag {
    type Err = InvalidHeadingTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h1" => Ok(Self::H1),
            "h2" => Ok(Self::H2),
            "h3" => Ok(Self::H3),
            "h4" => Ok(Self::H4),
            "h5" => Ok(Self::H5),
            "h6" => Ok(Self::H6),
            other => Err(InvalidHeadingTag(other.to_string())),
        }
    }
}

fn render_section(html: &mut String, heading: HeadingTag, platform: PlatformClass, records: &[BrowserRecord]) {
    let heading_text = match platform {
        PlatformClass::Mobile => "Mobile",
        PlatformClass::Desktop => "Desktop",
    };

    html.push_str(&format!("<div class=\"browserslist_{}\">", platform.as_str()));
    html.push_str(&format!("<{heading}>{heading_text}</{heading}>"));
    html.push_str("<ul>");
    for record in records {
        html.push_str(&format!(
            "<li><img src=\"{}\" alt=\"{}\" /> {} {}</li>",
            record.icon_path, record.display_name, record.display_name, record.version
        ));
    }
    html.push_str("</ul></div>");
}

/// Render the two platform sections as HTML, mobile first.
///
/// Empty buckets still render their section with an empty list; total
/// upstream failure produces well-formed markup, never an error page.
pub fn render_html(browsers: &ClassifiedBrowsers, heading: HeadingTag) -> String {
    let mut html = String::from("<div class=\"browserslist\">");
    render_section(&mut html, heading, PlatformClass::Mobile, &browsers.mobile);
    render_section(&mut html, heading, PlatformClass::Desktop, &browsers.desktop);
    html.push_str("</div>");
    html
}
