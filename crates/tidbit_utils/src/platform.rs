//! Browser and platform detection from user-agent strings.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

lazy_static! {
    static ref TRIDENT_VERSION: Regex = Regex::new(r"trident/([\w.]+)").unwrap();
    static ref MSIE_VERSION: Regex = Regex::new(r"msie ([\d.]+)").unwrap();
}

/// Substrings that mark a mobile user agent.
const MOBILE_AGENTS: [&str; 5] = ["android", "iphone", "windows phone", "ipad", "ipod"];

/// A detected browser family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Browser {
    /// Chrome and other Chromium browsers that are not legacy Edge.
    Chrome,
    /// Firefox.
    Firefox,
    /// Presto-era Opera.
    Opera,
    /// Legacy Edge.
    Edge,
    /// Safari.
    Safari,
    /// Internet Explorer, with the major version when it could be read.
    Ie(Option<u32>),
    /// Anything else.
    Unknown,
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chrome => f.write_str("chrome"),
            Self::Firefox => f.write_str("firefox"),
            Self::Opera => f.write_str("opera"),
            Self::Edge => f.write_str("edge"),
            Self::Safari => f.write_str("safari"),
            Self::Ie(Some(version)) => write!(f, "ie{version}"),
            Self::Ie(None) => f.write_str("ie"),
            Self::Unknown => Ok(()),
        }
    }
}

/// Platform class of a user agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    /// Phones and tablets.
    Mobile,
    /// Everything else.
    Pc,
}

impl Platform {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Pc => "pc",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the browser family. Matching is case-insensitive and the first
/// family that matches wins, in the order chrome, firefox, opera, edge,
/// safari, ie.
#[must_use]
pub fn detect_browser(user_agent: &str) -> Browser {
    let ua = user_agent.to_lowercase();
    let has = |needle: &str| ua.contains(needle);

    let browser = if has("chrome") && has("safari") && !has("edge") {
        Browser::Chrome
    } else if has("firefox") {
        Browser::Firefox
    } else if has("opera") {
        Browser::Opera
    } else if has("edge") {
        Browser::Edge
    } else if has("safari") && !has("chrome") {
        Browser::Safari
    } else if (has("compatible") && has("msie")) || has("trident") {
        Browser::Ie(ie_version(&ua))
    } else {
        Browser::Unknown
    };
    trace!(%browser, "detected browser");
    browser
}

/// IE 11 drops the `msie` token and reports `trident/7.0`; older versions
/// carry `msie N`.
fn ie_version(ua: &str) -> Option<u32> {
    if ua.contains("gecko") && !ua.contains("msie") {
        let caps = TRIDENT_VERSION.captures(ua)?;
        return Some(if &caps[1] == "7.0" { 11 } else { 9 });
    }
    let caps = MSIE_VERSION.captures(ua)?;
    let major = caps[1].split('.').next()?;
    major.parse().ok()
}

/// Short browser name with IE version, e.g. `"chrome"` or `"ie11"`. Unknown
/// browsers give an empty string.
#[must_use]
pub fn browser_version(user_agent: &str) -> String {
    detect_browser(user_agent).to_string()
}

/// Classifies a user agent as mobile or pc.
#[must_use]
pub fn judge_platform(user_agent: &str) -> Platform {
    let ua = user_agent.to_lowercase();
    if MOBILE_AGENTS.iter().any(|agent| ua.contains(agent)) {
        Platform::Mobile
    } else {
        Platform::Pc
    }
}
