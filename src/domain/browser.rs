//! Browser identification from a user-agent string.

use std::fmt;

/// Browser family recognized from a user agent.
///
/// Edge and other Chromium derivatives report as [`BrowserKind::Chrome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Ie,
    Firefox,
    Chrome,
    Opera,
    Safari,
    Unknown,
}

impl BrowserKind {
    /// Classify a user-agent string. Matching is case-insensitive and the
    /// first rule that applies wins.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        let has = |needle: &str| ua.contains(needle);
        let chromium = has("chrome") && has("webkit") && has("mozilla");

        if has("msie") && !has("opera") {
            BrowserKind::Ie
        } else if has("firefox") {
            BrowserKind::Firefox
        } else if chromium {
            BrowserKind::Chrome
        } else if has("opera") {
            BrowserKind::Opera
        } else if has("webkit") {
            BrowserKind::Safari
        } else {
            BrowserKind::Unknown
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            BrowserKind::Ie => "IE",
            BrowserKind::Firefox => "Firefox",
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Opera => "Opera",
            BrowserKind::Safari => "Safari",
            BrowserKind::Unknown => "未知浏览器",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
