//! Device detection for shelf rendering.

use axum::http::{HeaderMap, header::USER_AGENT};
use serde::Deserialize;

/// Device class a shelf is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Desktop,
}

/// User-Agent fragments that mark a mobile browser.
const MOBILE_MARKERS: &[&str] = &["Mobi", "Android", "iPhone", "iPod"];

impl Device {
    /// Guess the device class from the request's `User-Agent`.
    #[must_use]
    pub fn detect(headers: &HeaderMap) -> Self {
        let is_mobile = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ua| MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)));

        if is_mobile { Self::Mobile } else { Self::Desktop }
    }

    /// An explicit choice wins over detection.
    #[must_use]
    pub fn resolve(explicit: Option<Self>, headers: &HeaderMap) -> Self {
        explicit.unwrap_or_else(|| Self::detect(headers))
    }

    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(ua: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(ua).unwrap());
        headers
    }

    #[test]
    fn test_detect_mobile() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
        assert_eq!(Device::detect(&headers(iphone)), Device::Mobile);
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36";
        assert_eq!(Device::detect(&headers(android)), Device::Mobile);
    }

    #[test]
    fn test_detect_desktop() {
        let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        assert_eq!(Device::detect(&headers(firefox)), Device::Desktop);
        assert_eq!(Device::detect(&HeaderMap::new()), Device::Desktop);
    }

    #[test]
    fn test_explicit_override() {
        let firefox = headers("Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0");
        assert_eq!(Device::resolve(Some(Device::Mobile), &firefox), Device::Mobile);
        assert_eq!(Device::resolve(None, &firefox), Device::Desktop);
        assert!(Device::Mobile.is_mobile());
        assert_eq!(Device::Desktop.as_str(), "desktop");
    }
}
