//! Build-time configuration for backend and identity provider access.
//!
//! Values come from environment variables captured at compile time
//! (`API_URL`, `FIREBASE_API_KEY`), so a build targets one deployment.

use crate::system::auth::firebase::FirebaseConfig;

/// Path prefix appended to the configured API URL
pub const API_PREFIX: &str = "/api";

/// Normalizes a configured API URL into the client base URL
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_base_from;
/// assert_eq!(api_base_from("https://example.com/"), "https://example.com/api");
/// ```
pub fn api_base_from(raw_url: &str) -> String {
    format!("{}{}", raw_url.trim().trim_end_matches('/'), API_PREFIX)
}

/// Origin of the current page, e.g. "https://app.example.com"
fn window_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn env_value(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL including [`API_PREFIX`]
    pub api_base: String,
    pub firebase: FirebaseConfig,
}

impl AppConfig {
    /// Reads `API_URL` and `FIREBASE_API_KEY`; without `API_URL` the backend
    /// is assumed to be served from the page origin
    pub fn from_env() -> Self {
        let api_url = match env_value(option_env!("API_URL")) {
            Some(url) => url.to_string(),
            None => {
                let origin = window_origin().unwrap_or_default();
                log::warn!("API_URL not set at build time, using page origin {:?}", origin);
                origin
            }
        };

        let api_key = env_value(option_env!("FIREBASE_API_KEY")).unwrap_or_else(|| {
            log::warn!("FIREBASE_API_KEY not set at build time, sign-in will fail");
            ""
        });

        Self {
            api_base: api_base_from(&api_url),
            firebase: FirebaseConfig::new(api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_from() {
        assert_eq!(api_base_from("http://localhost:8080"), "http://localhost:8080/api");
        assert_eq!(api_base_from("http://localhost:8080/"), "http://localhost:8080/api");
        assert_eq!(api_base_from(" https://x.dev/v2/ "), "https://x.dev/v2/api");
        assert_eq!(api_base_from(""), "/api");
    }

    #[test]
    fn test_env_value_ignores_blank() {
        assert_eq!(env_value(None), None);
        assert_eq!(env_value(Some("   ")), None);
        assert_eq!(env_value(Some(" key ")), Some("key"));
    }
}
