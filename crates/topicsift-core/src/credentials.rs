//! API key resolution for the summarization endpoint.
//!
//! The key is resolved once at process start and then passed explicitly to
//! [`crate::GeminiClient`]. A missing key is not an error here; it only
//! surfaces when a summary is requested.

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Resolve the API key: `explicit` > `GEMINI_API_KEY` > `GOOGLE_API_KEY`.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    resolve_api_key_with(explicit, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`] with an injectable variable lookup.
///
/// Empty values are treated as unset.
pub fn resolve_api_key_with<F>(explicit: Option<String>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|k| !k.trim().is_empty())
        .or_else(|| {
            API_KEY_ENV_VARS
                .iter()
                .filter_map(|name| lookup(name))
                .find(|k| !k.trim().is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let owned: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| {
            owned
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn explicit_key_wins() {
        let key = resolve_api_key_with(
            Some("flag".into()),
            env(&[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]),
        );
        assert_eq!(key.as_deref(), Some("flag"));
    }

    #[test]
    fn gemini_var_preferred_over_google() {
        let key = resolve_api_key_with(
            None,
            env(&[("GEMINI_API_KEY", "gemini"), ("GOOGLE_API_KEY", "google")]),
        );
        assert_eq!(key.as_deref(), Some("gemini"));
    }

    #[test]
    fn falls_back_to_google_var() {
        let key = resolve_api_key_with(None, env(&[("GOOGLE_API_KEY", "google")]));
        assert_eq!(key.as_deref(), Some("google"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let key = resolve_api_key_with(
            Some("  ".into()),
            env(&[("GEMINI_API_KEY", ""), ("GOOGLE_API_KEY", "google")]),
        );
        assert_eq!(key.as_deref(), Some("google"));
    }

    #[test]
    fn absent_everywhere_is_none() {
        assert!(resolve_api_key_with(None, env(&[])).is_none());
    }
}
