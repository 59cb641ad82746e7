// src/utils/url.rs

//! URL inspection utilities.

/// Extract the lowercase host from a URL.
///
/// # Examples
/// ```
/// use leaderboard::utils::url::host_of;
///
/// assert_eq!(
///     host_of("https://LeetCode.com/u/alice"),
///     Some("leetcode.com".to_string())
/// );
/// ```
pub fn host_of(reference: &str) -> Option<String> {
    url::Url::parse(reference)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}
