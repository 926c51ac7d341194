use regex::Regex;
use std::sync::LazyLock;

static LINK_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]*)>\s*;\s*rel="?([^",]+)"?"#).expect("link header pattern")
});

/// Returns the URL tagged `rel="next"` in a Canvas `Link` header.
///
/// Canvas paginates with entries like
/// `<https://host/api/v1/courses/1/enrollments?page=2>; rel="next"`.
pub fn next_link(header: &str) -> Option<String> {
    LINK_ENTRY
        .captures_iter(header)
        .find(|caps| caps[2].split_whitespace().any(|rel| rel == "next"))
        .map(|caps| caps[1].to_string())
        .filter(|url| !url.is_empty())
}
