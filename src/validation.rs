/// Input validation for instance hosts and group names
use regex::Regex;
use std::sync::LazyLock;

use crate::instance::Instance;

/// Scheme + host, then any number of path segments. Not anchored at the end.
pub const ORIGIN_PATTERN: &str = r"^(https?://[^/]*)(/[^/]+)*";

/// Three word runs with optional `@` / `.` separators between them.
///
/// The `@*` and `\.*` quantifiers accept repeated separators as well as none
/// at all. Existing stored group names were checked against this exact
/// pattern, so it is kept loose.
pub const GROUP_NAME_PATTERN: &str = r"(?i)^[a-zA-Z0-9_-]+@*[a-zA-Z0-9_-]+\.*[a-zA-Z0-9_-]+$";

/// `pattern` attribute for the host field. Browsers anchor it themselves and
/// compile it with the `v` flag, so `/` and `-` are escaped inside classes.
pub const HOST_INPUT_PATTERN: &str = r"https?://[^\/]*(\/[^\/]+)*";

/// `pattern` attribute for the group name field.
pub const GROUP_NAME_INPUT_PATTERN: &str = r"[a-zA-Z0-9_\-]+@*[a-zA-Z0-9_\-]+\.*[a-zA-Z0-9_\-]+";

static ORIGIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ORIGIN_PATTERN).expect("origin pattern compiles"));

static GROUP_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GROUP_NAME_PATTERN).expect("group name pattern compiles"));

/// Check whether a host string starts with an http(s) origin
pub fn is_valid_host(host: &str) -> bool {
    ORIGIN_RE.is_match(host)
}

/// Check a group name against [`GROUP_NAME_PATTERN`]
pub fn is_valid_group_name(name: &str) -> bool {
    GROUP_NAME_RE.is_match(name)
}

/// Extract the scheme + host portion of a URL
///
/// Examples:
/// - https://chromium-review.googlesource.com → https://chromium-review.googlesource.com
/// - https://a.example/c/project → https://a.example
/// - ftp://a.example → None
pub fn origin_of(host: &str) -> Option<&str> {
    ORIGIN_RE
        .captures(host)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Origins of every enabled instance, first occurrence wins
pub fn allowed_origins(instances: &[Instance]) -> Vec<String> {
    instances
        .iter()
        .filter(|instance| instance.enabled)
        .filter_map(|instance| origin_of(&instance.host))
        .fold(Vec::new(), |mut origins, origin| {
            if !origins.iter().any(|o: &String| o == origin) {
                origins.push(origin.to_string());
            }
            origins
        })
}

/// Group names failing the pattern, in their original order
pub fn invalid_group_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| !is_valid_group_name(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hosts() {
        assert!(is_valid_host("https://chromium-review.googlesource.com"));
        assert!(is_valid_host("http://localhost:8080"));
        assert!(is_valid_host("https://a.example/c/project"));
    }

    #[test]
    fn test_invalid_hosts() {
        assert!(!is_valid_host(""));
        assert!(!is_valid_host("chromium-review.googlesource.com"));
        assert!(!is_valid_host("ftp://a.example"));
        assert!(!is_valid_host(" https://a.example"));
    }

    #[test]
    fn test_origin_of() {
        assert_eq!(origin_of("https://a.example"), Some("https://a.example"));
        assert_eq!(origin_of("https://a.example/c/project"), Some("https://a.example"));
        assert_eq!(origin_of("http://localhost:8080/"), Some("http://localhost:8080"));
        assert_eq!(origin_of("a.example"), None);
    }

    #[test]
    fn test_group_names() {
        assert!(is_valid_group_name("foo@bar.baz"));
        assert!(is_valid_group_name("team-x"));
        assert!(is_valid_group_name("my_group"));
        assert!(is_valid_group_name("FOO@BAR.BAZ"));
    }

    #[test]
    fn test_group_names_loose_separators() {
        // Separators may repeat or be absent entirely
        assert!(is_valid_group_name("foo@@bar..baz"));
        assert!(is_valid_group_name("foobarbaz"));
        assert!(is_valid_group_name("a@bc"));
    }

    #[test]
    fn test_invalid_group_names() {
        assert!(!is_valid_group_name("foo/bar"));
        assert!(!is_valid_group_name("ab"));
        assert!(!is_valid_group_name("a@b"));
        assert!(!is_valid_group_name("foo bar"));
        assert!(!is_valid_group_name(""));
    }

    #[test]
    fn test_allowed_origins_only_enabled() {
        let instances = vec![
            Instance::new("https://a.example", "A", true),
            Instance::new("https://b.example", "B", false),
            Instance::new("https://c.example/sub/path", "C", true),
        ];

        let origins = allowed_origins(&instances);

        assert_eq!(origins, vec!["https://a.example", "https://c.example"]);
    }

    #[test]
    fn test_allowed_origins_dedup_and_skip_malformed() {
        let instances = vec![
            Instance::new("https://a.example/one", "A1", true),
            Instance::new("https://a.example/two", "A2", true),
            Instance::new("not a url", "Broken", true),
        ];

        let origins = allowed_origins(&instances);

        assert_eq!(origins, vec!["https://a.example"]);
    }

    #[test]
    fn test_invalid_group_names_keeps_order() {
        let names = vec![
            "team-x".to_string(),
            "foo/bar".to_string(),
            "foo@bar.baz".to_string(),
            "x".to_string(),
        ];

        assert_eq!(invalid_group_names(&names), vec!["foo/bar", "x"]);
        assert!(invalid_group_names(&names[..1]).is_empty());
    }
}
