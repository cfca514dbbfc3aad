//! Dependency field cleanup.
//!
//! APK dependency fields list space-separated tokens that may carry a
//! version constraint (`musl>=1.2`, `so:libc.musl-x86_64.so.1`,
//! `zlib~1.3`). Only the package identifier is kept.

/// Characters that start a version constraint suffix.
const CONSTRAINT_CHARS: [char; 4] = ['=', '<', '>', '~'];

/// Strip the version constraint from a single dependency token.
///
/// Everything from the first `=`, `<`, `>` or `~` onward is removed.
///
/// ```
/// use depviz_index::strip_constraint;
///
/// assert_eq!(strip_constraint("musl>=1.2.4"), "musl");
/// assert_eq!(strip_constraint("busybox"), "busybox");
/// ```
#[must_use]
pub fn strip_constraint(token: &str) -> &str {
    token
        .find(CONSTRAINT_CHARS)
        .map_or(token, |pos| &token[..pos])
}

/// Parse a whitespace-separated dependency field into package names.
///
/// Constraints are stripped, empty results (e.g. a bare `>=1.0`) dropped
/// and duplicates collapsed keeping the first occurrence.
#[must_use]
pub fn parse_dependency_field(field: &str) -> Vec<String> {
    let mut dependencies: Vec<String> = Vec::new();
    for token in field.split_whitespace() {
        let name = strip_constraint(token);
        if !name.is_empty() && !dependencies.iter().any(|d| d == name) {
            dependencies.push(name.to_string());
        }
    }
    dependencies
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("musl", "musl")]
    #[case("musl=1.2.4-r2", "musl")]
    #[case("zlib<2", "zlib")]
    #[case("openssl>3.0", "openssl")]
    #[case("ca-certificates~20240705", "ca-certificates")]
    #[case("so:libc.musl-x86_64.so.1", "so:libc.musl-x86_64.so.1")]
    #[case(">=1.0", "")]
    fn test_strip_constraint(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(strip_constraint(token), expected);
    }

    #[test]
    fn test_parse_dependency_field_dedups_keeping_first() {
        let deps = parse_dependency_field("musl>=1.2 zlib musl=1.2.4 libcrypto3 zlib<2");
        assert_eq!(deps, vec!["musl", "zlib", "libcrypto3"]);
    }

    #[test]
    fn test_parse_dependency_field_drops_empty_names() {
        let deps = parse_dependency_field("  >=1.0   busybox  ");
        assert_eq!(deps, vec!["busybox"]);
    }

    #[test]
    fn test_parse_dependency_field_empty() {
        assert!(parse_dependency_field("").is_empty());
        assert!(parse_dependency_field("   ").is_empty());
    }

    #[test]
    fn test_parse_dependency_field_is_case_sensitive() {
        let deps = parse_dependency_field("Foo foo FOO");
        assert_eq!(deps, vec!["Foo", "foo", "FOO"]);
    }
}
