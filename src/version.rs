//! Semantic version helpers for Go module versions
//!
//! Go module versions carry a leading `v` (`v1.2.3`, `v2.0.0-rc.1`,
//! `v1.4.0+incompatible`). Go also accepts the shorthand forms `v1` and
//! `v1.2`. Everything here is built on the `semver` crate; the prefix and
//! shorthand are normalized before parsing.

use semver::Version;
use std::cmp::Ordering;

/// Parse a version string, accepting an optional `v` prefix and Go shorthand
pub fn parse(v: &str) -> Option<Version> {
    let s = v.strip_prefix('v').unwrap_or(v);
    if s.is_empty() {
        return None;
    }

    // Split off prerelease/build before counting dots in the core
    let core_end = s.find(['-', '+']).unwrap_or(s.len());
    let (core, rest) = s.split_at(core_end);

    let normalized = match core.matches('.').count() {
        0 => format!("{}.0.0{}", core, rest),
        1 => format!("{}.0{}", core, rest),
        _ => s.to_string(),
    };

    // Go rejects prerelease/build on shorthand versions (`v1.2-pre`)
    if normalized.len() != s.len() && !rest.is_empty() {
        return None;
    }

    Version::parse(&normalized).ok()
}

/// Whether the string is a valid semantic version
pub fn is_valid(v: &str) -> bool {
    parse(v).is_some()
}

/// Compare two version strings by semver precedence
///
/// Build metadata is ignored. Invalid strings never panic: an invalid
/// string orders below every valid one and two invalid strings are equal.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp_precedence(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Stable ascending sort by [`compare`]
pub fn sort(versions: &mut [String]) {
    versions.sort_by(|a, b| compare(a, b));
}

/// Prerelease identifiers of a version, or an empty string
pub fn prerelease(v: &str) -> String {
    parse(v)
        .map(|version| version.pre.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("v1.2.3"));
        assert!(is_valid("1.2.3"));
        assert!(is_valid("v1.2.3-beta.1"));
        assert!(is_valid("v1.4.0+incompatible"));
        assert!(is_valid("v0.0.0-20240101120000-abcdef123456"));
    }

    #[test]
    fn test_is_valid_shorthand() {
        assert!(is_valid("v1"));
        assert!(is_valid("v1.2"));
        assert!(!is_valid("v1.2-pre"));
    }

    #[test]
    fn test_is_valid_rejects_garbage() {
        assert!(!is_valid(""));
        assert!(!is_valid("v"));
        assert!(!is_valid("(devel)"));
        assert!(!is_valid("latest"));
        assert!(!is_valid("v01.2.3"));
        assert!(!is_valid("v1.2.3.4"));
    }

    #[test]
    fn test_compare_basic() {
        assert_eq!(compare("v1.0.0", "v1.0.0"), Ordering::Equal);
        assert_eq!(compare("v1.0.0", "v2.0.0"), Ordering::Less);
        assert_eq!(compare("v1.10.0", "v1.9.0"), Ordering::Greater);
        assert_eq!(compare("v1.0.1", "v1.0.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_prerelease() {
        assert_eq!(compare("v1.0.0-alpha", "v1.0.0"), Ordering::Less);
        assert_eq!(compare("v1.0.0-alpha", "v1.0.0-beta"), Ordering::Less);
        assert_eq!(compare("v1.0.0-rc.2", "v1.0.0-rc.10"), Ordering::Less);
        assert_eq!(compare("v1.0.0-alpha.1", "v1.0.0-alpha.beta"), Ordering::Less);
        assert_eq!(compare("v1.1.0-beta", "v1.0.0"), Ordering::Greater);
    }

    #[test]
    fn test_compare_ignores_build_metadata() {
        assert_eq!(compare("v1.0.0+build.1", "v1.0.0+build.2"), Ordering::Equal);
        assert_eq!(compare("v2.0.0+incompatible", "v2.0.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_prefix_is_optional() {
        assert_eq!(compare("1.2.3", "v1.2.3"), Ordering::Equal);
        assert_eq!(compare("v1.2", "v1.2.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_invalid_does_not_panic() {
        assert_eq!(compare("(devel)", "garbage"), Ordering::Equal);
        assert_eq!(compare("(devel)", "v1.0.0"), Ordering::Less);
        assert_eq!(compare("v0.0.1", ""), Ordering::Greater);
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let versions = [
            "v0.1.0", "v1.0.0-alpha", "v1.0.0-alpha.1", "v1.0.0-beta", "v1.0.0", "v1.0.1",
            "v1.2.0", "v2.0.0+incompatible", "bogus",
        ];
        for a in versions {
            for b in versions {
                assert_eq!(compare(a, b), compare(b, a).reverse(), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_compare_is_transitive() {
        let versions = ["v1.0.0-alpha", "v1.0.0-alpha.1", "v1.0.0-beta.2", "v1.0.0", "v1.1.0"];
        for a in versions {
            for b in versions {
                for c in versions {
                    if compare(a, b) != Ordering::Greater && compare(b, c) != Ordering::Greater {
                        assert_ne!(compare(a, c), Ordering::Greater, "{} {} {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_sort_ascending() {
        let mut list = strings(&["v1.10.0", "v1.2.0", "v1.2.0-rc.1", "v0.9.0", "v2.0.0"]);
        sort(&mut list);
        assert_eq!(
            list,
            strings(&["v0.9.0", "v1.2.0-rc.1", "v1.2.0", "v1.10.0", "v2.0.0"])
        );
        for pair in list.windows(2) {
            assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut list = strings(&["v3.0.0", "v1.0.0", "junk", "v1.0.0-beta", "v2.1.0"]);
        sort(&mut list);
        let once = list.clone();
        sort(&mut list);
        assert_eq!(list, once);
        assert_eq!(list[0], "junk");
    }

    #[test]
    fn test_sort_is_stable_for_equal_precedence() {
        let mut list = strings(&["v1.0.0+b", "v0.5.0", "v1.0.0+a"]);
        sort(&mut list);
        assert_eq!(list, strings(&["v0.5.0", "v1.0.0+b", "v1.0.0+a"]));
    }

    #[test]
    fn test_prerelease() {
        assert_eq!(prerelease("v1.0.0"), "");
        assert_eq!(prerelease("v1.0.0-beta"), "beta");
        assert_eq!(prerelease("v1.0.0-rc.1+meta"), "rc.1");
        assert_eq!(prerelease("not-a-version"), "");
    }
}
