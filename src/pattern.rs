//! Regular-expression helpers over the `regex` crate.
//!
//! Bad patterns come back as [`DemoError::Pattern`](crate::DemoError::Pattern)
//! instead of panicking.

use crate::error::Result;
use regex::{bytes, Regex};
use tracing::debug;

pub fn compile(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Replaces every match in `haystack`. `$1`-style references in
/// `replacement` expand to capture groups.
pub fn replace_all(pattern: &str, haystack: &[u8], replacement: &[u8]) -> Result<Vec<u8>> {
    let re = bytes::Regex::new(pattern)?;
    let replaced = re.replace_all(haystack, replacement).into_owned();
    debug!(pattern, before = haystack.len(), after = replaced.len(), "replace_all");
    Ok(replaced)
}

pub fn match_string(pattern: &str, text: &str) -> Result<bool> {
    Ok(compile(pattern)?.is_match(text))
}

/// One-shot compile and match against raw bytes.
pub fn matches(pattern: &str, haystack: &[u8]) -> Result<bool> {
    Ok(bytes::Regex::new(pattern)?.is_match(haystack))
}

pub fn find_all(pattern: &str, text: &str) -> Result<Vec<String>> {
    let re = compile(pattern)?;
    Ok(re.find_iter(text).map(|m| m.as_str().to_string()).collect())
}

/// Capture groups of the first match, group 0 included. Groups that did not
/// participate are `None`.
pub fn captures(pattern: &str, text: &str) -> Result<Option<Vec<Option<String>>>> {
    let re = compile(pattern)?;
    Ok(re.captures(text).map(|caps| {
        caps.iter()
            .map(|group| group.map(|m| m.as_str().to_string()))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DemoError;

    const INDEXED_NAME: &str = r"^[a-z]+\[[0-9]+\]$";

    #[test]
    fn replace_all_collapses_each_match() {
        let out = replace_all("a(x*)b", b"-ab-axxb", b"T").unwrap();
        assert_eq!(out, b"-T-T");
    }

    #[test]
    fn replace_all_expands_group_references() {
        let out = replace_all("a(x*)b", b"-ab-axxb", b"[$1]").unwrap();
        assert_eq!(out, b"-[]-[xx]");
    }

    #[test]
    fn anchored_pattern_rejects_near_misses() {
        for text in [" adam[23]", "eve[7] ", "Job[30]", "snakey"] {
            assert!(!match_string(INDEXED_NAME, text).unwrap(), "{:?} matched", text);
        }
        assert!(match_string(INDEXED_NAME, "adam[23]").unwrap());
    }

    #[test]
    fn unanchored_match_finds_substring() {
        assert!(matches("foo", b"seafood").unwrap());
        assert!(!matches("foo", b"sea").unwrap());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(matches!(compile("a(b"), Err(DemoError::Pattern(_))));
        assert!(matches!(replace_all("[", b"x", b"y"), Err(DemoError::Pattern(_))));
    }

    #[test]
    fn find_all_and_captures() {
        assert_eq!(find_all("a(x*)b", "-ab-axxb").unwrap(), vec!["ab", "axxb"]);

        let groups = captures("a(x*)b", "-axxb").unwrap().unwrap();
        assert_eq!(groups, vec![Some("axxb".to_string()), Some("xx".to_string())]);

        let optional = captures("a(x)?b", "ab").unwrap().unwrap();
        assert_eq!(optional, vec![Some("ab".to_string()), None]);

        assert_eq!(captures("z", "abc").unwrap(), None);
    }
}
