//! Pattern matching over qualified names.
//!
//! Three modes exist and are kept apart on purpose: documentation lookups use
//! dot-safe prefixes (`sys` matches `sys.doc` but not `sysctl.get`), function
//! listings use a raw `starts_with`, and module listings treat every pattern
//! as a glob.

use std::borrow::Cow;
use std::collections::BTreeSet;

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use tracing::warn;

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// How non-glob patterns are interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchMode {
    /// Glob when a wildcard is present, otherwise exact name or `pattern.`
    /// prefix.
    Doc,
    /// Glob when a wildcard is present, otherwise raw `starts_with(pattern)`.
    Prefix,
    /// Every pattern is a glob.
    Glob,
}

/// Pattern rejected because it could not be compiled.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid pattern `{pattern}`: {reason}")]
pub struct PatternError {
    pattern: String,
    reason: String,
}

impl PatternError {
    /// Creates an error for `pattern`.
    #[must_use]
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// The pattern as supplied by the caller.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Why compilation failed.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Returns `true` if `pattern` contains a shell wildcard.
#[must_use]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Folds each run of `*` outside a `[...]` class into one `*`.
///
/// Names carry no path separators, so `**` means the same as `*`; the glob
/// compiler would otherwise reject it unless it forms a whole path component.
fn collapse_stars(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("**") {
        return Cow::Borrowed(pattern);
    }

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                out.push('*');
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
            }
            '[' => {
                out.push('[');
                if chars.peek() == Some(&'!') {
                    out.push('!');
                    chars.next();
                }
                // a leading `]` is a literal member of the class
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
                for member in chars.by_ref() {
                    out.push(member);
                    if member == ']' {
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// One compiled caller pattern.
#[derive(Clone, Debug)]
pub enum PatternMatcher<'p> {
    /// Shell-glob against the full qualified name.
    Glob(Pattern),
    /// Exact name, or any name starting with `target`.
    DottedPrefix {
        /// Pattern as supplied.
        exact: &'p str,
        /// Pattern with a guaranteed trailing dot.
        target: Cow<'p, str>,
    },
    /// Any name starting with the pattern.
    StartsWith(&'p str),
    /// Matches nothing.
    Nothing,
}

impl<'p> PatternMatcher<'p> {
    /// Classifies and compiles `pattern` for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when glob compilation fails.
    pub fn compile(pattern: &'p str, mode: MatchMode) -> Result<Self, PatternError> {
        if mode == MatchMode::Glob || is_glob(pattern) {
            return Pattern::new(&collapse_stars(pattern))
                .map(Self::Glob)
                .map_err(|err| PatternError::new(pattern, err.to_string()));
        }

        if pattern.is_empty() {
            warn!("empty pattern matches nothing");
            return Ok(Self::Nothing);
        }

        Ok(match mode {
            MatchMode::Doc => Self::DottedPrefix {
                exact: pattern,
                target: if pattern.ends_with('.') {
                    Cow::Borrowed(pattern)
                } else {
                    Cow::Owned(format!("{pattern}."))
                },
            },
            MatchMode::Prefix | MatchMode::Glob => Self::StartsWith(pattern),
        })
    }

    /// Tests a qualified name against the compiled pattern.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        match self {
            Self::Glob(pattern) => pattern.matches_with(name, GLOB_OPTIONS),
            Self::DottedPrefix { exact, target } => {
                name == *exact || name.starts_with(target.as_ref())
            }
            Self::StartsWith(prefix) => name.starts_with(prefix),
            Self::Nothing => false,
        }
    }
}

/// Names matched by a set of patterns, plus the patterns that were rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    names: BTreeSet<String>,
    rejected: Vec<PatternError>,
}

impl Selection {
    /// Matched names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Patterns that failed to compile.
    #[must_use]
    pub fn rejected(&self) -> &[PatternError] {
        &self.rejected
    }

    /// Splits into the sorted names and the rejected patterns.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<PatternError>) {
        (self.names.into_iter().collect(), self.rejected)
    }
}

/// Selects the keys matched by any of `patterns`.
///
/// No patterns selects every key. A pattern that fails to compile is recorded
/// in [`Selection::rejected`] and the remaining patterns still contribute.
pub fn select<'k, K, S>(keys: K, patterns: &[S], mode: MatchMode) -> Selection
where
    K: IntoIterator<Item = &'k str>,
    S: AsRef<str>,
{
    let keys: Vec<&str> = keys.into_iter().collect();
    if patterns.is_empty() {
        return Selection {
            names: keys.into_iter().map(str::to_owned).collect(),
            rejected: Vec::new(),
        };
    }

    let mut selection = Selection::default();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        match PatternMatcher::compile(pattern, mode) {
            Ok(matcher) => selection.names.extend(
                keys.iter()
                    .filter(|key| matcher.is_match(key))
                    .map(|key| (*key).to_owned()),
            ),
            Err(err) => {
                warn!(pattern, %err, "rejecting malformed pattern");
                selection.rejected.push(err);
            }
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    const KEYS: [&str; 5] = [
        "sys.doc",
        "sys.list_functions",
        "sysctl.get",
        "user.info",
        "jinja",
    ];

    fn names(selection: Selection) -> Vec<String> {
        selection.into_parts().0
    }

    #[test]
    fn no_patterns_selects_everything_sorted() {
        let selection = select(KEYS, &[] as &[&str], MatchMode::Doc);
        assert_eq!(
            names(selection),
            ["jinja", "sys.doc", "sys.list_functions", "sysctl.get", "user.info"]
        );
    }

    #[test]
    fn doc_prefix_stops_at_dot_boundary() {
        assert_eq!(
            names(select(KEYS, &["sys"], MatchMode::Doc)),
            ["sys.doc", "sys.list_functions"]
        );
        assert_eq!(
            names(select(KEYS, &["sys."], MatchMode::Doc)),
            ["sys.doc", "sys.list_functions"]
        );
    }

    #[test]
    fn doc_exact_name_matches() {
        assert_eq!(names(select(KEYS, &["user.info"], MatchMode::Doc)), ["user.info"]);
        assert_eq!(names(select(KEYS, &["jinja"], MatchMode::Doc)), ["jinja"]);
    }

    #[test]
    fn prefix_mode_uses_raw_starts_with() {
        assert_eq!(
            names(select(KEYS, &["sys"], MatchMode::Prefix)),
            ["sys.doc", "sys.list_functions", "sysctl.get"]
        );
    }

    #[test]
    fn glob_selects_module_members() {
        for mode in [MatchMode::Doc, MatchMode::Prefix, MatchMode::Glob] {
            assert_eq!(
                names(select(KEYS, &["sys.*"], mode)),
                ["sys.doc", "sys.list_functions"],
                "{mode:?}"
            );
        }
    }

    #[test]
    fn double_star_behaves_like_single_star() {
        for mode in [MatchMode::Doc, MatchMode::Prefix, MatchMode::Glob] {
            assert_eq!(
                names(select(KEYS, &["sys.**"], mode)),
                ["sys.doc", "sys.list_functions"],
                "{mode:?}"
            );
            assert_eq!(names(select(KEYS, &["**.info"], mode)), ["user.info"], "{mode:?}");
            assert_eq!(
                names(select(KEYS, &["sys**"], mode)),
                ["sys.doc", "sys.list_functions", "sysctl.get"],
                "{mode:?}"
            );
        }
    }

    #[test]
    fn stars_inside_classes_are_untouched() {
        assert_eq!(collapse_stars("sys.**"), "sys.*");
        assert_eq!(collapse_stars("[**]x**"), "[**]x*");
        assert_eq!(collapse_stars("[]**]**"), "[]**]*");
        assert!(matches!(collapse_stars("sys.*"), Cow::Borrowed("sys.*")));
    }

    #[test]
    fn pattern_error_can_be_built_by_collaborators() {
        let err = PatternError::new("pkg.[", "unterminated class");
        assert_eq!(err.pattern(), "pkg.[");
        assert_eq!(err.reason(), "unterminated class");
        assert_eq!(err.to_string(), "invalid pattern `pkg.[`: unterminated class");
    }

    #[test]
    fn question_mark_and_class_are_wildcards() {
        assert_eq!(names(select(KEYS, &["sys.do?"], MatchMode::Doc)), ["sys.doc"]);
        assert_eq!(
            names(select(KEYS, &["[su]*.*"], MatchMode::Doc)),
            ["sys.doc", "sys.list_functions", "sysctl.get", "user.info"]
        );
    }

    #[test]
    fn glob_mode_plain_pattern_is_exact() {
        assert!(select(KEYS, &["sys"], MatchMode::Glob).is_empty());
        assert_eq!(names(select(KEYS, &["jinja"], MatchMode::Glob)), ["jinja"]);
    }

    #[test]
    fn glob_is_case_sensitive() {
        assert!(select(KEYS, &["SYS.*"], MatchMode::Doc).is_empty());
    }

    #[test]
    fn patterns_union_without_duplicates() {
        let selection = select(KEYS, &["sys.*", "sys.doc", "user"], MatchMode::Doc);
        assert_eq!(
            names(selection),
            ["sys.doc", "sys.list_functions", "user.info"]
        );
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        assert!(select(KEYS, &[""], MatchMode::Doc).is_empty());
        assert!(select(KEYS, &[""], MatchMode::Prefix).is_empty());
        assert!(select(KEYS, &[""], MatchMode::Glob).is_empty());
    }

    #[test]
    fn malformed_glob_is_rejected_per_pattern() {
        let selection = select(KEYS, &["sys.[", "user"], MatchMode::Doc);
        assert_eq!(selection.rejected().len(), 1);
        assert_eq!(selection.rejected()[0].pattern(), "sys.[");
        assert_eq!(names(selection), ["user.info"]);
    }

    #[test]
    fn unmatched_pattern_is_not_an_error() {
        let selection = select(KEYS, &["network"], MatchMode::Doc);
        assert!(selection.is_empty());
        assert!(selection.rejected().is_empty());
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z]{1,6}(\\.[a-z_]{1,8})?").expect("valid regex")
    }

    fn pattern_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-z]{0,4}\\.?[a-z*?]{0,3}").expect("valid regex")
    }

    proptest! {
        #[test]
        fn selection_is_sorted_and_unique(
            keys in prop::collection::btree_set(key_strategy(), 0..24),
            patterns in prop::collection::vec(pattern_strategy(), 0..4),
        ) {
            for mode in [MatchMode::Doc, MatchMode::Prefix, MatchMode::Glob] {
                let (selected, _) = select(keys.iter().map(String::as_str), patterns.as_slice(), mode).into_parts();
                let mut expected = selected.clone();
                expected.sort();
                expected.dedup();
                prop_assert_eq!(&selected, &expected);
                prop_assert!(selected.iter().all(|name| keys.contains(name)));
            }
        }

        #[test]
        fn every_key_matches_itself(keys in prop::collection::btree_set(key_strategy(), 1..24)) {
            for key in &keys {
                let (selected, _) = select(keys.iter().map(String::as_str), &[key], MatchMode::Doc).into_parts();
                prop_assert!(selected.contains(key));
            }
        }

        #[test]
        fn selection_is_idempotent(
            keys in prop::collection::btree_set(key_strategy(), 0..24),
            patterns in prop::collection::vec(pattern_strategy(), 0..4),
        ) {
            let first = select(keys.iter().map(String::as_str), patterns.as_slice(), MatchMode::Doc);
            let second = select(keys.iter().map(String::as_str), patterns.as_slice(), MatchMode::Doc);
            prop_assert_eq!(first, second);
        }
    }
}
