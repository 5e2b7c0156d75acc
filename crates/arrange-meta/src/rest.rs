//! Rest selectors: the `...` entries of a navigation list.
//!
//! A rest selector stands for "every sibling not listed explicitly",
//! optionally narrowed by a glob or regular expression:
//!
//! - `...` matches everything
//! - `... | *.md` and `... | glob=*.md` match with extended globbing
//! - `... | regex=^v\d+` matches when the regex is found anywhere in the path
//! - `... | flat | <pattern>` splices matches without their directory sections
//!
//! The pattern clause always comes last and consumes the rest of the string.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use glob::{MatchOptions, Pattern};
use regex::Regex;

use crate::MetaError;

/// The bare rest token.
pub const REST_TOKEN: &str = "...";

static REST_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\.{3}\s*(?:\|\s*(flat)\s*)?\s*(?:\|\s*(?:(regex|glob)=)?(.*))?")
        .expect("rest grammar is a valid regex")
});

/// `*` never crosses a path separator and does not match hidden names;
/// `**` as a whole component matches any number of directories.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// How a rest selector picks its matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestKind {
    /// Matches every candidate, including items without a path.
    All,
    /// Extended glob over the forward-slash path.
    Glob,
    /// Regular expression searched anywhere in the forward-slash path.
    Regex,
}

#[derive(Debug, Clone)]
enum Matcher {
    All,
    Glob(Pattern),
    Regex(Regex),
}

/// A parsed `...` entry.
///
/// Equality and hashing only consider the kind and the pattern, which is what
/// duplicate detection needs: `...` and `... | flat` collide.
#[derive(Debug, Clone)]
pub struct RestSelector {
    raw: String,
    kind: RestKind,
    pattern: Option<String>,
    flat: bool,
    matcher: Matcher,
}

impl RestSelector {
    /// The bare `...` selector.
    #[must_use]
    pub fn all() -> Self {
        Self {
            raw: REST_TOKEN.to_owned(),
            kind: RestKind::All,
            pattern: None,
            flat: false,
            matcher: Matcher::All,
        }
    }

    /// Check whether a navigation string is a rest entry.
    #[must_use]
    pub fn is_rest(value: &str) -> bool {
        REST_GRAMMAR.is_match(value)
    }

    /// Parse a navigation string as a rest selector.
    ///
    /// Returns `Ok(None)` when the string is an ordinary entry. Patterns are
    /// compiled here so a bad glob or regex fails before any matching happens.
    pub fn parse(value: &str, context: &str) -> Result<Option<Self>, MetaError> {
        let Some(caps) = REST_GRAMMAR.captures(value) else {
            return Ok(None);
        };

        let flat = caps.get(1).is_some();
        let pattern = caps.get(3).map(|m| m.as_str().to_owned());
        let kind = match (caps.get(2).map(|m| m.as_str()), &pattern) {
            (Some("regex"), _) => RestKind::Regex,
            (Some(_), _) | (None, Some(_)) => RestKind::Glob,
            (None, None) => RestKind::All,
        };

        let invalid = |message: String| MetaError::InvalidPattern {
            pattern: pattern.clone().unwrap_or_default(),
            message,
            context: context.to_owned(),
        };
        let source = pattern.as_deref().unwrap_or_default();
        let matcher = match kind {
            RestKind::All => Matcher::All,
            RestKind::Glob => Matcher::Glob(Pattern::new(source).map_err(|e| invalid(e.to_string()))?),
            RestKind::Regex => Matcher::Regex(Regex::new(source).map_err(|e| invalid(e.to_string()))?),
        };

        Ok(Some(Self {
            raw: value.to_owned(),
            kind,
            pattern,
            flat,
            matcher,
        }))
    }

    /// The entry as written in the metadata file.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn kind(&self) -> RestKind {
        self.kind
    }

    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Whether matches are spliced without their directory sections.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Test a candidate path against this selector.
    ///
    /// `None` stands for items without a path (links); only [`RestKind::All`]
    /// matches those. Backslashes are normalized to forward slashes first.
    #[must_use]
    pub fn matches(&self, path: Option<&str>) -> bool {
        match (&self.matcher, path) {
            (Matcher::All, _) => true,
            (_, None) => false,
            (Matcher::Glob(pattern), Some(path)) => {
                pattern.matches_with(&normalize(path), GLOB_OPTIONS)
            }
            (Matcher::Regex(regex), Some(path)) => regex.is_match(&normalize(path)),
        }
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

impl PartialEq for RestSelector {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.pattern == other.pattern
    }
}

impl Eq for RestSelector {}

impl Hash for RestSelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.pattern.hash(state);
    }
}

impl fmt::Display for RestSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The rest selectors of one navigation list, in match precedence order.
///
/// Pattern selectors are tried in the order they were written; the
/// match-all selector, wherever it appears, is tried last.
#[derive(Debug, Default)]
pub struct RestSelectors<'a> {
    patterns: Vec<&'a RestSelector>,
    all: Option<&'a RestSelector>,
}

impl<'a> RestSelectors<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, selector: &'a RestSelector) {
        match selector.kind {
            RestKind::All => self.all = Some(selector),
            RestKind::Glob | RestKind::Regex => self.patterns.push(selector),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.all.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len() + usize::from(self.all.is_some())
    }

    /// Selectors in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &'a RestSelector> + '_ {
        self.patterns.iter().copied().chain(self.all)
    }

    /// The first selector claiming `path`, if any.
    #[must_use]
    pub fn first_match(&self, path: Option<&str>) -> Option<&'a RestSelector> {
        self.iter().find(|selector| selector.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest(value: &str) -> RestSelector {
        RestSelector::parse(value, ".pages").unwrap().unwrap()
    }

    #[test]
    fn test_parse_bare_token() {
        let selector = rest("...");
        assert_eq!(selector.kind(), RestKind::All);
        assert_eq!(selector.pattern(), None);
        assert!(!selector.is_flat());
    }

    #[test]
    fn test_parse_not_rest() {
        assert!(RestSelector::parse("index.md", ".pages").unwrap().is_none());
        assert!(RestSelector::parse("a/...", ".pages").unwrap().is_none());
        assert!(!RestSelector::is_rest(".."));
    }

    #[test]
    fn test_parse_implicit_glob() {
        let selector = rest("... | *.md");
        assert_eq!(selector.kind(), RestKind::Glob);
        assert_eq!(selector.pattern(), Some("*.md"));
    }

    #[test]
    fn test_parse_explicit_kinds() {
        assert_eq!(rest("... | glob=a*").kind(), RestKind::Glob);
        let regex = rest(r"... | regex=^\d+\.md$");
        assert_eq!(regex.kind(), RestKind::Regex);
        assert_eq!(regex.pattern(), Some(r"^\d+\.md$"));
    }

    #[test]
    fn test_parse_flat() {
        let selector = rest("... | flat");
        assert!(selector.is_flat());
        assert_eq!(selector.kind(), RestKind::All);

        let selector = rest("...|flat|regex=x");
        assert!(selector.is_flat());
        assert_eq!(selector.kind(), RestKind::Regex);
        assert_eq!(selector.pattern(), Some("x"));
    }

    #[test]
    fn test_pattern_keeps_trailing_whitespace() {
        assert_eq!(rest("... | a b ").pattern(), Some("a b "));
    }

    #[test]
    fn test_invalid_regex_fails_at_parse() {
        let err = RestSelector::parse("... | regex=(", "a/.pages").unwrap_err();
        assert!(matches!(err, MetaError::InvalidPattern { .. }));
        assert!(err.to_string().contains("a/.pages"));
    }

    #[test]
    fn test_invalid_glob_fails_at_parse() {
        let err = RestSelector::parse("... | [", ".pages").unwrap_err();
        assert!(matches!(err, MetaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_all_matches_everything() {
        let selector = RestSelector::all();
        assert!(selector.matches(Some("a.md")));
        assert!(selector.matches(None));
    }

    #[test]
    fn test_glob_matching() {
        let selector = rest("... | *a.md");
        assert!(selector.matches(Some("1a.md")));
        assert!(!selector.matches(Some("1b.md")));
        assert!(!selector.matches(Some("x/1a.md")));
        assert!(!selector.matches(None));
    }

    #[test]
    fn test_glob_globstar() {
        let selector = rest("... | a/**/2.md");
        assert!(selector.matches(Some("a/2.md")));
        assert!(selector.matches(Some("a/aa/2.md")));
        assert!(!selector.matches(Some("b/2.md")));

        let selector = rest("... | **/1.md");
        assert!(selector.matches(Some("b/1.md")));
        assert!(selector.matches(Some("a/aa/1.md")));
    }

    #[test]
    fn test_glob_does_not_match_directory_prefix() {
        let selector = rest("... | a");
        assert!(!selector.matches(Some("a/1.md")));
        assert!(selector.matches(Some("a")));
    }

    #[test]
    fn test_regex_is_search() {
        let selector = rest(r"... | regex=2\w*\.md");
        assert!(selector.matches(Some("2a.md")));
        assert!(selector.matches(Some("x2.md")));
        assert!(!selector.matches(Some("1.md")));
        assert!(!selector.matches(None));
    }

    #[test]
    fn test_regex_normalizes_separators() {
        let selector = rest(r"... | regex=^a/\w+\.md$");
        assert!(selector.matches(Some(r"a\1.md")));
    }

    #[test]
    fn test_equality_ignores_flat_and_spacing() {
        assert_eq!(rest("..."), rest("... | flat"));
        assert_eq!(rest("... | a*.md"), rest("...|glob=a*.md"));
        assert_ne!(rest("... | a*.md"), rest("... | regex=a*.md"));
        assert_ne!(rest("... | a*.md"), rest("... | b*.md"));
    }

    #[test]
    fn test_selectors_precedence_puts_all_last() {
        let all = rest("...");
        let ones = rest("... | 1*.md");
        let letters = rest("... | *[ab].md");

        let mut selectors = RestSelectors::new();
        selectors.push(&all);
        selectors.push(&ones);
        selectors.push(&letters);

        assert_eq!(selectors.len(), 3);
        assert_eq!(selectors.first_match(Some("1a.md")), Some(&ones));
        assert_eq!(selectors.first_match(Some("2a.md")), Some(&letters));
        assert_eq!(selectors.first_match(Some("2.md")), Some(&all));
        assert_eq!(selectors.first_match(None), Some(&all));
    }

    #[test]
    fn test_selectors_without_all_drop_unmatched() {
        let ones = rest("... | 1*.md");
        let mut selectors = RestSelectors::new();
        selectors.push(&ones);
        assert!(selectors.first_match(Some("2.md")).is_none());
    }
}
