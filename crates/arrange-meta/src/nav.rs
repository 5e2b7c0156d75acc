//! Explicit navigation entries.

use std::collections::HashSet;

use serde_yaml::Value;

use crate::error::value_inline;
use crate::{MetaError, RestSelector};

/// One entry of an explicit `nav` list.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEntry {
    /// A reference to a sibling by basename, or a URL.
    ///
    /// `- index.md` has no title; `- Intro: index.md` carries one.
    Leaf { value: String, title: Option<String> },
    /// A titled group of entries, materialized as a virtual section.
    Group { title: String, children: Vec<NavEntry> },
    /// A `...` placeholder.
    Rest(RestSelector),
}

impl NavEntry {
    /// Untitled leaf.
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf {
            value: value.into(),
            title: None,
        }
    }

    /// Titled leaf.
    #[must_use]
    pub fn titled(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            value: value.into(),
            title: Some(title.into()),
        }
    }

    /// Parse one YAML list entry.
    ///
    /// Accepted shapes: a string (leaf or rest selector), or a mapping with a
    /// single string key whose value is a string (titled leaf) or a list
    /// (group).
    pub fn from_yaml(value: &Value, context: &str) -> Result<Self, MetaError> {
        let invalid = || MetaError::InvalidNavItem {
            item: value_inline(value),
            context: context.to_owned(),
        };

        match value {
            Value::String(s) => match RestSelector::parse(s, context)? {
                Some(rest) => Ok(Self::Rest(rest)),
                None => Ok(Self::leaf(s.as_str())),
            },
            Value::Mapping(map) if map.len() == 1 => {
                let Some((Value::String(title), inner)) = map.iter().next() else {
                    return Err(invalid());
                };
                match inner {
                    Value::String(target) => Ok(Self::titled(title.as_str(), target.as_str())),
                    Value::Sequence(items) => Ok(Self::Group {
                        title: title.clone(),
                        children: Self::list_from_yaml(items, context)?,
                    }),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Parse a YAML list of entries, in order.
    pub fn list_from_yaml(items: &[Value], context: &str) -> Result<Vec<Self>, MetaError> {
        items
            .iter()
            .map(|item| Self::from_yaml(item, context))
            .collect()
    }

    /// Reject two rest selectors with the same kind and pattern anywhere in
    /// `entries`, groups included.
    pub fn check_duplicate_rest(entries: &[Self], context: &str) -> Result<(), MetaError> {
        fn walk<'a>(
            entries: &'a [NavEntry],
            seen: &mut HashSet<&'a RestSelector>,
            context: &str,
        ) -> Result<(), MetaError> {
            for entry in entries {
                match entry {
                    NavEntry::Rest(rest) => {
                        if !seen.insert(rest) {
                            return Err(MetaError::DuplicateRestItem {
                                entry: rest.raw().to_owned(),
                                context: context.to_owned(),
                            });
                        }
                    }
                    NavEntry::Group { children, .. } => walk(children, seen, context)?,
                    NavEntry::Leaf { .. } => {}
                }
            }
            Ok(())
        }

        walk(entries, &mut HashSet::new(), context)
    }

    /// Rest selectors in `entries`, groups included, in document order.
    #[must_use]
    pub fn rest_selectors(entries: &[Self]) -> Vec<&RestSelector> {
        let mut out = Vec::new();
        let mut stack: Vec<&[Self]> = vec![entries];
        // Depth-first, preserving document order.
        while let Some(list) = stack.pop() {
            for (i, entry) in list.iter().enumerate() {
                match entry {
                    Self::Rest(rest) => out.push(rest),
                    Self::Group { children, .. } => {
                        stack.push(&list[i + 1..]);
                        stack.push(children);
                        break;
                    }
                    Self::Leaf { .. } => {}
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_list(yaml: &str) -> Result<Vec<NavEntry>, MetaError> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let Value::Sequence(items) = value else {
            panic!("expected a list");
        };
        NavEntry::list_from_yaml(&items, ".pages")
    }

    #[test]
    fn test_parse_string_leaf() {
        let entries = parse_list("- index.md").unwrap();
        assert_eq!(entries, vec![NavEntry::leaf("index.md")]);
    }

    #[test]
    fn test_parse_titled_leaf() {
        let entries = parse_list("- Intro: index.md").unwrap();
        assert_eq!(entries, vec![NavEntry::titled("Intro", "index.md")]);
    }

    #[test]
    fn test_parse_group() {
        let entries = parse_list("- Group:\n    - a.md\n    - ...").unwrap();
        let NavEntry::Group { title, children } = &entries[0] else {
            panic!("expected a group");
        };
        assert_eq!(title, "Group");
        assert_eq!(children.len(), 2);
        assert!(matches!(children[1], NavEntry::Rest(_)));
    }

    #[test]
    fn test_parse_rest() {
        let entries = parse_list("- ... | flat | *.md").unwrap();
        let NavEntry::Rest(rest) = &entries[0] else {
            panic!("expected a rest entry");
        };
        assert!(rest.is_flat());
        assert_eq!(rest.pattern(), Some("*.md"));
    }

    #[test]
    fn test_invalid_entries() {
        for yaml in ["- 1", "- {a: b, c: d}", "- {1: a.md}", "- {a: 2}", "- [a.md]"] {
            let err = parse_list(yaml).unwrap_err();
            assert!(
                matches!(err, MetaError::InvalidNavItem { .. }),
                "{yaml}: {err}"
            );
        }
    }

    #[test]
    fn test_duplicate_rest_top_level() {
        let entries = parse_list("- ...\n- a.md\n- ...").unwrap();
        let err = NavEntry::check_duplicate_rest(&entries, ".pages").unwrap_err();
        assert!(matches!(err, MetaError::DuplicateRestItem { .. }));
    }

    #[test]
    fn test_duplicate_rest_across_groups() {
        let entries = parse_list("- ... | *.md\n- G:\n    - ... | glob=*.md").unwrap();
        assert!(NavEntry::check_duplicate_rest(&entries, ".pages").is_err());
    }

    #[test]
    fn test_flat_and_plain_collide() {
        let entries = parse_list("- ...\n- ... | flat").unwrap();
        assert!(NavEntry::check_duplicate_rest(&entries, ".pages").is_err());
    }

    #[test]
    fn test_distinct_rest_ok() {
        let entries = parse_list("- ...\n- ... | a*\n- ... | regex=a*").unwrap();
        assert!(NavEntry::check_duplicate_rest(&entries, ".pages").is_ok());
    }

    #[test]
    fn test_rest_selectors_document_order() {
        let entries =
            parse_list("- ... | a*\n- G:\n    - ... | b*\n    - H:\n        - ... | c*\n- ...")
                .unwrap();
        let raws: Vec<_> = NavEntry::rest_selectors(&entries)
            .into_iter()
            .map(RestSelector::raw)
            .collect();
        assert_eq!(raws, vec!["... | a*", "... | b*", "... | c*", "..."]);
    }
}
