//! Explicit `nav` arrangement of one level.
//!
//! The entries are first resolved against the level's children into an
//! intermediate list that still holds rest placeholders. Unreferenced
//! children are then distributed over the placeholders, and a final
//! post-order walk splices them in and materializes groups as virtual
//! sections.

use std::collections::{HashMap, HashSet};

use arrange_meta::{NavEntry, RestSelector, RestSelectors};

use crate::error::Warnings;
use crate::gather::{GatheredMeta, basename};
use crate::tree::{NavNode, Navigation};
use crate::{NavError, NavWarning};

/// Intermediate result of resolving nav entries.
#[derive(Debug)]
enum Arranged<'m> {
    Node(NavNode),
    Group {
        title: &'m str,
        children: Vec<Arranged<'m>>,
    },
    Rest(&'m RestSelector),
}

/// Rearrange `children` according to `entries`.
///
/// Leaves are looked up by the basename of each child's path; when two
/// children share a basename the later one wins. A leaf with a title renames
/// the child it names (the title is shared by every alias of that node). A
/// titled leaf that names no child becomes a link; an untitled one is a
/// [`NavError::NavEntryNotFound`] when `strict`, otherwise a warning.
pub(crate) fn apply_nav(
    nav: &mut Navigation,
    children: Vec<NavNode>,
    entries: &[NavEntry],
    context: &str,
    gathered: &GatheredMeta,
    strict: bool,
    warnings: &mut Warnings,
) -> Result<Vec<NavNode>, NavError> {
    let mut by_basename = HashMap::new();
    for &child in &children {
        if let Some(path) = gathered.item_path(nav, child) {
            by_basename.insert(basename(path).to_owned(), child);
        }
    }

    let mut arranger = Arranger {
        nav,
        by_basename,
        used: HashSet::new(),
        selectors: RestSelectors::new(),
        context,
        strict,
        warnings,
    };
    let arranged = arranger.resolve(entries)?;

    let mut buckets: HashMap<&RestSelector, Vec<NavNode>> = HashMap::new();
    if !arranger.selectors.is_empty() {
        for &child in &children {
            if arranger.used.contains(&child) {
                continue;
            }
            let path = gathered.item_path(arranger.nav, child).map(basename);
            if let Some(selector) = arranger.selectors.first_match(path) {
                buckets.entry(selector).or_default().push(child);
            }
        }
    }

    Ok(splice(arranger.nav, arranged, &mut buckets))
}

struct Arranger<'a, 'm> {
    nav: &'a mut Navigation,
    by_basename: HashMap<String, NavNode>,
    used: HashSet<NavNode>,
    selectors: RestSelectors<'m>,
    context: &'a str,
    strict: bool,
    warnings: &'a mut Warnings,
}

impl<'m> Arranger<'_, 'm> {
    fn resolve(&mut self, entries: &'m [NavEntry]) -> Result<Vec<Arranged<'m>>, NavError> {
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                NavEntry::Rest(selector) => {
                    self.selectors.push(selector);
                    out.push(Arranged::Rest(selector));
                }
                NavEntry::Group { title, children } => out.push(Arranged::Group {
                    title,
                    children: self.resolve(children)?,
                }),
                NavEntry::Leaf { value, title } => {
                    if let Some(&node) = self.by_basename.get(value) {
                        if let Some(title) = title {
                            self.nav.set_title(node, title.as_str());
                        }
                        self.used.insert(node);
                        out.push(Arranged::Node(node));
                    } else if let Some(title) = title {
                        let link = self.nav.add_link(Some(title.clone()), value.as_str());
                        out.push(Arranged::Node(NavNode::Link(link)));
                    } else {
                        self.not_found(value)?;
                    }
                }
            }
        }
        Ok(out)
    }

    fn not_found(&mut self, entry: &str) -> Result<(), NavError> {
        let entry = entry.to_owned();
        let context = self.context.to_owned();
        if self.strict {
            return Err(NavError::NavEntryNotFound { entry, context });
        }
        self.warnings
            .push(NavWarning::NavEntryNotFound { entry, context });
        Ok(())
    }
}

/// Replace placeholders with their matches and turn groups into virtual
/// sections, innermost first.
fn splice(
    nav: &mut Navigation,
    arranged: Vec<Arranged<'_>>,
    buckets: &mut HashMap<&RestSelector, Vec<NavNode>>,
) -> Vec<NavNode> {
    let mut out = Vec::with_capacity(arranged.len());
    for item in arranged {
        match item {
            Arranged::Node(node) => out.push(node),
            Arranged::Rest(selector) => out.extend(buckets.remove(selector).unwrap_or_default()),
            Arranged::Group { title, children } => {
                let children = splice(nav, children, buckets);
                out.push(NavNode::Section(nav.add_virtual_section(title, children)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;

    use super::*;
    use crate::testing::render;

    fn entries(yaml: &str) -> Vec<NavEntry> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let Value::Sequence(items) = value else {
            panic!("expected a list");
        };
        NavEntry::list_from_yaml(&items, "a/.pages").unwrap()
    }

    struct Fixture {
        nav: Navigation,
        children: Vec<NavNode>,
        warnings: Warnings,
    }

    impl Fixture {
        fn pages(paths: &[&str]) -> Self {
            let mut nav = Navigation::new();
            let children = paths
                .iter()
                .map(|path| NavNode::Page(nav.add_page(*path, false)))
                .collect();
            Self {
                nav,
                children,
                warnings: Warnings::default(),
            }
        }

        fn apply(&mut self, yaml: &str, strict: bool) -> Result<Vec<NavNode>, NavError> {
            let entries = entries(yaml);
            apply_nav(
                &mut self.nav,
                self.children.clone(),
                &entries,
                "a/.pages",
                &GatheredMeta::default(),
                strict,
                &mut self.warnings,
            )
        }

        fn render(&self, nodes: &[NavNode]) -> Vec<String> {
            render(&self.nav, nodes)
        }
    }

    #[test]
    fn test_listed_items_only() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md", "a/3.md"]);
        let result = fixture.apply("[3.md, 1.md]", true).unwrap();
        assert_eq!(fixture.render(&result), vec!["a/3.md", "a/1.md"]);
    }

    #[test]
    fn test_rest_keeps_current_order() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md", "a/3.md", "a/4.md"]);
        let result = fixture.apply("[3.md, ..., 1.md]", true).unwrap();
        assert_eq!(
            fixture.render(&result),
            vec!["a/3.md", "a/2.md", "a/4.md", "a/1.md"]
        );
    }

    #[test]
    fn test_rest_with_nothing_left() {
        let mut fixture = Fixture::pages(&["a/1.md"]);
        let result = fixture.apply("[1.md, ...]", true).unwrap();
        assert_eq!(fixture.render(&result), vec!["a/1.md"]);
    }

    #[test]
    fn test_pattern_precedence_over_match_all() {
        let mut fixture = Fixture::pages(&["a/1a.md", "a/2a.md", "a/1b.md", "a/2b.md", "a/c.md"]);
        let result = fixture
            .apply("[..., '... | 1*.md', '... | regex=b\\.md$']", true)
            .unwrap();
        assert_eq!(
            fixture.render(&result),
            vec!["a/2a.md", "a/c.md", "a/1a.md", "a/1b.md", "a/2b.md"]
        );
    }

    #[test]
    fn test_unmatched_children_are_dropped_without_match_all() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/x.md"]);
        let result = fixture.apply("['... | [0-9].md']", true).unwrap();
        assert_eq!(fixture.render(&result), vec!["a/1.md"]);
    }

    #[test]
    fn test_rest_matches_basename() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md"]);
        let result = fixture.apply("['... | a/*.md']", true).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_title_override_and_links() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md"]);
        let result = fixture
            .apply("[{One: 1.md}, {Site: 'https://example.com'}, 2.md]", true)
            .unwrap();
        assert_eq!(
            fixture.render(&result),
            vec!["a/1.md=One", "Site -> https://example.com", "a/2.md"]
        );
    }

    #[test]
    fn test_groups_become_virtual_sections() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md", "a/3.md"]);
        let result = fixture
            .apply("[{G: [2.md, {Inner: [...]}]}, 1.md]", true)
            .unwrap();
        assert_eq!(
            fixture.render(&result),
            vec!["G[a/2.md, Inner[a/3.md]]", "a/1.md"]
        );
        let NavNode::Section(id) = result[0] else {
            panic!("expected a section");
        };
        assert!(fixture.nav.section(id).is_virtual);
    }

    #[test]
    fn test_duplicate_entry_aliases_the_page() {
        let mut fixture = Fixture::pages(&["a/1.md", "a/2.md"]);
        let result = fixture.apply("[1.md, 2.md, {Again: 1.md}]", true).unwrap();
        assert_eq!(result[0], result[2]);
        assert_eq!(
            fixture.render(&result),
            vec!["a/1.md=Again", "a/2.md", "a/1.md=Again"]
        );
    }

    #[test]
    fn test_duplicate_basename_last_wins() {
        let mut fixture = Fixture::pages(&["a/x/1.md", "a/y/1.md"]);
        let result = fixture.apply("[1.md]", true).unwrap();
        assert_eq!(fixture.render(&result), vec!["a/y/1.md"]);
    }

    #[test]
    fn test_not_found_strict() {
        let mut fixture = Fixture::pages(&["a/1.md"]);
        let err = fixture.apply("[1.md, missing.md]", true).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nav entry \"missing.md\" not found. [a/.pages]"
        );
    }

    #[test]
    fn test_not_found_lenient() {
        let mut fixture = Fixture::pages(&["a/1.md"]);
        let result = fixture.apply("[missing.md, 1.md]", false).unwrap();
        assert_eq!(fixture.render(&result), vec!["a/1.md"]);
        let warnings = std::mem::take(&mut fixture.warnings).into_vec();
        assert_eq!(
            warnings,
            vec![NavWarning::NavEntryNotFound {
                entry: "missing.md".to_owned(),
                context: "a/.pages".to_owned(),
            }]
        );
    }
}
