//! Host-side navigation.
//!
//! Builds the tree the engine starts from, the way the documentation host
//! would: either every page nested by directory, or the host's own nav
//! config with its rest placeholders already expanded.

use std::collections::{HashMap, HashSet};

use arrange_meta::{NavEntry, RestSelector};
use arrange_storage::{FileIndex, SourceFile};
use serde::Deserialize;

use crate::NavWarning;
use crate::title::humanize;
use crate::tree::{NavNode, Navigation, SectionId};

/// Name this engine is listed under in the host's plugin list.
pub const PLUGIN_NAME: &str = "arrange";

/// One entry of the host's ordered plugin list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostPlugin {
    pub name: String,
    /// The plugin rewrites the navigation, so it must run after this engine.
    #[serde(default)]
    pub handles_nav: bool,
}

impl HostPlugin {
    #[must_use]
    pub fn new(name: impl Into<String>, handles_nav: bool) -> Self {
        Self {
            name: name.into(),
            handles_nav,
        }
    }
}

/// Warn about nav-handling plugins listed before this engine.
///
/// Nothing is reported when the engine itself is not in the list.
#[must_use]
pub fn check_plugin_order(plugins: &[HostPlugin]) -> Vec<NavWarning> {
    let Some(position) = plugins.iter().position(|p| p.name == PLUGIN_NAME) else {
        return Vec::new();
    };
    plugins[..position]
        .iter()
        .filter(|p| p.handles_nav)
        .map(|p| NavWarning::PluginOrder {
            plugin: p.name.clone(),
        })
        .collect()
}

/// Input tree for one build.
#[derive(Debug, Default)]
pub struct HostTree {
    pub roots: Vec<NavNode>,
    /// Sections authored in the host nav config.
    pub explicit: HashSet<SectionId>,
}

/// Default navigation: every page, nested by directory in site order.
pub fn tree_from_files(nav: &mut Navigation, files: &dyn FileIndex) -> HostTree {
    HostTree {
        roots: nest_pages(nav, files.files().iter().filter(|f| f.is_page())),
        explicit: HashSet::new(),
    }
}

/// Navigation from the host nav config.
///
/// `rest` holds the pages each host-level rest selector claimed. Groups
/// become explicit sections. A leaf naming a page adds that page; naming it
/// again reuses the same page and keeps the title of the first reference.
/// Any other leaf becomes a link.
pub fn tree_from_config(
    nav: &mut Navigation,
    entries: &[NavEntry],
    files: &dyn FileIndex,
    rest: &HashMap<RestSelector, Vec<&SourceFile>>,
) -> HostTree {
    let mut builder = ConfigBuilder {
        nav,
        files,
        rest,
        explicit: HashSet::new(),
    };
    let roots = builder.build(entries);
    HostTree {
        roots,
        explicit: builder.explicit,
    }
}

/// Normalize a host nav leaf into a source path.
pub(crate) fn leaf_path(value: &str) -> String {
    let path = value.replace('\\', "/");
    path.trim_start_matches("./").to_owned()
}

struct ConfigBuilder<'a> {
    nav: &'a mut Navigation,
    files: &'a dyn FileIndex,
    rest: &'a HashMap<RestSelector, Vec<&'a SourceFile>>,
    explicit: HashSet<SectionId>,
}

impl ConfigBuilder<'_> {
    fn build(&mut self, entries: &[NavEntry]) -> Vec<NavNode> {
        let mut out = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                NavEntry::Leaf { value, title } => out.push(self.leaf(value, title.as_deref())),
                NavEntry::Group { title, children } => {
                    let children = self.build(children);
                    let id = self.nav.add_section(Some(title.clone()), children);
                    self.explicit.insert(id);
                    out.push(NavNode::Section(id));
                }
                NavEntry::Rest(selector) => {
                    let matched = self.rest.get(selector).map_or(&[][..], Vec::as_slice);
                    if selector.is_flat() {
                        out.extend(
                            matched
                                .iter()
                                .map(|file| NavNode::Page(self.nav.add_page(file.src_path.as_str(), file.is_homepage()))),
                        );
                    } else {
                        out.extend(nest_pages(self.nav, matched.iter().copied()));
                    }
                }
            }
        }
        out
    }

    fn leaf(&mut self, value: &str, title: Option<&str>) -> NavNode {
        let path = leaf_path(value);
        let Some(file) = self.files.get(&path).filter(|file| file.is_page()) else {
            return NavNode::Link(self.nav.add_link(title.map(str::to_owned), value));
        };
        if let Some(id) = self.nav.find_page(&path) {
            return NavNode::Page(id);
        }
        let id = self.nav.add_page(path, file.is_homepage());
        self.nav.page_mut(id).title = title.map(str::to_owned);
        NavNode::Page(id)
    }
}

/// Nest pages into directory sections, one per directory level, titled from
/// the directory name. Directories appear where their first page does.
pub fn nest_pages<'f>(
    nav: &mut Navigation,
    pages: impl IntoIterator<Item = &'f SourceFile>,
) -> Vec<NavNode> {
    let mut root = DirTree::default();
    for file in pages {
        let dir = file.src_path.rsplit_once('/').map_or("", |(dir, _)| dir);
        root.insert(file, dir);
    }
    root.build(nav)
}

#[derive(Default)]
struct DirTree<'f> {
    entries: Vec<DirEntry<'f>>,
    dirs: HashMap<&'f str, usize>,
}

enum DirEntry<'f> {
    Page(&'f SourceFile),
    Dir(&'f str, DirTree<'f>),
}

impl<'f> DirTree<'f> {
    /// Insert `file` below this level; `dir` is its directory relative to it.
    fn insert(&mut self, file: &'f SourceFile, dir: &'f str) {
        if dir.is_empty() {
            self.entries.push(DirEntry::Page(file));
            return;
        }
        let (name, rest) = dir.split_once('/').unwrap_or((dir, ""));
        let index = match self.dirs.get(name) {
            Some(&index) => index,
            None => {
                self.entries.push(DirEntry::Dir(name, DirTree::default()));
                self.dirs.insert(name, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        if let DirEntry::Dir(_, tree) = &mut self.entries[index] {
            tree.insert(file, rest);
        }
    }

    fn build(self, nav: &mut Navigation) -> Vec<NavNode> {
        let mut out = Vec::with_capacity(self.entries.len());
        for entry in self.entries {
            match entry {
                DirEntry::Page(file) => {
                    out.push(NavNode::Page(nav.add_page(file.src_path.as_str(), file.is_homepage())));
                }
                DirEntry::Dir(name, tree) => {
                    let children = tree.build(nav);
                    out.push(NavNode::Section(nav.add_section(Some(humanize(name)), children)));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use arrange_storage::MockFiles;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::testing::render;

    #[test]
    fn test_plugin_order() {
        let plugins = [
            HostPlugin::new("search", false),
            HostPlugin::new("section-index", true),
            HostPlugin::new(PLUGIN_NAME, false),
            HostPlugin::new("literate-nav", true),
        ];
        assert_eq!(
            check_plugin_order(&plugins),
            vec![NavWarning::PluginOrder {
                plugin: "section-index".to_owned()
            }]
        );
        assert!(check_plugin_order(&plugins[..2]).is_empty());
    }

    #[test]
    fn test_tree_from_files() {
        let files = MockFiles::new().with_pages([
            "index.md",
            "z.md",
            "getting-started/install.md",
            "getting-started/usage/basics.md",
            "api/ref.md",
        ]);
        let mut nav = Navigation::new();
        let tree = tree_from_files(&mut nav, &files);
        assert!(tree.explicit.is_empty());
        assert_eq!(
            render(&nav, &tree.roots),
            vec![
                "index.md",
                "z.md",
                "Api[api/ref.md]",
                "Getting started[getting-started/install.md, Usage[getting-started/usage/basics.md]]",
            ]
        );
        let NavNode::Page(index) = tree.roots[0] else {
            panic!("expected a page");
        };
        assert!(nav.page(index).is_homepage);
    }

    #[test]
    fn test_nest_pages_rebuilds_full_chain() {
        let files = MockFiles::new().with_pages(["a/1.md", "a/aa/1.md", "b/1.md"]);
        let mut nav = Navigation::new();
        let roots = nest_pages(&mut nav, files.files().iter());
        assert_eq!(
            render(&nav, &roots),
            vec!["A[a/1.md, Aa[a/aa/1.md]]", "B[b/1.md]"]
        );
    }

    #[test]
    fn test_tree_from_config() {
        let files = MockFiles::new().with_pages(["1.md", "2.md", "a/3.md", "a/4.md"]);
        let entries = NavEntry::list_from_yaml_str(
            "- 2.md\n- Again: 2.md\n- Group:\n    - One: 1.md\n- Site: https://example.com\n- missing.md\n- ...\n",
            "nav.yaml",
        )
        .unwrap();
        let selector = RestSelector::all();
        let rest = HashMap::from([(selector, files.files()[2..].iter().collect())]);

        let mut nav = Navigation::new();
        let tree = tree_from_config(&mut nav, &entries, &files, &rest);

        assert_eq!(
            render(&nav, &tree.roots),
            vec![
                "2.md",
                "2.md",
                "Group[1.md=One]",
                "Site -> https://example.com",
                " -> missing.md",
                "A[a/3.md, a/4.md]",
            ]
        );
        assert_eq!(tree.roots[0], tree.roots[1]);
        assert_eq!(tree.explicit.len(), 1);
        let NavNode::Section(generated) = tree.roots[5] else {
            panic!("expected a section");
        };
        assert!(!tree.explicit.contains(&generated));
    }

    #[test]
    fn test_flat_rest() {
        let files = MockFiles::new().with_pages(["a/1.md", "b/2.md"]);
        let entries = NavEntry::list_from_yaml_str("- ... | flat\n", "nav.yaml").unwrap();
        let NavEntry::Rest(selector) = &entries[0] else {
            panic!("expected a rest entry");
        };
        let rest = HashMap::from([(selector.clone(), files.files().iter().collect())]);

        let mut nav = Navigation::new();
        let tree = tree_from_config(&mut nav, &entries, &files, &rest);
        assert_eq!(render(&nav, &tree.roots), vec!["a/1.md", "b/2.md"]);
    }

    #[test]
    fn test_leaf_path() {
        assert_eq!(leaf_path("./a/b.md"), "a/b.md");
        assert_eq!(leaf_path("a\\b.md"), "a/b.md");
    }
}
