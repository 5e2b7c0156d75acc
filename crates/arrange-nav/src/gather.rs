//! Metadata gathering.
//!
//! Every section level gets the metadata file of the directory its pages live
//! in. The directory is inferred bottom-up: pages contribute their source
//! path, child sections contribute the directory of their own metadata file,
//! and a level has a directory only when all contributions agree on it.

use std::collections::{HashMap, HashSet};

use arrange_meta::Metadata;
use arrange_storage::FileIndex;

use crate::NavError;
use crate::tree::{NavNode, Navigation, SectionId};

/// Metadata for the root level and every directory-backed section.
#[derive(Debug, Default)]
pub struct GatheredMeta {
    pub root: Metadata,
    pub sections: HashMap<SectionId, Metadata>,
    empty: Metadata,
}

impl GatheredMeta {
    #[must_use]
    pub fn new(root: Metadata, sections: HashMap<SectionId, Metadata>) -> Self {
        Self {
            root,
            sections,
            empty: Metadata::default(),
        }
    }

    /// Metadata of a section; sections created after gathering get none.
    #[must_use]
    pub fn section(&self, id: SectionId) -> &Metadata {
        self.sections.get(&id).unwrap_or(&self.empty)
    }

    /// Path a node is matched and sorted by.
    ///
    /// Pages use their source path, sections the directory of their metadata
    /// file. Links and sections without a known directory have none.
    #[must_use]
    pub fn item_path<'a>(&'a self, nav: &'a Navigation, node: NavNode) -> Option<&'a str> {
        match node {
            NavNode::Page(id) => Some(nav.page(id).src_path.as_str()),
            NavNode::Section(id) => self.section(id).dir(),
            NavNode::Link(_) => None,
        }
    }
}

/// Last component of a forward-slash path.
pub(crate) fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Everything before the last `/`; the empty string for top-level names.
pub(crate) fn dirname(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Load metadata for every level of the tree rooted at `roots`.
///
/// Explicit sections (groups of the host nav config) get empty metadata and
/// contribute nothing to their parent's directory.
pub fn gather(
    nav: &Navigation,
    roots: &[NavNode],
    files: &dyn FileIndex,
    filename: &str,
    explicit: &HashSet<SectionId>,
) -> Result<GatheredMeta, NavError> {
    let mut gatherer = Gatherer {
        nav,
        files,
        filename,
        explicit,
        sections: HashMap::new(),
    };
    let root = gatherer.gather_level(roots)?;
    Ok(GatheredMeta::new(root, gatherer.sections))
}

struct Gatherer<'a> {
    nav: &'a Navigation,
    files: &'a dyn FileIndex,
    filename: &'a str,
    explicit: &'a HashSet<SectionId>,
    sections: HashMap<SectionId, Metadata>,
}

impl Gatherer<'_> {
    fn gather_level(&mut self, items: &[NavNode]) -> Result<Metadata, NavError> {
        let nav = self.nav;
        let mut paths: Vec<String> = Vec::new();

        for &item in items {
            match item {
                NavNode::Page(id) => paths.push(nav.page(id).src_path.clone()),
                NavNode::Section(id) => {
                    let meta = self.gather_level(&nav.section(id).children)?;
                    if self.explicit.contains(&id) {
                        self.sections.insert(id, Metadata::default());
                        continue;
                    }
                    if let Some(dir) = meta.dir() {
                        paths.push(dir.to_owned());
                    }
                    self.sections.insert(id, meta);
                }
                NavNode::Link(_) => {}
            }
        }

        let rel_path = common_dirname(&paths).map(|dir| join(dir, self.filename));
        self.load(rel_path)
    }

    fn load(&self, rel_path: Option<String>) -> Result<Metadata, NavError> {
        let Some(path) = rel_path else {
            return Ok(Metadata::default());
        };
        if self.files.get(&path).is_none() {
            return Ok(Metadata::empty_at(path));
        }

        match self.files.read(&path) {
            Ok(content) => {
                tracing::debug!(path = %path, "Loading metadata file");
                Ok(Metadata::from_yaml_str(&content, &path)?)
            }
            Err(e) if e.is_not_found() => Ok(Metadata::empty_at(path)),
            Err(e) => Err(e.into()),
        }
    }
}

fn common_dirname(paths: &[String]) -> Option<&str> {
    let (first, rest) = paths.split_first()?;
    let dir = dirname(first);
    rest.iter().all(|path| dirname(path) == dir).then_some(dir)
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_owned()
    } else {
        format!("{dir}/{name}")
    }
}
