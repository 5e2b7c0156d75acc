//! Navigation tree arena.
//!
//! Pages, sections, and links are stored in flat vectors and referenced by
//! index handles. A page that appears at two positions of the tree is one
//! [`PageId`] referenced twice, so a title assigned through either position
//! is seen at both.
//!
//! # Architecture
//!
//! - [`Navigation`] owns all node data
//! - [`NavNode`] is a `Copy` handle stored in section child lists and root lists
//! - Parent and previous/next links are plain ids filled in by
//!   [`link_pages`](crate::link_pages)

use std::collections::HashMap;

/// Handle to a page in a [`Navigation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(usize);

/// Handle to a section in a [`Navigation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

/// Handle to a link in a [`Navigation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

/// A position in the navigation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavNode {
    Page(PageId),
    Section(SectionId),
    Link(LinkId),
}

/// Documentation page data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageData {
    /// Source path relative to the docs directory, forward slashes.
    pub src_path: String,
    /// Assigned title. `None` means the title is derived from the file.
    pub title: Option<String>,
    pub is_homepage: bool,
    pub previous: Option<PageId>,
    pub next: Option<PageId>,
    pub parent: Option<SectionId>,
}

/// Section data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionData {
    pub title: Option<String>,
    pub children: Vec<NavNode>,
    /// Created from a nav group rather than a directory.
    pub is_virtual: bool,
    pub parent: Option<SectionId>,
}

/// External link data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkData {
    pub title: Option<String>,
    pub url: String,
    pub parent: Option<SectionId>,
}

/// Arena holding every node of one navigation tree.
#[derive(Clone, Debug, Default)]
pub struct Navigation {
    pages: Vec<PageData>,
    sections: Vec<SectionData>,
    links: Vec<LinkData>,
    page_index: HashMap<String, PageId>,
}

impl Navigation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    ///
    /// [`find_page`](Self::find_page) keeps returning the first page added
    /// for a source path.
    pub fn add_page(&mut self, src_path: impl Into<String>, is_homepage: bool) -> PageId {
        let src_path = src_path.into();
        let id = PageId(self.pages.len());
        self.page_index.entry(src_path.clone()).or_insert(id);
        self.pages.push(PageData {
            src_path,
            title: None,
            is_homepage,
            previous: None,
            next: None,
            parent: None,
        });
        id
    }

    /// Add a directory-backed section.
    pub fn add_section(&mut self, title: Option<String>, children: Vec<NavNode>) -> SectionId {
        self.push_section(title, children, false)
    }

    /// Add a section materialized from a nav group.
    pub fn add_virtual_section(&mut self, title: impl Into<String>, children: Vec<NavNode>) -> SectionId {
        self.push_section(Some(title.into()), children, true)
    }

    fn push_section(&mut self, title: Option<String>, children: Vec<NavNode>, is_virtual: bool) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(SectionData {
            title,
            children,
            is_virtual,
            parent: None,
        });
        id
    }

    pub fn add_link(&mut self, title: Option<String>, url: impl Into<String>) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(LinkData {
            title,
            url: url.into(),
            parent: None,
        });
        id
    }

    #[must_use]
    pub fn page(&self, id: PageId) -> &PageData {
        &self.pages[id.0]
    }

    pub fn page_mut(&mut self, id: PageId) -> &mut PageData {
        &mut self.pages[id.0]
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> &SectionData {
        &self.sections[id.0]
    }

    pub fn section_mut(&mut self, id: SectionId) -> &mut SectionData {
        &mut self.sections[id.0]
    }

    #[must_use]
    pub fn link(&self, id: LinkId) -> &LinkData {
        &self.links[id.0]
    }

    pub fn link_mut(&mut self, id: LinkId) -> &mut LinkData {
        &mut self.links[id.0]
    }

    /// Find a page by source path.
    #[must_use]
    pub fn find_page(&self, src_path: &str) -> Option<PageId> {
        self.page_index.get(src_path).copied()
    }

    /// Assigned title of any node.
    #[must_use]
    pub fn title(&self, node: NavNode) -> Option<&str> {
        match node {
            NavNode::Page(id) => self.page(id).title.as_deref(),
            NavNode::Section(id) => self.section(id).title.as_deref(),
            NavNode::Link(id) => self.link(id).title.as_deref(),
        }
    }

    /// Assign a title to any node. Aliased pages see the change everywhere.
    pub fn set_title(&mut self, node: NavNode, title: impl Into<String>) {
        let title = Some(title.into());
        match node {
            NavNode::Page(id) => self.page_mut(id).title = title,
            NavNode::Section(id) => self.section_mut(id).title = title,
            NavNode::Link(id) => self.link_mut(id).title = title,
        }
    }

    /// Children of a node; empty for pages and links.
    #[must_use]
    pub fn children(&self, node: NavNode) -> &[NavNode] {
        match node {
            NavNode::Section(id) => &self.section(id).children,
            NavNode::Page(_) | NavNode::Link(_) => &[],
        }
    }

    /// Parent section recorded by the last linking pass.
    #[must_use]
    pub fn parent(&self, node: NavNode) -> Option<SectionId> {
        match node {
            NavNode::Page(id) => self.page(id).parent,
            NavNode::Section(id) => self.section(id).parent,
            NavNode::Link(id) => self.link(id).parent,
        }
    }

    pub(crate) fn set_parent(&mut self, node: NavNode, parent: Option<SectionId>) {
        match node {
            NavNode::Page(id) => self.page_mut(id).parent = parent,
            NavNode::Section(id) => self.section_mut(id).parent = parent,
            NavNode::Link(id) => self.link_mut(id).parent = parent,
        }
    }

    /// Take a section's children, leaving it empty.
    pub(crate) fn take_children(&mut self, id: SectionId) -> Vec<NavNode> {
        std::mem::take(&mut self.section_mut(id).children)
    }

    /// Number of pages in the arena (referenced or not).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
