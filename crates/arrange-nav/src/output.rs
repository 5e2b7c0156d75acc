//! Serializable view of a build result.
//!
//! Titles are fully resolved and page links are expressed as source paths,
//! so the view can be written out as JSON without the arena.

use arrange_storage::FileIndex;
use serde::Serialize;

use crate::NavError;
use crate::session::NavigationResult;
use crate::title::TitleResolver;
use crate::tree::{NavNode, PageId, SectionId};

/// Arranged navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationOutput {
    /// Top-level navigation items.
    pub items: Vec<NavItemOutput>,
    /// Pages in reading order.
    pub pages: Vec<PageOutput>,
}

/// Navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavItemOutput {
    Page {
        title: String,
        src_path: String,
    },
    Section {
        title: String,
        children: Vec<NavItemOutput>,
    },
    Link {
        title: String,
        url: String,
    },
}

/// One position in the reading order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageOutput {
    pub src_path: String,
    pub title: String,
    /// Source path of the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Source path of the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Title of the enclosing section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl NavigationResult {
    /// Build the serializable view.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Storage`] when a page without an assigned title
    /// cannot be read.
    pub fn to_output(&self, files: &dyn FileIndex) -> Result<NavigationOutput, NavError> {
        let titles = TitleResolver::new(files);
        let items = self.items_output(&titles, &self.items)?;

        let mut pages = Vec::with_capacity(self.pages.len());
        for &id in &self.pages {
            let page = self.nav.page(id);
            pages.push(PageOutput {
                src_path: page.src_path.clone(),
                title: titles.page_title(page)?,
                previous: page.previous.map(|p| self.src_path(p)),
                next: page.next.map(|p| self.src_path(p)),
                parent: page.parent.map(|s| self.section_title(&titles, s)),
            });
        }

        Ok(NavigationOutput { items, pages })
    }

    fn items_output(
        &self,
        titles: &TitleResolver<'_>,
        nodes: &[NavNode],
    ) -> Result<Vec<NavItemOutput>, NavError> {
        nodes
            .iter()
            .map(|&node| {
                let title = titles.resolve(&self.nav, &self.gathered, node)?;
                Ok(match node {
                    NavNode::Page(id) => NavItemOutput::Page {
                        title,
                        src_path: self.src_path(id),
                    },
                    NavNode::Section(id) => NavItemOutput::Section {
                        title,
                        children: self.items_output(titles, &self.nav.section(id).children)?,
                    },
                    NavNode::Link(id) => NavItemOutput::Link {
                        title,
                        url: self.nav.link(id).url.clone(),
                    },
                })
            })
            .collect()
    }

    fn src_path(&self, id: PageId) -> String {
        self.nav.page(id).src_path.clone()
    }

    fn section_title(&self, titles: &TitleResolver<'_>, id: SectionId) -> String {
        titles
            .resolve(&self.nav, &self.gathered, NavNode::Section(id))
            .unwrap_or_default()
    }
}
