//! Tree processing.
//!
//! Each level is handled top-down in a fixed order: sort the children,
//! apply the explicit `nav` list, recurse into child sections, then decide
//! whether each section is hidden, dropped for being empty, or collapsed.
//!
//! # Collapsing
//!
//! `collapse_single_pages` is inherited: a level's value becomes the default
//! for every section below it. `collapse` applies to its own section only and
//! wins over the inherited default. A section collapses into its only child
//! when the effective value is true. With `force_collapse`, a collapsing
//! section is replaced by all of its children instead.

use std::collections::HashSet;

use arrange_meta::Metadata;
use arrange_storage::FileIndex;

use crate::arrange::apply_nav;
use crate::error::Warnings;
use crate::gather::GatheredMeta;
use crate::order::order_items;
use crate::title::TitleResolver;
use crate::tree::{NavNode, Navigation, SectionId};
use crate::{NavError, NavWarning, Options};

/// Result of processing a tree.
#[derive(Debug)]
pub struct Processed {
    /// Top-level items of the arranged tree.
    pub items: Vec<NavNode>,
    /// Warnings raised along the way, in order.
    pub warnings: Vec<NavWarning>,
}

/// Applies gathered metadata to a navigation tree in place.
pub struct NavigationProcessor<'a> {
    nav: &'a mut Navigation,
    gathered: &'a GatheredMeta,
    options: &'a Options,
    explicit: &'a HashSet<SectionId>,
    titles: TitleResolver<'a>,
    warnings: Warnings,
}

impl<'a> NavigationProcessor<'a> {
    /// Create a processor.
    ///
    /// `explicit` holds the sections authored in the host nav config; they
    /// survive with no children and are never collapsed. `files` is used to
    /// read page titles when a level orders by title.
    pub fn new(
        nav: &'a mut Navigation,
        gathered: &'a GatheredMeta,
        options: &'a Options,
        explicit: &'a HashSet<SectionId>,
        files: &'a dyn FileIndex,
    ) -> Self {
        Self {
            nav,
            gathered,
            options,
            explicit,
            titles: TitleResolver::new(files),
            warnings: Warnings::default(),
        }
    }

    /// Process the tree rooted at `roots`.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NavEntryNotFound`] for a nav entry naming nothing
    /// under the strict policy, or [`NavError::Storage`] when a page title
    /// cannot be read for ordering.
    pub fn process(mut self, roots: Vec<NavNode>) -> Result<Processed, NavError> {
        let gathered = self.gathered;
        let root = &gathered.root;
        if root.title.is_some() {
            self.warnings.push(NavWarning::TitleInRoot {
                filename: self.options.filename.clone(),
            });
        }
        if root.hide.is_some() {
            self.warnings.push(NavWarning::HideInRoot {
                filename: self.options.filename.clone(),
            });
        }

        let collapse = root
            .collapse_single_pages
            .unwrap_or(self.options.collapse_single_pages);
        let items = self.process_children(roots, root, collapse)?;
        Ok(Processed {
            items,
            warnings: self.warnings.into_vec(),
        })
    }

    fn process_children(
        &mut self,
        mut children: Vec<NavNode>,
        meta: &Metadata,
        collapse: bool,
    ) -> Result<Vec<NavNode>, NavError> {
        order_items(
            &mut children,
            meta,
            self.options,
            self.nav,
            self.gathered,
            self.titles,
        )?;
        if let Some(entries) = &meta.nav {
            children = apply_nav(
                self.nav,
                children,
                entries,
                meta.context(),
                self.gathered,
                self.options.strict,
                &mut self.warnings,
            )?;
        }
        self.process_child_sections(children, collapse)
    }

    fn process_child_sections(
        &mut self,
        children: Vec<NavNode>,
        collapse: bool,
    ) -> Result<Vec<NavNode>, NavError> {
        let mut out = Vec::with_capacity(children.len());
        for child in children {
            let NavNode::Section(id) = child else {
                out.push(child);
                continue;
            };
            if self.nav.section(id).is_virtual {
                let inner = self.nav.take_children(id);
                let inner = self.process_child_sections(inner, collapse)?;
                if inner.is_empty() {
                    tracing::debug!(section = ?id, "Dropping empty virtual section");
                    continue;
                }
                self.nav.section_mut(id).children = inner;
                out.push(child);
            } else {
                out.extend(self.process_section(id, collapse)?);
            }
        }
        Ok(out)
    }

    /// Process one directory-backed section and return what replaces it in
    /// its parent: nothing, the section itself, or its children.
    fn process_section(&mut self, id: SectionId, collapse: bool) -> Result<Vec<NavNode>, NavError> {
        let gathered = self.gathered;
        let meta = gathered.section(id);

        if meta.hide == Some(true) {
            tracing::debug!(path = meta.context(), "Hiding section");
            return Ok(Vec::new());
        }

        let collapse = meta.collapse_single_pages.unwrap_or(collapse);
        if let Some(title) = &meta.title {
            self.nav.set_title(NavNode::Section(id), title.as_str());
        }

        let children = self.nav.take_children(id);
        let children = self.process_children(children, meta, collapse)?;
        self.nav.section_mut(id).children = children;

        if self.explicit.contains(&id) {
            return Ok(vec![NavNode::Section(id)]);
        }

        let children = &self.nav.section(id).children;
        if children.is_empty() {
            return Ok(Vec::new());
        }
        if meta.collapse.unwrap_or(collapse) {
            if children.len() == 1 {
                return Ok(children.clone());
            }
            if meta.force_collapse == Some(true) {
                return Ok(self.nav.take_children(id));
            }
        }
        Ok(vec![NavNode::Section(id)])
    }
}
