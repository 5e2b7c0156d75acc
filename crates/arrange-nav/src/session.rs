//! Two-phase build session.
//!
//! A [`BuildSession`] lives for exactly one build. [`BuildSession::discover`]
//! validates the host nav config and assigns every page it does not mention
//! to the first host-level rest selector that claims it.
//! [`BuildSession::assemble`] then builds the host tree, gathers metadata,
//! processes the tree, and links pages.
//!
//! ```ignore
//! let session = BuildSession::discover(&files, &options, host_nav, &plugins)?;
//! let result = session.assemble()?;
//! for warning in &result.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

use std::collections::{HashMap, HashSet};

use arrange_meta::{NavEntry, RestSelector, RestSelectors};
use arrange_storage::{FileIndex, SourceFile};

use crate::error::Warnings;
use crate::gather::{GatheredMeta, gather};
use crate::host::{check_plugin_order, leaf_path, tree_from_config, tree_from_files};
use crate::links::link_pages;
use crate::process::NavigationProcessor;
use crate::tree::{NavNode, Navigation, PageId};
use crate::{HostPlugin, NavError, NavWarning, Options};

/// Diagnostic context for errors in a host nav config given without a path.
const HOST_NAV_CONTEXT: &str = "nav";

/// State carried from discovery to assembly.
pub struct BuildSession<'a> {
    files: &'a dyn FileIndex,
    options: &'a Options,
    host_nav: Option<Vec<NavEntry>>,
    rest: HashMap<RestSelector, Vec<&'a SourceFile>>,
    warnings: Warnings,
}

/// Output of a build.
#[derive(Debug)]
pub struct NavigationResult {
    pub nav: Navigation,
    /// Top-level items of the arranged tree.
    pub items: Vec<NavNode>,
    /// Pages in reading order, duplicates included.
    pub pages: Vec<PageId>,
    pub gathered: GatheredMeta,
    pub warnings: Vec<NavWarning>,
}

impl<'a> BuildSession<'a> {
    /// Discovery phase.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Meta`] when the host nav config repeats a rest
    /// selector.
    pub fn discover(
        files: &'a dyn FileIndex,
        options: &'a Options,
        host_nav: Option<Vec<NavEntry>>,
        plugins: &[HostPlugin],
    ) -> Result<Self, NavError> {
        let mut warnings = Warnings::default();
        for warning in check_plugin_order(plugins) {
            warnings.push(warning);
        }

        let mut rest: HashMap<RestSelector, Vec<&'a SourceFile>> = HashMap::new();
        if let Some(entries) = &host_nav {
            NavEntry::check_duplicate_rest(entries, HOST_NAV_CONTEXT)?;

            let mut selectors = RestSelectors::new();
            for selector in NavEntry::rest_selectors(entries) {
                selectors.push(selector);
            }
            if !selectors.is_empty() {
                let referenced = referenced_paths(entries);
                for file in files.files().iter().filter(|f| f.is_page()) {
                    if referenced.contains(file.src_path.as_str()) {
                        continue;
                    }
                    if let Some(selector) = selectors.first_match(Some(&file.src_path)) {
                        rest.entry(selector.clone()).or_default().push(file);
                    }
                }
            }
            tracing::debug!(
                selectors = selectors.len(),
                claimed = rest.values().map(Vec::len).sum::<usize>(),
                "Assigned pages to host nav rest selectors"
            );
        }

        Ok(Self {
            files,
            options,
            host_nav,
            rest,
            warnings,
        })
    }

    /// Assembly phase.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] when a metadata file is malformed or unreadable,
    /// when a nav entry names nothing under the strict policy, or when a
    /// page title cannot be read for ordering.
    pub fn assemble(self) -> Result<NavigationResult, NavError> {
        let mut nav = Navigation::new();
        let host = match &self.host_nav {
            Some(entries) => tree_from_config(&mut nav, entries, self.files, &self.rest),
            None => tree_from_files(&mut nav, self.files),
        };

        let gathered = gather(
            &nav,
            &host.roots,
            self.files,
            &self.options.filename,
            &host.explicit,
        )?;
        let processed =
            NavigationProcessor::new(&mut nav, &gathered, self.options, &host.explicit, self.files)
                .process(host.roots)?;
        let pages = link_pages(&mut nav, &processed.items);

        let mut warnings = self.warnings.into_vec();
        warnings.extend(processed.warnings);
        tracing::debug!(
            pages = pages.len(),
            warnings = warnings.len(),
            "Navigation assembled"
        );

        Ok(NavigationResult {
            nav,
            items: processed.items,
            pages,
            gathered,
            warnings,
        })
    }
}

/// Build navigation in one call.
///
/// # Errors
///
/// See [`BuildSession::discover`] and [`BuildSession::assemble`].
pub fn build(
    files: &dyn FileIndex,
    options: &Options,
    host_nav: Option<Vec<NavEntry>>,
    plugins: &[HostPlugin],
) -> Result<NavigationResult, NavError> {
    BuildSession::discover(files, options, host_nav, plugins)?.assemble()
}

/// Source paths named by leaves anywhere in `entries`.
fn referenced_paths(entries: &[NavEntry]) -> HashSet<String> {
    let mut out = HashSet::new();
    let mut stack = vec![entries];
    while let Some(list) = stack.pop() {
        for entry in list {
            match entry {
                NavEntry::Leaf { value, .. } => {
                    out.insert(leaf_path(value));
                }
                NavEntry::Group { children, .. } => stack.push(children),
                NavEntry::Rest(_) => {}
            }
        }
    }
    out
}
