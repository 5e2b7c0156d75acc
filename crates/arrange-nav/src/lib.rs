//! Navigation arrangement engine.
//!
//! Takes the navigation tree a documentation host builds from its pages and
//! reshapes it with per-directory metadata files: sections get retitled,
//! reordered, rearranged by an explicit `nav` list, hidden, or collapsed.
//!
//! This crate provides:
//! - [`Navigation`]: arena holding pages, sections, and links, addressed by
//!   [`NavNode`] handles
//! - [`BuildSession`]: one build from a [`FileIndex`](arrange_storage::FileIndex)
//!   to an arranged, linked tree
//! - [`NavigationProcessor`]: the per-level processing pass on its own
//! - [`NavigationOutput`]: a serializable view of the result
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use arrange_nav::{Options, build};
//! use arrange_storage::FsFiles;
//!
//! let options = Options::default();
//! let files = FsFiles::scan(Path::new("docs"), &options.filename)?;
//! let result = build(&files, &options, None, &[])?;
//! let output = result.to_output(&files)?;
//! # Ok(())
//! # }
//! ```

mod arrange;
mod error;
mod gather;
mod host;
mod links;
mod natural;
mod options;
mod order;
mod output;
mod process;
mod session;
#[cfg(test)]
mod testing;
mod title;
mod tree;

pub use error::{NavError, NavWarning};
pub use gather::{GatheredMeta, gather};
pub use host::{
    HostPlugin, HostTree, PLUGIN_NAME, check_plugin_order, nest_pages, tree_from_config,
    tree_from_files,
};
pub use links::link_pages;
pub use natural::natural_cmp;
pub use options::{DEFAULT_FILENAME, Options};
pub use output::{NavItemOutput, NavigationOutput, PageOutput};
pub use process::{NavigationProcessor, Processed};
pub use session::{BuildSession, NavigationResult, build};
pub use title::TitleResolver;
pub use tree::{LinkData, LinkId, NavNode, Navigation, PageData, PageId, SectionData, SectionId};

#[cfg(test)]
mod send_tests {
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(NavigationResult: Send);
    assert_impl_all!(NavError: Send, Sync);
}
