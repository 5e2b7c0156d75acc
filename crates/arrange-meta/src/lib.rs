//! Per-directory navigation metadata for the arrange engine.
//!
//! A metadata file (`.pages` by default) sits in a docs directory and tells the
//! navigation engine how that directory's section should look:
//!
//! ```yaml
//! title: API Reference
//! order: desc
//! sort_type: natural
//! nav:
//!   - index.md
//!   - Getting started: setup.md
//!   - ... | flat | regex=^v\d+\.md$
//!   - Archive:
//!       - ...
//!   - Changelog: https://example.com/changelog
//! collapse_single_pages: true
//! ```
//!
//! This crate provides:
//! - [`Metadata`]: the parsed, validated contents of one file
//! - [`NavEntry`]: explicit navigation entries (leaves, groups, rest selectors)
//! - [`RestSelector`]: the `...` placeholder grammar and path matching
//! - [`MetaError`]: configuration errors, always fatal to a build

mod error;
mod metadata;
mod nav;
mod rest;
mod yaml;

pub use error::MetaError;
pub use metadata::{Metadata, Order, OrderBy, SortType};
pub use nav::NavEntry;
pub use rest::{REST_TOKEN, RestKind, RestSelector, RestSelectors};
