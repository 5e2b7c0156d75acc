//! Metadata model.

use serde::{Deserialize, Serialize};

use crate::NavEntry;

/// Sort direction applied to a section's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Comparison used when sorting.
///
/// Only natural ordering has a name; the unset state means plain
/// code-point comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Natural,
}

impl SortType {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        (value == "natural").then_some(Self::Natural)
    }
}

/// Sort key used when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Basename of the item path.
    #[default]
    Filename,
    /// Resolved display title.
    Title,
}

impl OrderBy {
    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value {
            "filename" => Some(Self::Filename),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Parsed contents of one metadata file.
///
/// Every field is optional. An absent field defers to the build-wide default
/// or, for `collapse_single_pages`, to the value inherited from the parent
/// section. `path` is the location of the file the data came from (or would
/// have come from), relative to the docs directory; it doubles as the
/// section's directory anchor and as context for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub title: Option<String>,
    pub order: Option<Order>,
    pub sort_type: Option<SortType>,
    pub order_by: Option<OrderBy>,
    pub nav: Option<Vec<NavEntry>>,
    pub collapse: Option<bool>,
    pub collapse_single_pages: Option<bool>,
    /// When a collapse applies, replace the section with all of its
    /// children, however many there are.
    pub force_collapse: Option<bool>,
    pub hide: Option<bool>,
    pub path: Option<String>,
}

impl Metadata {
    /// Metadata with every field unset, anchored at `path`.
    ///
    /// Used for directories without a metadata file.
    #[must_use]
    pub fn empty_at(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Directory containing the metadata file, if the path is known.
    ///
    /// The docs root is the empty string.
    #[must_use]
    pub fn dir(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|path| path.rsplit_once('/').map_or("", |(dir, _)| dir))
    }

    /// Returns `true` if no directive is set (the path is ignored).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.order.is_none()
            && self.sort_type.is_none()
            && self.order_by.is_none()
            && self.nav.is_none()
            && self.collapse.is_none()
            && self.collapse_single_pages.is_none()
            && self.force_collapse.is_none()
            && self.hide.is_none()
    }

    /// Diagnostic context: the file path, or a placeholder when unknown.
    #[must_use]
    pub fn context(&self) -> &str {
        self.path.as_deref().unwrap_or("<unknown>")
    }
}
