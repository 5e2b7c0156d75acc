//! Build-wide engine options.

use arrange_meta::{Order, OrderBy, SortType};

/// Default metadata filename.
pub const DEFAULT_FILENAME: &str = ".pages";

/// Options that apply to every level of one build.
///
/// `order`, `sort_type`, and `order_by` are fallbacks for levels whose
/// metadata leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Name of the per-directory metadata file.
    pub filename: String,
    /// Collapse sections with a single child unless a level says otherwise.
    pub collapse_single_pages: bool,
    /// Treat nav entries that name nothing as errors instead of warnings.
    pub strict: bool,
    pub order: Option<Order>,
    pub sort_type: Option<SortType>,
    pub order_by: Option<OrderBy>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_owned(),
            collapse_single_pages: false,
            strict: true,
            order: None,
            sort_type: None,
            order_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.filename, ".pages");
        assert!(!options.collapse_single_pages);
        assert!(options.strict);
        assert!(options.order.is_none());
    }
}
