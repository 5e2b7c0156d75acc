//! Previous/next and parent links.

use crate::tree::{NavNode, Navigation, PageId, SectionId};

/// Flatten the pages of `items` depth-first and wire up navigation links.
///
/// Every page position gets previous/next pointers from its neighbours in the
/// flattened list. A page listed more than once keeps the pointers of its
/// last position. Every node gets its parent section; top-level nodes get
/// `None`. Returns the flattened list, duplicates included.
pub fn link_pages(nav: &mut Navigation, items: &[NavNode]) -> Vec<PageId> {
    let mut pages = Vec::new();
    collect_pages(nav, items, &mut pages);

    for (i, &page) in pages.iter().enumerate() {
        let previous = i.checked_sub(1).map(|j| pages[j]);
        let next = pages.get(i + 1).copied();
        let data = nav.page_mut(page);
        data.previous = previous;
        data.next = next;
    }

    set_parents(nav, items, None);
    pages
}

fn collect_pages(nav: &Navigation, items: &[NavNode], out: &mut Vec<PageId>) {
    for &item in items {
        match item {
            NavNode::Page(id) => out.push(id),
            NavNode::Section(id) => collect_pages(nav, &nav.section(id).children, out),
            NavNode::Link(_) => {}
        }
    }
}

fn set_parents(nav: &mut Navigation, items: &[NavNode], parent: Option<SectionId>) {
    for &item in items {
        nav.set_parent(item, parent);
        if let NavNode::Section(id) = item {
            let children = nav.take_children(id);
            set_parents(nav, &children, Some(id));
            nav.section_mut(id).children = children;
        }
    }
}
