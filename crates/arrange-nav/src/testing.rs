//! Helpers shared by the unit tests.

use crate::tree::{NavNode, Navigation};

/// Render nodes compactly: pages as `path` or `path=title`, links as
/// `title -> url`, sections as `title[children]`.
pub(crate) fn render(nav: &Navigation, nodes: &[NavNode]) -> Vec<String> {
    nodes
        .iter()
        .map(|&node| match node {
            NavNode::Page(id) => {
                let page = nav.page(id);
                match &page.title {
                    Some(title) => format!("{}={title}", page.src_path),
                    None => page.src_path.clone(),
                }
            }
            NavNode::Link(id) => {
                let link = nav.link(id);
                format!("{} -> {}", link.title.as_deref().unwrap_or(""), link.url)
            }
            NavNode::Section(id) => {
                let section = nav.section(id);
                format!(
                    "{}[{}]",
                    section.title.as_deref().unwrap_or(""),
                    render(nav, &section.children).join(", ")
                )
            }
        })
        .collect()
}
