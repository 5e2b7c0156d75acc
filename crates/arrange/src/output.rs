//! Terminal output: colored status lines and the plain-text navigation tree.

use std::fmt::Write;

use arrange_nav::{NavItemOutput, NavWarning};
use console::{Style, Term};

/// Status line formatter writing to stderr.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print each build warning (yellow).
    pub(crate) fn warnings(&self, warnings: &[NavWarning]) {
        for warning in warnings {
            let line = format!("Warning: {warning}");
            let _ = self.term.write_line(&self.yellow.apply_to(line).to_string());
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a heading (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }
}

/// Render navigation items as an indented outline.
///
/// Pages show their source path, sections end with `/`, links show their URL.
pub(crate) fn render_tree(items: &[NavItemOutput]) -> String {
    let mut out = String::new();
    write_items(&mut out, items, 0);
    out
}

fn write_items(out: &mut String, items: &[NavItemOutput], depth: usize) {
    let indent = "  ".repeat(depth);
    for item in items {
        let _ = match item {
            NavItemOutput::Page { title, src_path } => {
                writeln!(out, "{indent}{title} ({src_path})")
            }
            NavItemOutput::Link { title, url } => writeln!(out, "{indent}{title} -> {url}"),
            NavItemOutput::Section { title, children } => {
                let _ = writeln!(out, "{indent}{title}/");
                write_items(out, children, depth + 1);
                Ok(())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_render_tree() {
        let items = vec![
            NavItemOutput::Page {
                title: "Home".to_owned(),
                src_path: "index.md".to_owned(),
            },
            NavItemOutput::Section {
                title: "Guide".to_owned(),
                children: vec![
                    NavItemOutput::Page {
                        title: "Usage".to_owned(),
                        src_path: "guide/usage.md".to_owned(),
                    },
                    NavItemOutput::Link {
                        title: "Source".to_owned(),
                        url: "https://example.com".to_owned(),
                    },
                ],
            },
        ];
        assert_eq!(
            render_tree(&items),
            "Home (index.md)\nGuide/\n  Usage (guide/usage.md)\n  Source -> https://example.com\n"
        );
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_tree(&[]), "");
    }
}
