//! Display title resolution.
//!
//! Resolution order for a page without an assigned title:
//! 1. `title` in the YAML front matter, or in MultiMarkdown-style
//!    `Key: value` header lines when there is no YAML block
//! 2. A first-line `# Heading` (only if it is the first non-blank line)
//! 3. `"Home"` for the homepage
//! 4. The file stem with `-`/`_` turned into spaces, capitalized when the
//!    stem is all lowercase

use std::sync::LazyLock;

use arrange_storage::FileIndex;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::NavError;
use crate::gather::{GatheredMeta, basename};
use crate::tree::{NavNode, Navigation, PageData};

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A-{3}[ \t]*\n((?s:.*?)\n)?(?:\.{3}|-{3})[ \t]*(?:\n|\z)")
        .expect("front matter regex is valid")
});

static META_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}([A-Za-z0-9_-]+):\s*(.*)$").expect("meta line regex is valid")
});

static META_CONTINUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?: {4}|\t)\s*(.*)$").expect("meta continuation regex is valid")
});

/// Resolves the title a node is displayed (and sorted) with.
#[derive(Clone, Copy)]
pub struct TitleResolver<'a> {
    files: &'a dyn FileIndex,
}

impl<'a> TitleResolver<'a> {
    #[must_use]
    pub fn new(files: &'a dyn FileIndex) -> Self {
        Self { files }
    }

    /// Resolve a node's title.
    ///
    /// Sections prefer the metadata title over the assigned one. Links
    /// without a title fall back to their URL.
    pub fn resolve(
        &self,
        nav: &Navigation,
        gathered: &GatheredMeta,
        node: NavNode,
    ) -> Result<String, NavError> {
        match node {
            NavNode::Section(id) => {
                let section = nav.section(id);
                Ok(gathered
                    .section(id)
                    .title
                    .clone()
                    .or_else(|| section.title.clone())
                    .unwrap_or_default())
            }
            NavNode::Link(id) => {
                let link = nav.link(id);
                Ok(link.title.clone().unwrap_or_else(|| link.url.clone()))
            }
            NavNode::Page(id) => self.page_title(nav.page(id)),
        }
    }

    /// Resolve a page's title, reading the file only when no title is assigned.
    pub fn page_title(&self, page: &PageData) -> Result<String, NavError> {
        if let Some(title) = &page.title {
            return Ok(title.clone());
        }

        let source = self.files.read(&page.src_path)?;
        let source = source.strip_prefix('\u{feff}').unwrap_or(&source);
        let (front_matter, markdown) = split_front_matter(source);

        if let Some(title) = front_matter.as_ref().and_then(front_matter_title) {
            return Ok(title);
        }
        if let Some(title) = markdown_title(markdown) {
            return Ok(title.to_owned());
        }
        if page.is_homepage {
            return Ok("Home".to_owned());
        }
        Ok(humanize(file_stem(&page.src_path)))
    }
}

/// Split front matter from the markdown body.
///
/// A `---` YAML block that is not a mapping is treated as absent, and the
/// whole source is returned as the body. Without a YAML block, leading
/// MultiMarkdown header lines are read instead.
fn split_front_matter(source: &str) -> (Option<Value>, &str) {
    let Some(caps) = FRONT_MATTER.captures(source) else {
        return split_multimarkdown(source);
    };
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(value @ Value::Mapping(_)) => (Some(value), &source[caps.get(0).map_or(0, |m| m.end())..]),
        _ => (None, source),
    }
}

/// Read `Key: value` lines up to the first blank or non-matching line.
///
/// Keys are lowercased. Indented lines continue the previous value, and a
/// repeated key appends to it.
fn split_multimarkdown(source: &str) -> (Option<Value>, &str) {
    let mut meta = Mapping::new();
    let mut key: Option<String> = None;
    let mut rest = source;
    while !rest.is_empty() {
        let (line, next) = rest.split_once('\n').unwrap_or((rest, ""));
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            rest = next;
            break;
        }
        if let Some(caps) = META_LINE.captures(line) {
            let name = caps[1].to_lowercase();
            append_meta(&mut meta, &name, caps[2].trim());
            key = Some(name);
        } else if let (Some(name), Some(caps)) = (&key, META_CONTINUATION.captures(line)) {
            append_meta(&mut meta, name, caps[1].trim());
        } else {
            break;
        }
        rest = next;
    }

    if meta.is_empty() {
        (None, source)
    } else {
        (Some(Value::Mapping(meta)), rest)
    }
}

fn append_meta(meta: &mut Mapping, key: &str, value: &str) {
    if let Some(Value::String(existing)) = meta.get_mut(key) {
        existing.push(' ');
        existing.push_str(value);
    } else {
        meta.insert(Value::String(key.to_owned()), Value::String(value.to_owned()));
    }
}

fn front_matter_title(meta: &Value) -> Option<String> {
    match meta.get("title")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Title from a leading `# Heading`, if the first non-blank line is one.
fn markdown_title(markdown: &str) -> Option<&str> {
    let line = markdown.lines().map(str::trim).find(|line| !line.is_empty())?;
    line.starts_with("# ")
        .then(|| line.trim_start_matches(['#', ' ']))
}

fn file_stem(src_path: &str) -> &str {
    let name = basename(src_path);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    if stem == "README" { "index" } else { stem }
}

/// Turn a file or directory name into a title.
pub(crate) fn humanize(name: &str) -> String {
    let title = name.replace(['-', '_'], " ");
    if title.to_lowercase() != title {
        return title;
    }
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => title,
    }
}
