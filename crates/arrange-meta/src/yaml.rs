//! YAML parsing and validation for metadata files.

use serde_yaml::{Mapping, Value};

use crate::error::{value_inline, value_kind};
use crate::metadata::{Order, OrderBy, SortType};
use crate::{MetaError, Metadata, NavEntry, RestKind, RestSelector};

impl Metadata {
    /// Parse metadata file contents.
    ///
    /// `path` is the file location relative to the docs directory. Empty or
    /// whitespace-only content, and a document that is just `null`, produce
    /// metadata with no directives.
    pub fn from_yaml_str(content: &str, path: &str) -> Result<Self, MetaError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty_at(path));
        }

        let value: Value = serde_yaml::from_str(trimmed).map_err(|source| MetaError::Yaml {
            context: path.to_owned(),
            source,
        })?;
        Self::from_value(&value, path)
    }

    /// Validate an already-parsed YAML document.
    ///
    /// Unknown keys are ignored. A key explicitly set to `null` counts as
    /// absent.
    pub fn from_value(value: &Value, path: &str) -> Result<Self, MetaError> {
        let map = match value {
            Value::Null => return Ok(Self::empty_at(path)),
            Value::Mapping(map) => map,
            other => {
                return Err(MetaError::NotAMapping {
                    got: value_kind(other).to_owned(),
                    context: path.to_owned(),
                });
            }
        };

        let fields = Fields { map, path };

        let nav = match fields.get("nav") {
            Some(Value::Sequence(items)) => {
                let entries = NavEntry::list_from_yaml(items, path)?;
                NavEntry::check_duplicate_rest(&entries, path)?;
                Some(entries)
            }
            Some(other) => return Err(fields.type_error("nav", "a list", value_kind(other))),
            None => fields.arrange()?,
        };

        Ok(Self {
            title: fields.string("title")?,
            order: fields.choice("order", "either \"desc\" or \"asc\"", Order::parse)?,
            sort_type: fields.choice("sort_type", "\"natural\"", SortType::parse)?,
            order_by: fields.choice(
                "order_by",
                "one of ['filename', 'title']",
                OrderBy::parse,
            )?,
            nav,
            collapse: fields.boolean("collapse")?,
            collapse_single_pages: fields.boolean("collapse_single_pages")?,
            force_collapse: fields.boolean("force_collapse")?,
            hide: fields.boolean("hide")?,
            path: Some(path.to_owned()),
        })
    }
}

impl NavEntry {
    /// Parse a host-level nav file.
    ///
    /// The document is either the list itself or a mapping with a `nav` key
    /// holding it, as in a site config file. Empty content is an empty list.
    pub fn list_from_yaml_str(content: &str, path: &str) -> Result<Vec<Self>, MetaError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let value: Value = serde_yaml::from_str(trimmed).map_err(|source| MetaError::Yaml {
            context: path.to_owned(),
            source,
        })?;
        let list = match &value {
            Value::Mapping(map) => map.get("nav"),
            other => Some(other),
        };
        let entries = match list {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => Self::list_from_yaml(items, path)?,
            Some(other) => {
                return Err(MetaError::Type {
                    attribute: "nav",
                    expected: "a list",
                    got: value_kind(other).to_owned(),
                    context: path.to_owned(),
                });
            }
        };
        Self::check_duplicate_rest(&entries, path)?;
        Ok(entries)
    }
}

struct Fields<'a> {
    map: &'a Mapping,
    path: &'a str,
}

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    fn type_error(&self, attribute: &'static str, expected: &'static str, got: &str) -> MetaError {
        MetaError::Type {
            attribute,
            expected,
            got: got.to_owned(),
            context: self.path.to_owned(),
        }
    }

    fn string(&self, key: &'static str) -> Result<Option<String>, MetaError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.type_error(key, "a string", value_kind(other))),
        }
    }

    /// Strings `yes`/`no`/`on`/`off` (any case) are read as YAML 1.1 booleans.
    fn boolean(&self, key: &'static str) -> Result<Option<bool>, MetaError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => other
                .as_str()
                .and_then(yaml_1_1_bool)
                .map(Some)
                .ok_or_else(|| self.type_error(key, "a boolean", value_kind(other))),
        }
    }

    fn choice<T>(
        &self,
        key: &'static str,
        expected: &'static str,
        parse: fn(&str) -> Option<T>,
    ) -> Result<Option<T>, MetaError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        value
            .as_str()
            .and_then(parse)
            .map(Some)
            .ok_or_else(|| self.type_error(key, expected, &value_inline(value)))
    }

    /// Legacy `arrange`: a flat list of strings, translated to `nav` with a
    /// trailing `...` unless a match-all entry is already present.
    fn arrange(&self) -> Result<Option<Vec<NavEntry>>, MetaError> {
        let Some(value) = self.get("arrange") else {
            return Ok(None);
        };
        let Some(items) = value
            .as_sequence()
            .filter(|items| items.iter().all(Value::is_string))
        else {
            return Err(self.type_error("arrange", "a list of strings", value_kind(value)));
        };

        let mut entries = NavEntry::list_from_yaml(items, self.path)?;
        NavEntry::check_duplicate_rest(&entries, self.path)?;
        let has_all = entries
            .iter()
            .any(|entry| matches!(entry, NavEntry::Rest(rest) if rest.kind() == RestKind::All));
        if !has_all {
            entries.push(NavEntry::Rest(RestSelector::all()));
        }
        Ok(Some(entries))
    }
}

fn yaml_1_1_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "on" => Some(true),
        "no" | "off" => Some(false),
        _ => None,
    }
}
