// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration documents.
//!
//! A document is a YAML mapping from subsystem name to an attribute mapping.
//! Attribute values are flattened to text on load because the property file
//! only carries `key=value` lines.

use crate::config::ConfigError;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered attribute map of a single subsystem entry.
pub type Attributes = IndexMap<String, String>;

/// Module name of the primary domain document.
pub const DOMAIN_MODULE: &str = ".";

/// One parsed configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub path: PathBuf,
    /// Containing directory relative to the config root, lower-cased.
    pub parent_module: String,
    pub sections: IndexMap<String, Attributes>,
}

impl ConfigDocument {
    /// Parse a document from YAML text.
    ///
    /// An empty document has no sections. A top level that is not a mapping,
    /// or an entry whose value is not a mapping, is rejected.
    pub fn from_yaml_str(
        path: impl Into<PathBuf>,
        parent_module: impl Into<String>,
        content: &str,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let display = path.display().to_string();

        let root: Value = serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: display.clone(),
            source,
        })?;

        let mut sections = IndexMap::new();
        match root {
            Value::Null => {}
            Value::Mapping(entries) => {
                for (key, value) in entries {
                    let entry = render_value(&key);
                    let attributes = match value {
                        Value::Mapping(map) => attributes_from_mapping(&map),
                        Value::Null => Attributes::new(),
                        _ => {
                            return Err(ConfigError::EntryNotAMapping {
                                path: display,
                                entry,
                            })
                        }
                    };
                    sections.insert(entry, attributes);
                }
            }
            _ => return Err(ConfigError::NotAMapping { path: display }),
        }

        Ok(Self {
            path,
            parent_module: parent_module.into(),
            sections,
        })
    }

    /// Read and parse the document at `path`.
    pub fn read(path: &Path, parent_module: impl Into<String>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(path, parent_module, &content)
    }

    pub fn is_domain_document(&self) -> bool {
        self.parent_module == DOMAIN_MODULE
    }
}

fn attributes_from_mapping(map: &serde_yaml::Mapping) -> Attributes {
    map.iter()
        .map(|(key, value)| (render_value(key), render_value(value)))
        .collect()
}

/// Render a YAML value as property-file text.
///
/// Scalars keep their literal text, null becomes empty, sequences are
/// comma-joined and nested mappings use a `{key: value, ...}` flow form.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(render_value).collect::<Vec<_>>().join(","),
        Value::Mapping(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", render_value(k), render_value(v)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
        Value::Tagged(tagged) => render_value(&tagged.value),
    }
}
