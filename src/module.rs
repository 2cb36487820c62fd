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

//! Module classification of file-set documents and section naming.

use crate::document::{Attributes, ConfigDocument, DOMAIN_MODULE};
use crate::emitter::PropertySection;
use crate::jdbc::{self, JdbcInput};
use log::warn;

pub const DOMAIN_SECTION: &str = "Domain";
pub const SECURITY_SECTION: &str = "Security";

/// Header prefix carried by typed sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPrefix {
    JdbcDatasource,
    Jms,
    ForeignJms,
}

impl SectionPrefix {
    /// Text a name must start with to count as already prefixed.
    pub fn marker(&self) -> &'static str {
        match self {
            SectionPrefix::JdbcDatasource => "JDBCDatasource",
            SectionPrefix::Jms => "JMS",
            SectionPrefix::ForeignJms => "ForeignJMS",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            SectionPrefix::JdbcDatasource => "JDBCDatasource-",
            SectionPrefix::Jms => "JMS-",
            SectionPrefix::ForeignJms => "ForeignJMS-",
        }
    }

    /// Prefix `name` unless it already starts with the marker.
    pub fn apply(&self, name: &str) -> String {
        if name.starts_with(self.marker()) {
            name.to_string()
        } else {
            format!("{}{}", self.prefix(), name)
        }
    }

    /// Like [`apply`](Self::apply) but the marker check ignores ASCII case.
    pub fn apply_ignore_case(&self, name: &str) -> String {
        let marker = self.marker();
        let already = name
            .get(..marker.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(marker));
        if already {
            name.to_string()
        } else {
            format!("{}{}", self.prefix(), name)
        }
    }
}

/// Logical subsystem of a file-set document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Domain,
    Jdbc,
    Jms,
    ForeignJms,
    Security,
    Generic,
}

impl ModuleKind {
    /// Classify by the document's parent module. Rules apply in order.
    pub fn from_parent_module(module: &str) -> Self {
        let lower = module.to_ascii_lowercase();
        if module == DOMAIN_MODULE {
            ModuleKind::Domain
        } else if lower.contains("jdbc") {
            ModuleKind::Jdbc
        } else if lower.starts_with("jms") {
            ModuleKind::Jms
        } else if lower.starts_with("foreign") {
            ModuleKind::ForeignJms
        } else if lower.contains("security") {
            ModuleKind::Security
        } else {
            ModuleKind::Generic
        }
    }
}

/// One entry of a document together with its module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub name: String,
    pub attributes: Attributes,
    pub kind: ModuleKind,
}

impl ClassifiedEntry {
    /// Build the property section for this entry.
    pub fn into_section(self) -> PropertySection {
        let header = match self.kind {
            ModuleKind::Domain => DOMAIN_SECTION.to_string(),
            ModuleKind::Jdbc => {
                return jdbc::normalize(JdbcInput::from_section(&self.name, self.attributes)).to_section();
            }
            ModuleKind::Jms => SectionPrefix::Jms.apply(&self.name),
            ModuleKind::ForeignJms => SectionPrefix::ForeignJms.apply(&self.name),
            ModuleKind::Security => SECURITY_SECTION.to_string(),
            ModuleKind::Generic => {
                warn!("Unknown subsystem '{}', saving it as-is", self.name);
                self.name.clone()
            }
        };

        let mut section = PropertySection::new(header);
        for (key, value) in self.attributes {
            section.push(key, value);
        }
        section
    }
}

/// Split a document into classified entries, in document order.
pub fn classify_document(document: &ConfigDocument) -> Vec<ClassifiedEntry> {
    let kind = ModuleKind::from_parent_module(&document.parent_module);
    document
        .sections
        .iter()
        .map(|(name, attributes)| ClassifiedEntry {
            name: name.clone(),
            attributes: attributes.clone(),
            kind,
        })
        .collect()
}
