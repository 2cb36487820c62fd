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

//! Property file emission.
//!
//! The provisioning script reads an INI-like file:
//!
//! ```text
//!
//! [JDBCDatasource-orders]
//! name=orders
//! jndiName=jdbc/orders
//!
//! ```
//!
//! Sections are appended one at a time; nothing already written is held in
//! memory.

use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Errors raised while writing the property file.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Failed to remove stale property file '{path}': {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write section [{header}] to '{path}': {source}")]
    Write {
        header: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One named block of `key=value` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySection {
    pub header: String,
    pub entries: Vec<(String, String)>,
}

impl PropertySection {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Text of the section as it appears in the property file.
    pub fn render(&self) -> String {
        let mut text = format!("\n[{}]\n", self.header);
        for (key, value) in &self.entries {
            text.push_str(key);
            text.push('=');
            text.push_str(value);
            text.push('\n');
        }
        text.push('\n');
        text
    }
}

/// Sink for compiled property sections.
pub trait SectionWriter {
    fn write_section(&mut self, section: &PropertySection) -> Result<(), EmitError>;
}

/// Appends sections to a property file on disk.
#[derive(Debug, Clone)]
pub struct PropertyFileWriter {
    path: PathBuf,
}

impl PropertyFileWriter {
    /// Append to `path` without touching what is already there.
    pub fn append(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Start a fresh pass: remove any existing file at `path`.
    pub fn recreate(path: impl Into<PathBuf>) -> Result<Self, EmitError> {
        let path = path.into();
        match fs::remove_file(&path) {
            Ok(()) => debug!("Removed previous property file {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => {
                return Err(EmitError::Remove {
                    path: path.display().to_string(),
                    source,
                })
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SectionWriter for PropertyFileWriter {
    fn write_section(&mut self, section: &PropertySection) -> Result<(), EmitError> {
        let write_error = |source| EmitError::Write {
            header: section.header.clone(),
            path: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_error)?;
        file.write_all(section.render().as_bytes())
            .and_then(|()| file.flush())
            .map_err(write_error)?;

        debug!("Wrote section [{}] to {}", section.header, self.path.display());
        Ok(())
    }
}

/// Captures sections in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySectionWriter {
    pub sections: Vec<PropertySection>,
}

impl MemorySectionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.header.as_str()).collect()
    }

    pub fn section(&self, header: &str) -> Option<&PropertySection> {
        self.sections.iter().find(|s| s.header == header)
    }

    /// Everything written so far, as the property file would contain it.
    pub fn render(&self) -> String {
        self.sections.iter().map(PropertySection::render).collect()
    }
}

impl SectionWriter for MemorySectionWriter {
    fn write_section(&mut self, section: &PropertySection) -> Result<(), EmitError> {
        self.sections.push(section.clone());
        Ok(())
    }
}
