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

//! File-set loading.
//!
//! The file set is the primary domain document followed by every `*.yml`
//! document under the `jdbc/`, `jms/` and `foreignjms/` directories of the
//! config root. Processing order decides which section wins downstream when
//! names collide, so each directory is sorted by file name rather than
//! trusting the filesystem's enumeration order.

use crate::config::ConfigError;
use crate::document::{ConfigDocument, DOMAIN_MODULE};
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const JDBC_CONFIG_DIR: &str = "jdbc";
pub const JMS_CONFIG_DIR: &str = "jms";
pub const FOREIGN_JMS_CONFIG_DIR: &str = "foreignjms";

/// Subdirectories scanned after the domain document, in processing order.
pub const MODULE_DIRS: [&str; 3] = [JDBC_CONFIG_DIR, JMS_CONFIG_DIR, FOREIGN_JMS_CONFIG_DIR];

const DOCUMENT_EXTENSION: &str = "yml";

/// List the `*.yml` files directly under `dir`, sorted by file name.
///
/// A missing directory yields an empty list.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ConfigError::ListDir {
                path: dir.display().to_string(),
                source,
            })
        }
    };

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ConfigError::ListDir {
                path: dir.display().to_string(),
                source,
            })?
            .path();
        let is_document = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION);
        if is_document {
            documents.push(path);
        }
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

/// Module name of a document: its directory relative to `root`, lower-cased.
pub fn parent_module(root: &Path, document: &Path) -> String {
    let parent = document.parent().unwrap_or_else(|| Path::new(""));
    match parent.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => DOMAIN_MODULE.to_string(),
        Ok(relative) => relative.to_string_lossy().to_lowercase(),
        Err(_) => parent
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| DOMAIN_MODULE.to_string()),
    }
}

/// Paths of the whole file set, in processing order.
pub fn file_set_paths(root: &Path, domain_document: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = vec![domain_document.to_path_buf()];
    for dir in MODULE_DIRS {
        paths.extend(discover_documents(&root.join(dir))?);
    }
    Ok(paths)
}

/// Load and parse the whole file set.
///
/// The primary domain document is always tagged as the domain module, even
/// when it lives outside `root`. Any document that fails to parse aborts the
/// load.
pub fn load_file_set(root: &Path, domain_document: &Path) -> Result<Vec<ConfigDocument>, ConfigError> {
    let paths = file_set_paths(root, domain_document)?;
    info!(
        "Configuration files used for domain creation: {}",
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut documents = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let module = if index == 0 {
            DOMAIN_MODULE.to_string()
        } else {
            parent_module(root, path)
        };
        debug!("Loading {} as module '{}'", path.display(), module);
        documents.push(ConfigDocument::read(path, module)?);
    }

    Ok(documents)
}
