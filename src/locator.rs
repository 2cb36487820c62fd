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

//! Config source location.

use crate::config::ConfigError;
use crate::fileset::discover_documents;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Pick the config root that feeds the file-set loader.
///
/// A root that does not exist is still returned; the loader treats it as
/// empty.
pub fn select_config_root(prefer_app_config: bool, app_root: &Path, buildpack_root: &Path) -> PathBuf {
    if prefer_app_config {
        app_root.to_path_buf()
    } else {
        buildpack_root.to_path_buf()
    }
}

/// Find the primary domain document.
///
/// The first `*.yml` directly under the app root wins. When the application
/// bundles none, the buildpack's documents are copied into the app root and
/// the first copy is used.
pub fn locate_domain_document(app_root: &Path, buildpack_root: &Path) -> Result<PathBuf, ConfigError> {
    if let Some(found) = discover_documents(app_root)?.into_iter().next() {
        info!("Using application bundled domain configuration {}", found.display());
        return Ok(found);
    }

    let templates = discover_documents(buildpack_root)?;
    if templates.is_empty() {
        return Err(ConfigError::MissingDomainDocument {
            app_root: app_root.display().to_string(),
            buildpack_root: buildpack_root.display().to_string(),
        });
    }

    fs::create_dir_all(app_root).map_err(|source| ConfigError::Copy {
        from: buildpack_root.display().to_string(),
        to: app_root.display().to_string(),
        source,
    })?;

    let mut copies = Vec::with_capacity(templates.len());
    for template in &templates {
        // discover_documents only returns regular files
        let Some(file_name) = template.file_name() else {
            continue;
        };
        let target = app_root.join(file_name);
        fs::copy(template, &target).map_err(|source| ConfigError::Copy {
            from: template.display().to_string(),
            to: target.display().to_string(),
            source,
        })?;
        copies.push(target);
    }

    warn!(
        "No domain configuration found under {}, reusing the buildpack bundled template",
        app_root.display()
    );

    copies
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::MissingDomainDocument {
            app_root: app_root.display().to_string(),
            buildpack_root: buildpack_root.display().to_string(),
        })
}
