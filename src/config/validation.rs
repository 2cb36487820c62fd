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

//! Settings field validation.
//!
//! Runs over the raw YAML before deserialization so that every problem in a
//! settings file is reported at once instead of one serde error at a time.

use std::collections::HashSet;

/// Validation error for compiler settings.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    Invalid(String),

    #[error("Multiple validation errors:\n{}", .0.join("\n"))]
    Multiple(Vec<String>),
}

/// Known top-level settings fields.
const SETTINGS_FIELDS: &[&str] = &[
    "container",
    "preferAppConfig",
    "appSrcPath",
    "appConfigRoot",
    "buildpackConfigRoot",
    "domainDocument",
    "output",
    "installHome",
    "domainPath",
    "templateArchive",
    "appName",
    "logLevel",
];

const REQUIRED_FIELDS: &[&str] = &["appSrcPath", "buildpackConfigRoot", "installHome", "domainPath"];

const CONTAINERS: &[&str] = &["weblogic", "wls", "payara"];

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Validate a raw settings document and return every problem found.
pub fn validate_settings(value: &serde_yaml::Value) -> Result<(), ValidationError> {
    let map = match value.as_mapping() {
        Some(map) => map,
        None => {
            return Err(ValidationError::Invalid(
                "Settings must be a mapping of field names to values".to_string(),
            ))
        }
    };

    let mut errors = Vec::new();
    let valid_set: HashSet<&str> = SETTINGS_FIELDS.iter().copied().collect();

    for key in map.keys() {
        if let Some(key_str) = key.as_str() {
            if !valid_set.contains(key_str) {
                errors.push(format!(
                    "Unknown field '{key_str}' in settings. Valid fields: {SETTINGS_FIELDS:?}"
                ));
            }
        }
    }

    for field in REQUIRED_FIELDS {
        let present = map
            .get(*field)
            .and_then(|v| v.as_str())
            .is_some_and(|v| !v.trim().is_empty());
        if !present {
            errors.push(format!("Missing required field '{field}'"));
        }
    }

    if let Some(container) = map.get("container").and_then(|v| v.as_str()) {
        if !CONTAINERS.contains(&container) {
            errors.push(format!(
                "Unsupported container '{container}'. Expected one of: {CONTAINERS:?}"
            ));
        }
    }

    if let Some(level) = map.get("logLevel").and_then(|v| v.as_str()) {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Invalid logLevel '{level}'. Expected one of: {LOG_LEVELS:?}"
            ));
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(ValidationError::Invalid(errors.remove(0))),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
