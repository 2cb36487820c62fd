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

//! Platform environment reader.
//!
//! The platform describes the application through two JSON environment
//! variables: `VCAP_SERVICES` lists the bound service instances grouped by
//! label, and `VCAP_APPLICATION` carries the application's own metadata.

use crate::binding::ServiceBinding;
use crate::document::Attributes;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::env;

pub const VCAP_SERVICES: &str = "VCAP_SERVICES";
pub const VCAP_APPLICATION: &str = "VCAP_APPLICATION";

/// Errors raised while reading the platform environment.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Failed to parse {variable}: {source}")]
    Json {
        variable: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{variable} contains non-unicode data")]
    NotUnicode { variable: &'static str },

    #[error("Service binding #{index} under '{label}' has no name")]
    MissingName { label: String, index: usize },
}

#[derive(Debug, Deserialize)]
struct RawBinding {
    name: Option<String>,
    label: Option<String>,
    #[serde(default)]
    credentials: Option<serde_json::Map<String, Value>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ApplicationMetadata {
    application_name: Option<String>,
}

/// Render a credential value as property text.
fn credential_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a `VCAP_SERVICES` document into bindings, in document order.
///
/// A binding without its own `label` takes the label it is grouped under.
pub fn parse_service_bindings(json: &str) -> Result<Vec<ServiceBinding>, PlatformError> {
    let grouped: IndexMap<String, Vec<RawBinding>> =
        serde_json::from_str(json).map_err(|source| PlatformError::Json {
            variable: VCAP_SERVICES,
            source,
        })?;

    let mut bindings = Vec::new();
    for (group_label, raw_bindings) in grouped {
        for (index, raw) in raw_bindings.into_iter().enumerate() {
            let name = raw.name.ok_or_else(|| PlatformError::MissingName {
                label: group_label.clone(),
                index,
            })?;
            let credentials: Attributes = raw
                .credentials
                .unwrap_or_default()
                .iter()
                .map(|(key, value)| (key.clone(), credential_text(value)))
                .collect();

            bindings.push(ServiceBinding {
                name,
                label: raw.label.unwrap_or_else(|| group_label.clone()),
                credentials,
                tags: raw.tags.unwrap_or_default(),
            });
        }
    }

    debug!("Parsed {} service bindings", bindings.len());
    Ok(bindings)
}

/// Application name from a `VCAP_APPLICATION` document.
pub fn parse_application_name(json: &str) -> Result<Option<String>, PlatformError> {
    let metadata: ApplicationMetadata =
        serde_json::from_str(json).map_err(|source| PlatformError::Json {
            variable: VCAP_APPLICATION,
            source,
        })?;
    Ok(metadata.application_name.filter(|name| !name.is_empty()))
}

fn read_variable(variable: &'static str) -> Result<Option<String>, PlatformError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(PlatformError::NotUnicode { variable }),
    }
}

/// Bindings from `VCAP_SERVICES`; none when the variable is unset.
pub fn service_bindings_from_env() -> Result<Vec<ServiceBinding>, PlatformError> {
    match read_variable(VCAP_SERVICES)? {
        Some(json) => parse_service_bindings(&json),
        None => {
            debug!("{VCAP_SERVICES} is not set, no service bindings");
            Ok(Vec::new())
        }
    }
}

/// Application name from `VCAP_APPLICATION`, if set.
pub fn application_name_from_env() -> Result<Option<String>, PlatformError> {
    match read_variable(VCAP_APPLICATION)? {
        Some(json) => parse_application_name(&json),
        None => Ok(None),
    }
}
