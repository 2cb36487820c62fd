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

//! Environment variable interpolation for compiler settings files.
//!
//! Settings files are written once per buildpack and reused across staging
//! environments, so install locations are usually injected from the stager's
//! environment:
//! - `${VAR_NAME}` - required variable
//! - `${VAR_NAME:-default}` - variable with a fallback when unset or empty
//!
//! Configuration documents under the config root are *not* interpolated; their
//! values are copied verbatim into the property file.
//!
//! # Examples
//!
//! ```
//! use domain_config_compiler::config::env_interpolation::interpolate;
//! use std::env;
//!
//! env::set_var("WLS_INSTALL_HOME", "/home/vcap/app/.wls/install");
//!
//! let input = "installHome: ${WLS_INSTALL_HOME}\nlogLevel: ${DCC_LOG:-info}";
//! let result = interpolate(input).unwrap();
//! assert!(result.contains("installHome: /home/vcap/app/.wls/install"));
//! assert!(result.contains("logLevel: info"));
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the size of an interpolated settings file.
const MAX_INTERPOLATED_LENGTH: usize = 1_000_000;

lazy_static! {
    /// `${NAME}` or `${NAME:-default}`; group 1 is the name, group 3 the default.
    static ref ENV_VAR_PATTERN: Regex = Regex::new(
        r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}"
    ).expect("Invalid regex pattern");
}

/// Errors that can occur during environment variable interpolation.
#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' contains invalid Unicode")]
    NotUnicode { name: String },

    #[error("Interpolated settings exceed the maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Resolve a single reference against the process environment.
fn resolve(name: &str, default_value: Option<&str>) -> Result<String, InterpolationError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => default_value
            .map(str::to_string)
            .ok_or_else(|| InterpolationError::MissingVariable {
                name: name.to_string(),
            }),
        Err(env::VarError::NotUnicode(_)) => Err(InterpolationError::NotUnicode {
            name: name.to_string(),
        }),
    }
}

/// Interpolate environment variables in the input string.
///
/// Only well-formed `${...}` references are replaced; substituted values are
/// never expanded a second time.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_match_end = 0;
    let mut variables_used: Vec<&str> = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let (full_match, name) = match reference_parts(&caps) {
            Some(parts) => parts,
            None => continue,
        };
        let value = resolve(name, caps.get(3).map(|m| m.as_str()))?;

        result.push_str(&input[last_match_end..full_match.start()]);
        result.push_str(&value);
        last_match_end = full_match.end();
        variables_used.push(name);

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }

    result.push_str(&input[last_match_end..]);

    // Names only; values may carry credentials.
    if !variables_used.is_empty() {
        debug!(
            "Interpolated settings variables: {}",
            variables_used.join(", ")
        );
    }

    Ok(result)
}

fn reference_parts<'t>(caps: &Captures<'t>) -> Option<(regex::Match<'t>, &'t str)> {
    Some((caps.get(0)?, caps.get(1)?.as_str()))
}
