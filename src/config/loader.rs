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

//! Settings loading with environment variable interpolation, and the error
//! type shared by everything that reads configuration from disk.

use super::env_interpolation;
use super::settings::CompilerSettings;
use super::validation::{validate_settings, ValidationError};
use std::fs;
use std::path::Path;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list '{path}': {source}")]
    ListDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML document '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Document '{path}' is not a mapping of subsystem entries")]
    NotAMapping { path: String },

    #[error("Entry '{entry}' in document '{path}' is not an attribute mapping")]
    EntryNotAMapping { path: String, entry: String },

    #[error("Failed to parse settings YAML: {0}")]
    SettingsYaml(#[from] serde_yaml::Error),

    #[error("Environment variable interpolation failed: {0}")]
    Interpolation(#[from] env_interpolation::InterpolationError),

    #[error("Invalid settings: {0}")]
    Validation(#[from] ValidationError),

    #[error("No domain configuration document (*.yml) found under '{app_root}' or '{buildpack_root}'")]
    MissingDomainDocument {
        app_root: String,
        buildpack_root: String,
    },
}

/// Load compiler settings from a YAML file. JSON parses as YAML too.
///
/// The file is interpolated, validated field by field, then deserialized.
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<CompilerSettings, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
        path: path_ref.display().to_string(),
        source,
    })?;

    let interpolated = env_interpolation::interpolate(&content)?;

    let raw: serde_yaml::Value = serde_yaml::from_str(&interpolated)?;

    validate_settings(&raw)?;

    Ok(serde_yaml::from_value(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ContainerFlavor;
    use serial_test::serial;
    use std::env;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    #[serial]
    fn test_load_settings_file_with_env_vars() {
        env::set_var("DCC_LOADER_APP", "/home/vcap/app");

        let content = r#"
container: weblogic
preferAppConfig: true
appSrcPath: ${DCC_LOADER_APP}
buildpackConfigRoot: /buildpack/resources/wls
installHome: ${DCC_LOADER_APP}/.wls/install
domainPath: ${DCC_LOADER_APP}/.wls/domains
"#;
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();

        let settings = load_settings_file(file.path()).unwrap();

        assert_eq!(settings.container, ContainerFlavor::WebLogic);
        assert!(settings.prefer_app_config);
        assert_eq!(settings.app_src_path, PathBuf::from("/home/vcap/app"));
        assert_eq!(
            settings.install_home,
            PathBuf::from("/home/vcap/app/.wls/install")
        );
    }

    #[test]
    #[serial]
    fn test_load_settings_file_missing_required_var() {
        env::remove_var("DCC_LOADER_REQUIRED");

        let content = "appSrcPath: ${DCC_LOADER_REQUIRED}\n";
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();

        assert!(matches!(
            load_settings_file(file.path()),
            Err(ConfigError::Interpolation(_))
        ));
    }

    #[test]
    fn test_load_settings_file_rejects_unknown_fields() {
        let content = r#"
appSrcPath: /app
buildpackConfigRoot: /bp
installHome: /opt
domainPath: /opt/domains
wlsHome: /opt/wlserver
"#;
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();

        let err = load_settings_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("wlsHome"));
    }

    #[test]
    fn test_load_settings_file_accepts_json() {
        let content = r#"{
  "container": "payara",
  "appSrcPath": "/app",
  "buildpackConfigRoot": "/bp",
  "installHome": "/opt/payara",
  "domainPath": "/opt/payara/glassfish/domains",
  "output": "/tmp/domain.props"
}"#;
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), content).unwrap();

        let settings = load_settings_file(file.path()).unwrap();
        assert_eq!(settings.container, ContainerFlavor::Payara);
        assert_eq!(settings.output, Some(PathBuf::from("/tmp/domain.props")));
    }

    #[test]
    fn test_load_settings_file_malformed_yaml() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "appSrcPath: [unclosed\n").unwrap();

        assert!(matches!(
            load_settings_file(file.path()),
            Err(ConfigError::SettingsYaml(_))
        ));
    }

    #[test]
    fn test_load_settings_file_missing_file() {
        assert!(matches!(
            load_settings_file("/nonexistent/compiler.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
