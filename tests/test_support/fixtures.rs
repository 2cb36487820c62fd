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

//! On-disk fixtures: config roots, domain documents and settings files.

use domain_config_compiler::{CompilerSettings, ContainerFlavor};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DOMAIN_DOCUMENT: &str = "\
Domain:
  prodModeEnabled: false
  domainName: stale
  serverName: stale
";

/// Write `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// A staged application plus a buildpack config root.
pub struct StagingLayout {
    pub dir: TempDir,
}

impl StagingLayout {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn app_src(&self) -> PathBuf {
        self.dir.path().join("app")
    }

    pub fn app_config_root(&self) -> PathBuf {
        self.app_src().join(".wls")
    }

    pub fn buildpack_root(&self) -> PathBuf {
        self.dir.path().join("buildpack/resources/wls")
    }

    pub fn write_app(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.app_config_root(), relative, content)
    }

    pub fn write_buildpack(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.buildpack_root(), relative, content)
    }

    pub fn settings(&self, prefer_app_config: bool) -> CompilerSettings {
        CompilerSettings {
            container: ContainerFlavor::WebLogic,
            prefer_app_config,
            app_src_path: self.app_src(),
            app_config_root: None,
            buildpack_config_root: self.buildpack_root(),
            domain_document: None,
            output: None,
            install_home: self.dir.path().join("app/.wls/install/wlserver"),
            domain_path: self.dir.path().join("app/.wls/domains"),
            template_archive: None,
            app_name: None,
            log_level: "info".to_string(),
        }
    }

    /// Settings file for the binary, in camelCase YAML.
    pub fn write_settings_file(&self, prefer_app_config: bool) -> PathBuf {
        let yaml = format!(
            "container: weblogic\n\
             preferAppConfig: {prefer_app_config}\n\
             appSrcPath: {}\n\
             buildpackConfigRoot: {}\n\
             installHome: {}\n\
             domainPath: {}\n\
             appName: shop\n",
            self.app_src().display(),
            self.buildpack_root().display(),
            self.dir.path().join("app/.wls/install/wlserver").display(),
            self.dir.path().join("app/.wls/domains").display(),
        );
        write_file(self.dir.path(), "config/compiler.yaml", &yaml)
    }
}

impl Default for StagingLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers in the order they appear in a property file.
pub fn section_headers(props: &str) -> Vec<String> {
    props
        .lines()
        .filter_map(|line| line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
        .map(str::to_string)
        .collect()
}
