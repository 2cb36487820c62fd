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

use crate::template::ContainerFlavor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for one configure-phase compile run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilerSettings {
    #[serde(default)]
    pub container: ContainerFlavor,

    /// Use the application-bundled config root instead of the buildpack one.
    #[serde(default)]
    pub prefer_app_config: bool,

    /// Root of the deployed application.
    pub app_src_path: PathBuf,

    /// Application-bundled config root; defaults to the flavor's config
    /// directory under `appSrcPath`.
    #[serde(default)]
    pub app_config_root: Option<PathBuf>,

    /// Config root shipped with the buildpack.
    pub buildpack_config_root: PathBuf,

    /// Primary domain document; discovered under the app config root when unset.
    #[serde(default)]
    pub domain_document: Option<PathBuf>,

    /// Property file to write; defaults to the domain document with a
    /// `.props` extension.
    #[serde(default)]
    pub output: Option<PathBuf>,

    pub install_home: PathBuf,

    /// Directory the domain is created under.
    pub domain_path: PathBuf,

    #[serde(default)]
    pub template_archive: Option<PathBuf>,

    /// Overrides the application name reported by the platform.
    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl CompilerSettings {
    pub fn resolved_app_config_root(&self) -> PathBuf {
        self.app_config_root
            .clone()
            .unwrap_or_else(|| self.app_src_path.join(self.container.app_config_dir()))
    }
}
