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

//! Compiler settings.
//!
//! A settings file describes one configure-phase run: which container flavor
//! is being provisioned, where the application and buildpack configuration
//! roots live, and where the server is installed.
//!
//! # Environment Variable Interpolation
//!
//! Settings files support POSIX-style references:
//! - `${VAR_NAME}` - Required variable
//! - `${VAR_NAME:-default}` - Variable with default value
//!
//! ## Settings File Example
//!
//! ```yaml
//! container: weblogic
//! preferAppConfig: true
//! appSrcPath: "${HOME}/app"
//! buildpackConfigRoot: /tmp/buildpack/resources/wls
//! installHome: "${HOME}/app/.wls/install/wlserver"
//! domainPath: "${HOME}/app/.wls/domains"
//! logLevel: "${LOG_LEVEL:-info}"
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{load_settings_file, ConfigError};
pub use settings::CompilerSettings;
