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

//! Domain template patching.
//!
//! Before compilation the primary domain document gets its header fields
//! (domain and server names, install locations, application details) replaced
//! with the values of the current staging run. The patch is a plain text
//! transform so that comments and layout elsewhere in the document survive.

use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_APP_NAME: &str = "testApp";
const DEFAULT_DOMAIN_NAME: &str = "cfDomain";
const DEFAULT_SERVER_NAME: &str = "myserver";

lazy_static! {
    static ref WEBLOGIC_HEADER_LINES: Regex = header_line_pattern(ContainerFlavor::WebLogic);
    static ref PAYARA_HEADER_LINES: Regex = header_line_pattern(ContainerFlavor::Payara);
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.]*)\}").expect("Invalid regex pattern");
}

fn header_line_pattern(flavor: ContainerFlavor) -> Regex {
    let keys: Vec<String> = flavor.header_keys().iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"(?m)^ *(?:{}):.*(?:\n|$)", keys.join("|")))
        .expect("Invalid regex pattern")
}

/// The application-server product a domain is provisioned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFlavor {
    #[default]
    #[serde(alias = "wls")]
    WebLogic,
    Payara,
}

impl ContainerFlavor {
    /// Directory name an application bundles its domain configuration under.
    pub fn app_config_dir(&self) -> &'static str {
        match self {
            ContainerFlavor::WebLogic => ".wls",
            ContainerFlavor::Payara => "glassfish",
        }
    }

    pub fn home_key(&self) -> &'static str {
        match self {
            ContainerFlavor::WebLogic => "wlsHome",
            ContainerFlavor::Payara => "payaraHome",
        }
    }

    pub fn template_jar_key(&self) -> &'static str {
        match self {
            ContainerFlavor::WebLogic => "wlsDomainTemplateJar",
            ContainerFlavor::Payara => "payaraDomainTemplateJar",
        }
    }

    /// Header keys in the order they are appended to the domain document.
    pub fn header_keys(&self) -> [&'static str; 7] {
        [
            "domainName",
            "serverName",
            self.home_key(),
            self.template_jar_key(),
            "domainPath",
            "appName",
            "appSrcPath",
        ]
    }

    fn header_lines(&self) -> &'static Regex {
        match self {
            ContainerFlavor::WebLogic => &*WEBLOGIC_HEADER_LINES,
            ContainerFlavor::Payara => &*PAYARA_HEADER_LINES,
        }
    }
}

impl fmt::Display for ContainerFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerFlavor::WebLogic => write!(f, "WebLogic"),
            ContainerFlavor::Payara => write!(f, "Payara"),
        }
    }
}

/// Application, domain and server names for one staging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainNames {
    pub app_name: String,
    pub domain_name: String,
    pub server_name: String,
}

impl DomainNames {
    /// Derive names from the platform's application name.
    ///
    /// Without an application name the fixed defaults are used.
    pub fn from_application_name(app_name: Option<&str>) -> Self {
        match app_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => Self {
                app_name: name.to_string(),
                domain_name: format!("{name}Domain"),
                server_name: format!("{name}Server"),
            },
            None => Self {
                app_name: DEFAULT_APP_NAME.to_string(),
                domain_name: DEFAULT_DOMAIN_NAME.to_string(),
                server_name: DEFAULT_SERVER_NAME.to_string(),
            },
        }
    }
}

/// Header fields written into the primary domain document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainConfigurationHeader {
    pub domain_name: String,
    pub server_name: String,
    pub app_name: String,
    pub app_src_path: PathBuf,
    pub install_home: PathBuf,
    pub domain_path: PathBuf,
    pub template_archive_path: Option<PathBuf>,
}

impl DomainConfigurationHeader {
    pub fn new(
        names: DomainNames,
        app_src_path: PathBuf,
        install_home: PathBuf,
        domain_path: PathBuf,
        template_archive_path: Option<PathBuf>,
    ) -> Self {
        Self {
            domain_name: names.domain_name,
            server_name: names.server_name,
            app_name: names.app_name,
            app_src_path,
            install_home,
            domain_path,
            template_archive_path,
        }
    }

    /// Directory the provisioning script creates the domain in.
    pub fn domain_home(&self) -> PathBuf {
        self.domain_path.join(&self.domain_name)
    }

    /// Header values keyed by their document key, in document order.
    pub fn binding_values(&self, flavor: ContainerFlavor) -> IndexMap<String, String> {
        let template_archive = self
            .template_archive_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        let values = [
            self.domain_name.clone(),
            self.server_name.clone(),
            self.install_home.display().to_string(),
            template_archive,
            self.domain_path.display().to_string(),
            self.app_name.clone(),
            self.app_src_path.display().to_string(),
        ];

        flavor
            .header_keys()
            .iter()
            .map(|key| key.to_string())
            .zip(values)
            .collect()
    }
}

/// Replace the header fields of a domain document.
///
/// Every existing line carrying one of the header keys is removed, then fresh
/// `  key: value` lines are appended in header order.
pub fn patch_domain_template(
    text: &str,
    header: &DomainConfigurationHeader,
    flavor: ContainerFlavor,
) -> String {
    let mut patched = flavor.header_lines().replace_all(text, "").into_owned();

    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push('\n');
    }

    for (key, value) in header.binding_values(flavor) {
        patched.push_str(&format!("  {key}: {value}\n"));
    }

    patched
}

/// Patch the domain document at `path` in place.
pub fn patch_domain_document(
    path: &Path,
    header: &DomainConfigurationHeader,
    flavor: ContainerFlavor,
) -> std::io::Result<()> {
    let original = fs::read_to_string(path)?;
    let patched = patch_domain_template(&original, header, flavor);
    fs::write(path, patched)?;

    info!(
        "Updated {} domain header in {} (domain '{}', server '{}')",
        flavor,
        path.display(),
        header.domain_name,
        header.server_name
    );
    debug!(
        "{} points to {}, domainPath points to {}",
        flavor.home_key(),
        header.install_home.display(),
        header.domain_path.display()
    );
    Ok(())
}

/// Substitute `${key}` placeholders with binding values.
///
/// Placeholders without a value are left untouched.
pub fn render(template: &str, values: &IndexMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match values.get(key) {
                Some(value) => value.clone(),
                None => caps.get(0).map(|m| m.as_str()).unwrap_or_default().to_string(),
            }
        })
        .into_owned()
}
