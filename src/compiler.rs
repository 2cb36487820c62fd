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

//! Domain compilation.
//!
//! One compile pass turns the file set and the platform bindings into the
//! property file the provisioning script consumes. File-set sections are
//! written first, binding sections after them.

use crate::binding::{self, ServiceBinding};
use crate::config::{CompilerSettings, ConfigError};
use crate::document::ConfigDocument;
use crate::emitter::{EmitError, PropertyFileWriter, SectionWriter};
use crate::fileset::load_file_set;
use crate::locator::{locate_domain_document, select_config_root};
use crate::module::classify_document;
use crate::platform::{self, PlatformError};
use crate::template::{patch_domain_document, DomainConfigurationHeader, DomainNames};
use log::{debug, info};
use std::path::{Path, PathBuf};

const OUTPUT_EXTENSION: &str = "props";

/// Errors raised by a compile pass.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Failed to patch domain document '{path}': {source}")]
    Patch {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What a compile pass wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub documents: usize,
    pub file_set_sections: usize,
    pub binding_sections: usize,
    /// Names of bindings that produced no section.
    pub skipped_bindings: Vec<String>,
}

impl CompileSummary {
    pub fn sections_written(&self) -> usize {
        self.file_set_sections + self.binding_sections
    }
}

/// Write one section per document entry, in file-set order.
pub fn compile_file_set<W: SectionWriter + ?Sized>(
    writer: &mut W,
    documents: &[ConfigDocument],
) -> Result<usize, EmitError> {
    let mut written = 0;
    for document in documents {
        debug!(
            "Processing {} as module '{}'",
            document.path.display(),
            document.parent_module
        );
        for entry in classify_document(document) {
            writer.write_section(&entry.into_section())?;
            written += 1;
        }
    }
    Ok(written)
}

/// Write one section per recognized binding, in binding order.
///
/// Returns the number of sections written and the names of skipped bindings.
pub fn compile_bindings<W: SectionWriter + ?Sized>(
    writer: &mut W,
    bindings: &[ServiceBinding],
) -> Result<(usize, Vec<String>), EmitError> {
    let mut written = 0;
    let mut skipped = Vec::new();
    for service in bindings {
        match binding::classify(service).into_section() {
            Some(section) => {
                writer.write_section(&section)?;
                written += 1;
            }
            None => skipped.push(service.name.clone()),
        }
    }
    Ok((written, skipped))
}

/// File-set sections followed by binding sections.
pub fn compile<W: SectionWriter + ?Sized>(
    writer: &mut W,
    documents: &[ConfigDocument],
    bindings: &[ServiceBinding],
) -> Result<CompileSummary, EmitError> {
    let file_set_sections = compile_file_set(writer, documents)?;
    let (binding_sections, skipped_bindings) = compile_bindings(writer, bindings)?;

    Ok(CompileSummary {
        documents: documents.len(),
        file_set_sections,
        binding_sections,
        skipped_bindings,
    })
}

/// Compile into a freshly recreated property file at `output`.
pub fn compile_to_file(
    output: &Path,
    documents: &[ConfigDocument],
    bindings: &[ServiceBinding],
) -> Result<CompileSummary, CompileError> {
    let mut writer = PropertyFileWriter::recreate(output)?;
    let summary = compile(&mut writer, documents, bindings)?;
    info!(
        "Wrote {} sections to {}",
        summary.sections_written(),
        output.display()
    );
    Ok(summary)
}

/// Property file path for a domain document: `.yml` becomes `.props`.
pub fn output_path_for(domain_document: &Path) -> PathBuf {
    domain_document.with_extension(OUTPUT_EXTENSION)
}

/// Result of a full configure-phase pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub domain_document: PathBuf,
    pub output: PathBuf,
    pub header: DomainConfigurationHeader,
    pub summary: CompileSummary,
}

/// Runs one configure-phase pass from [`CompilerSettings`].
///
/// Bindings and the application name are read from the platform
/// environment unless supplied up front.
#[derive(Debug, Clone)]
pub struct DomainCompiler {
    settings: CompilerSettings,
    bindings: Option<Vec<ServiceBinding>>,
    application_name: Option<String>,
}

impl DomainCompiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self {
            settings,
            bindings: None,
            application_name: None,
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<ServiceBinding>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    fn resolve_application_name(&self) -> Result<Option<String>, PlatformError> {
        match self.application_name.clone().or_else(|| self.settings.app_name.clone()) {
            Some(name) => Ok(Some(name)),
            None => platform::application_name_from_env(),
        }
    }

    fn resolve_bindings(&self) -> Result<Vec<ServiceBinding>, PlatformError> {
        match &self.bindings {
            Some(bindings) => Ok(bindings.clone()),
            None => platform::service_bindings_from_env(),
        }
    }

    /// Locate and patch the domain document, load the file set, read the
    /// bindings and write the property file.
    pub fn run(&self) -> Result<CompileReport, CompileError> {
        let settings = &self.settings;
        let app_root = settings.resolved_app_config_root();

        let domain_document = match &settings.domain_document {
            Some(path) => path.clone(),
            None => locate_domain_document(&app_root, &settings.buildpack_config_root)?,
        };

        let names = DomainNames::from_application_name(self.resolve_application_name()?.as_deref());
        let header = DomainConfigurationHeader::new(
            names,
            settings.app_src_path.clone(),
            settings.install_home.clone(),
            settings.domain_path.clone(),
            settings.template_archive.clone(),
        );
        patch_domain_document(&domain_document, &header, settings.container).map_err(|source| {
            CompileError::Patch {
                path: domain_document.display().to_string(),
                source,
            }
        })?;

        let config_root = select_config_root(
            settings.prefer_app_config,
            &app_root,
            &settings.buildpack_config_root,
        );
        info!(
            "Compiling {} domain '{}' from config root {}",
            settings.container,
            header.domain_name,
            config_root.display()
        );

        let documents = load_file_set(&config_root, &domain_document)?;
        let bindings = self.resolve_bindings()?;

        let output = settings
            .output
            .clone()
            .unwrap_or_else(|| output_path_for(&domain_document));
        let summary = compile_to_file(&output, &documents, &bindings)?;

        for name in &summary.skipped_bindings {
            debug!("Service binding '{name}' produced no section");
        }
        info!("Domain home will be {}", header.domain_home().display());

        Ok(CompileReport {
            domain_document,
            output,
            header,
            summary,
        })
    }
}
