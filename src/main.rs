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

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};

use domain_config_compiler::emitter::MemorySectionWriter;
use domain_config_compiler::fileset::{discover_documents, load_file_set};
use domain_config_compiler::locator::select_config_root;
use domain_config_compiler::platform::service_bindings_from_env;
use domain_config_compiler::{compile, load_settings_file, CompilerSettings, DomainCompiler};

#[derive(Parser)]
#[command(name = "domain-config-compiler")]
#[command(about = "Compiles domain configuration and service bindings into a provisioning property file")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nrustc: ",
    env!("COMPILER_RUSTC_VERSION"),
))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the settings file
    #[arg(short, long, default_value = "config/compiler.yaml", global = true)]
    settings: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one configure-phase compile pass (default if no subcommand specified)
    Compile {
        /// Override the application name reported by the platform
        #[arg(long)]
        app_name: Option<String>,
    },

    /// Check the settings and the config file set without writing anything
    Validate {
        /// Also list the sections a compile pass would write
        #[arg(long)]
        show_sections: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Compile { app_name }) => run_compile(&cli.settings, app_name),
        Some(Commands::Validate { show_sections }) => validate(&cli.settings, show_sections),
        None => run_compile(&cli.settings, None),
    }
}

/// Load `.env` from the settings file's directory, if present.
fn load_env_file(settings_path: &Path) -> bool {
    let Some(env_file) = settings_path.parent().map(|dir| dir.join(".env")) else {
        return false;
    };
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

/// Initialise logging. `RUST_LOG` wins over the settings log level.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_settings(settings_path: &Path) -> Result<CompilerSettings> {
    load_settings_file(settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))
}

fn run_compile(settings_path: &Path, app_name: Option<String>) -> Result<()> {
    let env_file_loaded = load_env_file(settings_path);
    let settings = load_settings(settings_path)?;
    init_logging(&settings.log_level);

    if env_file_loaded {
        debug!("Loaded .env beside {}", settings_path.display());
    }
    info!("Starting {} domain configuration compile", settings.container);

    let mut compiler = DomainCompiler::new(settings);
    if let Some(name) = app_name {
        compiler = compiler.with_application_name(name);
    }

    let report = compiler.run().context("Domain configuration compile failed")?;
    info!(
        "Compiled {} documents into {} ({} file-set sections, {} binding sections, {} bindings skipped)",
        report.summary.documents,
        report.output.display(),
        report.summary.file_set_sections,
        report.summary.binding_sections,
        report.summary.skipped_bindings.len()
    );
    Ok(())
}

/// First domain document a compile pass would use, without copying anything.
fn preview_domain_document(settings: &CompilerSettings) -> Result<Option<PathBuf>> {
    if let Some(path) = &settings.domain_document {
        return Ok(Some(path.clone()));
    }
    for root in [settings.resolved_app_config_root(), settings.buildpack_config_root.clone()] {
        if let Some(found) = discover_documents(&root)?.into_iter().next() {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

fn validate(settings_path: &Path, show_sections: bool) -> Result<()> {
    println!("Validating settings: {}", settings_path.display());
    println!();

    load_env_file(settings_path);
    let settings = match load_settings_file(settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            println!("[ERROR] Settings are invalid:");
            println!("  {e}");
            anyhow::bail!("Settings file {} is invalid", settings_path.display());
        }
    };
    println!("[OK] Settings file is valid");
    println!();
    println!("Summary:");
    println!("  Container: {}", settings.container);
    println!("  App config root: {}", settings.resolved_app_config_root().display());
    println!("  Buildpack config root: {}", settings.buildpack_config_root.display());
    println!("  Prefer app config: {}", settings.prefer_app_config);

    let Some(domain_document) = preview_domain_document(&settings)? else {
        println!();
        println!("[ERROR] No domain document found under either config root");
        anyhow::bail!("No domain document found for {}", settings_path.display());
    };
    println!("  Domain document: {}", domain_document.display());

    let config_root = select_config_root(
        settings.prefer_app_config,
        &settings.resolved_app_config_root(),
        &settings.buildpack_config_root,
    );
    let documents = load_file_set(&config_root, &domain_document)
        .with_context(|| format!("Failed to load the file set under {}", config_root.display()))?;
    let bindings = service_bindings_from_env().context("Failed to read service bindings")?;

    let mut writer = MemorySectionWriter::new();
    let summary = compile(&mut writer, &documents, &bindings)?;
    println!("  Documents: {}", summary.documents);
    println!("  Service bindings: {}", bindings.len());
    println!("  Sections: {}", summary.sections_written());
    for name in &summary.skipped_bindings {
        println!("[WARN] Service binding '{name}' is not supported and will be skipped");
    }

    if show_sections {
        println!();
        println!("Sections:");
        for header in writer.headers() {
            println!("  [{header}]");
        }
    }

    Ok(())
}
