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

pub mod binding;
pub mod compiler;
pub mod config;
pub mod document;
pub mod emitter;
pub mod fileset;
pub mod jdbc;
pub mod locator;
pub mod module;
pub mod platform;
pub mod template;

// Main exports for library users
pub use binding::{classify, BindingKind, ServiceBinding};
pub use compiler::{
    compile, compile_to_file, output_path_for, CompileError, CompileReport, CompileSummary,
    DomainCompiler,
};
pub use config::{load_settings_file, CompilerSettings, ConfigError};
pub use document::{Attributes, ConfigDocument};
pub use emitter::{EmitError, MemorySectionWriter, PropertyFileWriter, PropertySection, SectionWriter};
pub use jdbc::{normalize, JdbcInput, JdbcPoolDefinition, Vendor};
pub use platform::PlatformError;
pub use template::{ContainerFlavor, DomainConfigurationHeader, DomainNames};
