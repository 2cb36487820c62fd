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

//! Platform service binding classification.
//!
//! Each binding the platform attaches to the application is routed by its
//! label: managed databases become JDBC pools, CloudAMQP instances become
//! foreign JMS providers and `user-provided` services are inspected further.
//! Rules are evaluated in declaration order and the first match wins.

use crate::document::Attributes;
use crate::emitter::PropertySection;
use crate::jdbc::{self, JdbcInput};
use crate::module::SectionPrefix;
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

const USER_PROVIDED_LABEL: &str = "user-provided";
const AMQP_SECTION_PREFIX: &str = "ForeignJMS-AQMP-";
const AMQP_INITIAL_CONTEXT_FACTORY: &str =
    "org.apache.qpid.amqp_1_0.jms.jndi.PropertiesFileInitialContextFactory";

lazy_static! {
    static ref JDBC_LABEL: Regex =
        Regex::new(r"(?i)cleardb|elephantsql|oracle|postgres|mysql|mariadb").expect("Invalid regex pattern");
    static ref AMQP_LABEL: Regex = Regex::new(r"(?i)cloudamqp").expect("Invalid regex pattern");
    static ref USER_PROVIDED_RULES: Vec<(Regex, UserProvidedClass)> = vec![
        (Regex::new(r"(?i)jdbc").expect("Invalid regex pattern"), UserProvidedClass::Jdbc),
        (Regex::new(r"(?i)amqp").expect("Invalid regex pattern"), UserProvidedClass::Amqp),
        (Regex::new(r"(?i)jmsServer").expect("Invalid regex pattern"), UserProvidedClass::JmsServer),
        (Regex::new(r"(?i)jndiProperties").expect("Invalid regex pattern"), UserProvidedClass::ForeignJms),
    ];
}

/// A service instance attached to the application by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceBinding {
    pub name: String,
    pub label: String,
    pub credentials: Attributes,
    pub tags: Vec<String>,
}

impl ServiceBinding {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Everything a user-provided service says about itself, as one text.
    fn descriptive_text(&self) -> String {
        let mut text = format!("name={} label={}", self.name, self.label);
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        for (key, value) in &self.credentials {
            text.push(' ');
            text.push_str(key);
            text.push('=');
            text.push_str(value);
        }
        text
    }
}

/// Route chosen by the binding's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelClass {
    Jdbc,
    Amqp,
    UserProvided,
    Unknown,
}

/// Route chosen for a `user-provided` binding by its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserProvidedClass {
    Jdbc,
    Amqp,
    JmsServer,
    ForeignJms,
    Generic,
}

pub fn label_class(label: &str) -> LabelClass {
    if JDBC_LABEL.is_match(label) {
        LabelClass::Jdbc
    } else if AMQP_LABEL.is_match(label) {
        LabelClass::Amqp
    } else if label.contains(USER_PROVIDED_LABEL) {
        LabelClass::UserProvided
    } else {
        LabelClass::Unknown
    }
}

pub fn user_provided_class(binding: &ServiceBinding) -> UserProvidedClass {
    let text = binding.descriptive_text();
    USER_PROVIDED_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&text))
        .map(|(_, class)| *class)
        .unwrap_or(UserProvidedClass::Generic)
}

/// AMQP broker exposed to the server as a foreign JMS provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmqpEndpoint {
    pub name: String,
    pub uri: String,
}

impl AmqpEndpoint {
    pub fn from_binding(binding: &ServiceBinding) -> Self {
        let uri = binding.credentials.get("uri").cloned().unwrap_or_else(|| {
            warn!("AMQP binding '{}' has no uri credential", binding.name);
            String::new()
        });
        Self {
            name: binding.name.clone(),
            uri,
        }
    }

    pub fn jndi_properties(&self) -> String {
        format!(
            "javax.naming.factory.initial={AMQP_INITIAL_CONTEXT_FACTORY};javax.naming.provider.url={}",
            self.uri
        )
    }

    pub fn to_section(&self) -> PropertySection {
        PropertySection::new(format!("{AMQP_SECTION_PREFIX}{}", self.name))
            .with_entry("name", &self.name)
            .with_entry("jndiProperties", self.jndi_properties())
    }
}

/// Classified binding with everything needed to emit its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    Jdbc(JdbcInput),
    Amqp(AmqpEndpoint),
    UserProvidedJdbc(JdbcInput),
    UserProvidedAmqp(AmqpEndpoint),
    UserProvidedJmsServer { header: String, credentials: Attributes },
    UserProvidedForeignJms { header: String, credentials: Attributes },
    UserProvidedGeneric { header: String, credentials: Attributes },
    Unknown { name: String, label: String },
}

/// Classify a binding. Rules apply in order; the first match wins.
pub fn classify(binding: &ServiceBinding) -> BindingKind {
    debug!("Classifying service binding '{}' of type '{}'", binding.name, binding.label);

    match label_class(&binding.label) {
        LabelClass::Jdbc => BindingKind::Jdbc(JdbcInput::from_binding(binding)),
        LabelClass::Amqp => BindingKind::Amqp(AmqpEndpoint::from_binding(binding)),
        LabelClass::UserProvided => match user_provided_class(binding) {
            UserProvidedClass::Jdbc => BindingKind::UserProvidedJdbc(JdbcInput::from_binding(binding)),
            UserProvidedClass::Amqp => BindingKind::UserProvidedAmqp(AmqpEndpoint::from_binding(binding)),
            UserProvidedClass::JmsServer => BindingKind::UserProvidedJmsServer {
                header: SectionPrefix::Jms.apply(&binding.name),
                credentials: binding.credentials.clone(),
            },
            UserProvidedClass::ForeignJms => BindingKind::UserProvidedForeignJms {
                header: SectionPrefix::ForeignJms.apply_ignore_case(&binding.name),
                credentials: binding.credentials.clone(),
            },
            UserProvidedClass::Generic => {
                warn!(
                    "Unrecognized user-provided service '{}', saving its credentials as-is",
                    binding.name
                );
                BindingKind::UserProvidedGeneric {
                    header: binding.name.clone(),
                    credentials: binding.credentials.clone(),
                }
            }
        },
        LabelClass::Unknown => {
            warn!(
                "Skipping service binding '{}' of unsupported type '{}'",
                binding.name, binding.label
            );
            BindingKind::Unknown {
                name: binding.name.clone(),
                label: binding.label.clone(),
            }
        }
    }
}

impl BindingKind {
    /// Property section for this binding; `None` for unknown bindings.
    pub fn into_section(self) -> Option<PropertySection> {
        match self {
            BindingKind::Jdbc(input) | BindingKind::UserProvidedJdbc(input) => {
                Some(jdbc::normalize(input).to_section())
            }
            BindingKind::Amqp(endpoint) | BindingKind::UserProvidedAmqp(endpoint) => {
                Some(endpoint.to_section())
            }
            BindingKind::UserProvidedJmsServer { header, credentials }
            | BindingKind::UserProvidedForeignJms { header, credentials }
            | BindingKind::UserProvidedGeneric { header, credentials } => {
                let mut section = PropertySection::new(header);
                for (key, value) in credentials {
                    section.push(key, value);
                }
                Some(section)
            }
            BindingKind::Unknown { .. } => None,
        }
    }
}
