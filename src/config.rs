//! Configuration management for the form guard
//!
//! Layers built-in defaults, an optional `form_guard.toml` and
//! `FORM_GUARD_*` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashSet;

use crate::dom::SurfaceClasses;
use crate::dom::surface::{DEFAULT_ERROR_CLASS, DEFAULT_INVALID_CLASS};
use crate::rules::FieldRule;
use crate::rules::presets;

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "form_guard";

/// Environment variable prefix, e.g. `FORM_GUARD_ERROR_CLASS`
pub const ENV_PREFIX: &str = "FORM_GUARD";

/// One guarded form and its ordered rule table
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub form_id: String,

    /// Toggle the invalid class on inputs (register page behaviour)
    #[serde(default)]
    pub mark_invalid: bool,

    pub fields: Vec<FieldRule>,
}

impl FormConfig {
    pub fn field_ids(&self) -> Vec<&str> {
        self.fields.iter().map(|r| r.field_id.as_str()).collect()
    }
}

/// Complete guard configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GuardConfig {
    /// Class of the inline error node inserted after an input
    pub error_class: String,

    /// Class toggled on invalid inputs
    pub invalid_class: String,

    #[serde(default = "presets::default_forms")]
    pub forms: Vec<FormConfig>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            error_class: DEFAULT_ERROR_CLASS.to_string(),
            invalid_class: DEFAULT_INVALID_CLASS.to_string(),
            forms: presets::default_forms(),
        }
    }
}

impl GuardConfig {
    /// Load configuration from `form_guard.toml` (if present) with
    /// environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::finish(
            Self::builder()?
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    /// Load from an explicit file path; the file must exist
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        Self::finish(
            Self::builder()?
                .add_source(File::with_name(path))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    /// Parse TOML text on top of the defaults, without environment
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        Self::finish(Self::builder()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("error_class", DEFAULT_ERROR_CLASS)?
            .set_default("invalid_class", DEFAULT_INVALID_CLASS)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        let config: GuardConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Class names handed to the document surface
    pub fn classes(&self) -> SurfaceClasses {
        SurfaceClasses {
            error_class: self.error_class.clone(),
            invalid_class: self.invalid_class.clone(),
        }
    }

    pub fn form(&self, form_id: &str) -> Option<&FormConfig> {
        self.forms.iter().find(|f| f.form_id == form_id)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.error_class.trim().is_empty() || self.invalid_class.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "error_class and invalid_class cannot be empty".into(),
            ));
        }

        if self.error_class == self.invalid_class {
            return Err(config::ConfigError::Message(
                "error_class and invalid_class must differ".into(),
            ));
        }

        if self.forms.is_empty() {
            return Err(config::ConfigError::Message(
                "at least one form must be configured".into(),
            ));
        }

        let mut form_ids = HashSet::new();
        for form in &self.forms {
            if form.form_id.is_empty() {
                return Err(config::ConfigError::Message(
                    "form_id cannot be empty".into(),
                ));
            }
            if !form_ids.insert(form.form_id.as_str()) {
                return Err(config::ConfigError::Message(format!(
                    "duplicate form_id: {}",
                    form.form_id
                )));
            }
            if form.fields.is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "form {} has no fields",
                    form.form_id
                )));
            }

            let mut field_ids = HashSet::new();
            for rule in &form.fields {
                if rule.field_id.is_empty() || rule.field_id == form.form_id {
                    return Err(config::ConfigError::Message(format!(
                        "form {} has an invalid field_id: {:?}",
                        form.form_id, rule.field_id
                    )));
                }
                if !field_ids.insert(rule.field_id.as_str()) {
                    return Err(config::ConfigError::Message(format!(
                        "form {} repeats field {}",
                        form.form_id, rule.field_id
                    )));
                }
                if rule.error_text.trim().is_empty() {
                    return Err(config::ConfigError::Message(format!(
                        "field {} in form {} needs error_text",
                        rule.field_id, form.form_id
                    )));
                }
            }
        }

        Ok(())
    }
}
