//! Configuration loading
//!
//! `defaults/pkfield.default.toml` is embedded into the binary, so running without any
//! configuration reproduces the fixed `p: ` / ` k:` behavior. A user file passed with
//! `--config` and individual overrides from the command line are layered on top via
//! [`Loader`] before deserializing into [`Settings`].

use crate::error::ConfigError;
use crate::extraction::Markers;
use crate::processor::OutputFormat;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pkfield.default.toml");

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub markers: Markers,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            output: OutputSettings {
                format: OutputFormat::Plain,
            },
        }
    }
}

impl Settings {
    /// Reject settings the extractor cannot work with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.markers.start.is_empty() {
            return Err(ConfigError::EmptyMarker("markers.start"));
        }
        if self.markers.end.is_empty() {
            return Err(ConfigError::EmptyMarker("markers.end"));
        }
        Ok(self)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder, deserialize and validate the resulting settings.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.builder.build()?.try_deserialize()?;
        settings.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn supports_overrides() {
        let settings = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.markers, Markers::default());
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[markers]\nstart = \"<\"\nend = \">\"").expect("write config");

        let settings = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(settings.markers, Markers::new("<", ">"));
        assert_eq!(settings.output.format, OutputFormat::Plain);
    }

    #[test]
    fn missing_user_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/pkfield.toml").build();
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn rejects_empty_marker() {
        let result = Loader::new()
            .set_override("markers.end", "")
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(ConfigError::EmptyMarker("markers.end"))));
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build();
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
