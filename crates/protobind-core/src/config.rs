//! Generator configuration types

use crate::error::{GenerateError, GenerateResult};
use crate::render::Dialect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Code generation mode, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Mode {
    /// Python C-API conversion functions
    #[default]
    CApi,
    /// Forwarding declarations for the pybind11 native proto caster
    Pybind11,
}

impl Mode {
    /// Select the output dialect for this mode under `variant`
    pub fn dialect(self, variant: BuildVariant) -> GenerateResult<Dialect> {
        match (self, variant) {
            (Mode::CApi, _) => Ok(Dialect::Full),
            (Mode::Pybind11, BuildVariant::Internal) => Ok(Dialect::Delegate),
            (Mode::Pybind11, BuildVariant::OpenSource) => Err(GenerateError::UnsupportedMode(
                "the pybind11 code generator does not work with the open-source build".into(),
            )),
        }
    }
}

impl FromStr for Mode {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c_api" => Ok(Mode::CApi),
            "pybind11" => Ok(Mode::Pybind11),
            other => Err(GenerateError::UnsupportedMode(format!(
                "unknown codegen mode `{other}` (expected `c_api` or `pybind11`)"
            ))),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = GenerateError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::CApi => write!(f, "c_api"),
            Mode::Pybind11 => write!(f, "pybind11"),
        }
    }
}

/// Build flavor of the generator itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildVariant {
    /// Public build; only the C-API dialect is available
    #[default]
    OpenSource,
    /// Build with the pybind11 caster headers available
    Internal,
}

const MODE_KEY: &str = "pyclif_codegen_mode";

/// Configuration for one generation run
///
/// Loaded from TOML and/or filled from command-line flags. Read-only once a
/// run starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root stripped from the input schema path
    pub source_dir: String,

    /// Root that `header_out` must be nested under
    pub bin_dir: String,

    /// Deprecated extra root stripped from the input schema path
    pub genfiles_dir: String,

    /// Destination of the generated source file
    pub ccdeps_out: Option<String>,

    /// Destination of the generated header file
    pub header_out: Option<String>,

    /// Generate into the fallback namespace for package-less schemas
    pub allow_empty_package: bool,

    /// Output dialect selector
    pub pyclif_codegen_mode: Mode,

    /// Also generate capsule converters for services
    pub generate_service_info: bool,

    /// Build flavor; never read from configuration files
    #[serde(skip)]
    pub build_variant: BuildVariant,
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text.
    ///
    /// An unknown `pyclif_codegen_mode` name is an
    /// [`GenerateError::UnsupportedMode`], not a configuration error.
    pub fn from_toml_str(content: &str) -> GenerateResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        if let Some(name) = table.get(MODE_KEY).and_then(toml::Value::as_str) {
            name.parse::<Mode>()?;
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> GenerateResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GenerateError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Both output paths, `(header, source)`
    pub fn output_paths(&self) -> GenerateResult<(&str, &str)> {
        match (self.header_out.as_deref(), self.ccdeps_out.as_deref()) {
            (Some(header), Some(source)) if !header.is_empty() && !source.is_empty() => {
                Ok((header, source))
            }
            _ => Err(GenerateError::Config(
                "both output files (ccdeps_out and header_out) must be specified".into(),
            )),
        }
    }

    /// The path generated sources use to include the header.
    ///
    /// This is `header_out` relative to `bin_dir`, which must contain it.
    pub fn header_include_path(&self) -> GenerateResult<String> {
        let (header, _) = self.output_paths()?;
        if self.bin_dir.is_empty() {
            return Ok(header.to_string());
        }
        if self.bin_dir.ends_with('/') {
            return Err(GenerateError::Config(format!(
                "bin_dir must not end with '/': {}",
                self.bin_dir
            )));
        }
        header
            .strip_prefix(self.bin_dir.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                GenerateError::Config(format!(
                    "header_out {header} is not under bin_dir {}",
                    self.bin_dir
                ))
            })
    }

    /// Roots stripped from the input schema path, in priority order
    pub fn strip_roots(&self) -> Vec<&str> {
        [self.source_dir.as_str(), self.genfiles_dir.as_str()]
            .into_iter()
            .filter(|root| !root.is_empty())
            .collect()
    }

    /// Output dialect for the configured mode and build variant
    pub fn dialect(&self) -> GenerateResult<Dialect> {
        self.pyclif_codegen_mode.dialect(self.build_variant)
    }
}

#[cfg(test)]
#[path = "config/config_tests.rs"]
mod config_tests;
