//! Command-line arguments
//!
//! Flag names keep the underscore spelling build rules already pass
//! (`--header_out`, `--ccdeps_out`, ...). `-h` is the header output, so
//! help is only available as `--help`.

use clap::{ArgAction, Args, Parser};
use protobind_core::{BuildVariant, GenerateResult, GeneratorConfig, Mode};

#[derive(Parser, Debug)]
#[command(name = "protobind")]
#[command(
    author,
    version,
    about = "Generate CLIF C++ converters for protocol buffer types",
    long_about = None,
    disable_help_flag = true
)]
pub struct Cli {
    /// Input .proto file
    #[arg(value_name = "PROTOBUF")]
    pub protobuf: String,

    #[command(flatten)]
    pub options: GeneratorOptions,

    /// TOML file with default generator options
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Also write the binding descriptors as JSON
    #[arg(long = "dump_descriptors", value_name = "FILE")]
    pub dump_descriptors: Option<String>,

    /// Log filter (overrides RUST_LOG)
    #[arg(long = "log_level", value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Flags overlaid on the loaded [`GeneratorConfig`]
#[derive(Args, Debug, Default)]
pub struct GeneratorOptions {
    /// Root stripped from the input path
    #[arg(long = "source_dir", value_name = "DIR")]
    pub source_dir: Option<String>,

    /// Root the header output must be nested under
    #[arg(long = "bin_dir", value_name = "DIR")]
    pub bin_dir: Option<String>,

    /// Deprecated; accepted as an extra root stripped from the input path
    #[arg(long = "genfiles_dir", value_name = "DIR")]
    pub genfiles_dir: Option<String>,

    /// Output C++ source file
    #[arg(short = 'c', long = "ccdeps_out", value_name = "FILE")]
    pub ccdeps_out: Option<String>,

    /// Output C++ header file
    #[arg(short = 'h', long = "header_out", value_name = "FILE")]
    pub header_out: Option<String>,

    /// Generate into ::clif for protos without a package
    #[arg(long = "allow_empty_package")]
    pub allow_empty_package: bool,

    /// Code generation mode: c_api or pybind11
    #[arg(long = "pyclif_codegen_mode", value_name = "MODE")]
    pub pyclif_codegen_mode: Option<String>,

    /// Also generate capsule converters for services
    #[arg(long = "generate_service_info")]
    pub generate_service_info: bool,
}

impl GeneratorOptions {
    /// Overwrite the fields of `config` given on the command line.
    ///
    /// Fails with [`protobind_core::GenerateError::UnsupportedMode`] for an unknown mode
    /// name, leaving `config` untouched.
    pub fn apply(&self, config: &mut GeneratorConfig) -> GenerateResult<()> {
        let mode = self
            .pyclif_codegen_mode
            .as_deref()
            .map(str::parse::<Mode>)
            .transpose()?;

        let overlay = |field: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                field.clone_from(value);
            }
        };
        overlay(&mut config.source_dir, &self.source_dir);
        overlay(&mut config.bin_dir, &self.bin_dir);
        overlay(&mut config.genfiles_dir, &self.genfiles_dir);

        if self.ccdeps_out.is_some() {
            config.ccdeps_out.clone_from(&self.ccdeps_out);
        }
        if self.header_out.is_some() {
            config.header_out.clone_from(&self.header_out);
        }
        if let Some(mode) = mode {
            config.pyclif_codegen_mode = mode;
        }
        config.allow_empty_package |= self.allow_empty_package;
        config.generate_service_info |= self.generate_service_info;
        Ok(())
    }
}

/// Variant this binary was built as
pub fn build_variant() -> BuildVariant {
    if cfg!(feature = "pybind11") {
        BuildVariant::Internal
    } else {
        BuildVariant::OpenSource
    }
}
