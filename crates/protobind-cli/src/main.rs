//! protobind CLI - CLIF converter generator for protocol buffers
//!
//! ```text
//! protobind --source_dir=SRC --bin_dir=BIN -h BIN/pkg/foo_clif.h -c BIN/pkg/foo_clif.cc SRC/pkg/foo.proto
//! ```
//!
//! Exits with 0 on success, or with [`GenerateError::error_code`] when
//! generation fails (1 for other failures).

use anyhow::Context;
use clap::Parser;
use protobind_core::{GenerateError, Generator, GeneratorConfig};

mod args;
mod logging;

use args::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("protobind: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    logging::init(cli.log_level.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("failed to load config {path}"))?,
        None => GeneratorConfig::new(),
    };
    cli.options.apply(&mut config)?;
    config.build_variant = args::build_variant();
    tracing::debug!(?config, "effective configuration");

    let files = Generator::new(&config).run(&cli.protobuf)?;

    if let Some(path) = &cli.dump_descriptors {
        let json = serde_json::to_string_pretty(&files.descriptors)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("failed to write descriptors to {path}"))?;
    }
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<GenerateError>()
        .map_or(1, GenerateError::error_code)
}
