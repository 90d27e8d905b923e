//! Generation runs: schema in, header and source out

use crate::config::GeneratorConfig;
use crate::descriptor::{BindingDescriptor, BuildOptions, build_descriptors};
use crate::error::GenerateResult;
use crate::naming;
use crate::render::{Dialect, RenderContext, RenderedOutput};
use crate::writer::write_output_file;
use protobind_schema::{ProtoFileInfo, SchemaFile, strip_source_roots};

/// Everything one run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub descriptors: Vec<BindingDescriptor>,
    pub header: RenderedOutput,
    pub source: RenderedOutput,
}

impl GeneratedFiles {
    pub fn header_text(&self) -> String {
        self.header.to_text()
    }

    pub fn source_text(&self) -> String {
        self.source.to_text()
    }
}

/// Render bindings for `schema` in `dialect`.
///
/// `schema_name` is the schema path relative to the source root, including
/// its extension. `header_include` is the path the generated source uses
/// to include the generated header.
pub fn generate(
    schema: &dyn SchemaFile,
    schema_name: &str,
    header_include: &str,
    dialect: Dialect,
    options: BuildOptions,
) -> GenerateResult<GeneratedFiles> {
    let stem = naming::strip_schema_extension(schema_name)?;
    let descriptors = build_descriptors(schema, stem, options)?;
    let proto_header = format!("{stem}.pb.h");
    let ctx = RenderContext {
        schema_name,
        proto_header: &proto_header,
        header_include,
    };

    let renderer = dialect.renderer();
    tracing::debug!(?dialect, schema = schema_name, "rendering bindings");
    let header = renderer.render_header(&ctx, &descriptors)?;
    let source = renderer.render_source(&ctx, &descriptors)?;

    Ok(GeneratedFiles {
        descriptors,
        header,
        source,
    })
}

/// Runs generation under one [`GeneratorConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Generator<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> Generator<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'c GeneratorConfig {
        self.config
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            package_required: !self.config.allow_empty_package,
            generate_service_info: self.config.generate_service_info,
        }
    }

    /// Render bindings for an already-read schema without touching the disk
    pub fn generate(
        &self,
        schema: &dyn SchemaFile,
        schema_name: &str,
    ) -> GenerateResult<GeneratedFiles> {
        let header_include = self.config.header_include_path()?;
        let dialect = self.config.dialect()?;
        generate(
            schema,
            schema_name,
            &header_include,
            dialect,
            self.build_options(),
        )
    }

    /// Read the schema at `protobuf`, render it and write both outputs.
    ///
    /// The header is written before the source. On error neither file
    /// should be trusted.
    pub fn run(&self, protobuf: &str) -> GenerateResult<GeneratedFiles> {
        let (header_path, source_path) = self.config.output_paths()?;
        self.config.header_include_path()?;

        let roots = self.config.strip_roots();
        naming::strip_schema_extension(&strip_source_roots(protobuf, &roots))?;
        let schema = ProtoFileInfo::open(protobuf, &roots)?;

        let files = self.generate(&schema, schema.name())?;
        write_output_file(header_path, &files.header)?;
        write_output_file(source_path, &files.source)?;
        Ok(files)
    }
}
