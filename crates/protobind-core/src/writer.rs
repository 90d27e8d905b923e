//! Line writing and output file replacement

use crate::error::{GenerateError, GenerateResult};
use crate::render::RenderedOutput;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write each line followed by a newline
pub fn write_lines<W, I, S>(out: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        out.write_all(line.as_ref().as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Replace the file at `path` with `output`.
///
/// The lines are written to a temporary file next to `path` which is then
/// renamed over it, so readers never observe a partially written file.
pub fn write_output_file(path: impl AsRef<Path>, output: &RenderedOutput) -> GenerateResult<()> {
    let path = path.as_ref();
    let io_error = |source: io::Error| GenerateError::Io {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = NamedTempFile::new_in(dir).map_err(io_error)?;

    let mut writer = BufWriter::new(file);
    output.write_to(&mut writer).map_err(io_error)?;
    let file = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
    file.persist(path).map_err(|e| io_error(e.error))?;

    tracing::info!(path = %path.display(), lines = output.len(), "wrote output file");
    Ok(())
}
