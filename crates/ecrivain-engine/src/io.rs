use crate::error::EngineError;
use crate::render::Renderer;
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a source file and return its content
pub fn read_source(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|source| EngineError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a rendered document to `path`, returning the number of bytes written.
///
/// The document is written to a temporary file next to `path` and renamed
/// into place, so a failed write never leaves a truncated document behind.
pub fn write_document(renderer: &dyn Renderer, path: &Path) -> Result<usize, EngineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(EngineError::WriteFailure)?;

    let mut staged = NamedTempFile::new_in(dir).map_err(EngineError::WriteFailure)?;
    let written = renderer
        .write(&mut staged)
        .map_err(EngineError::WriteFailure)?;
    staged
        .persist(path)
        .map_err(|e| EngineError::WriteFailure(e.error))?;

    Ok(written)
}
