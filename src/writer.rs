//! Deterministic JSON file output.
//!
//! Format is fixed because downstream generators diff and parse these files:
//! two-space indentation, UTF-8 with non-ASCII written literally, keys in the
//! map's own iteration order, no trailing newline.

use serde::Serialize;
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{ExportError, ExportResult};

/// Render `value` exactly as [`write_json`] would store it.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize `value` to `path`, replacing any existing file.
///
/// Missing parent directories are created. The content goes to a temporary
/// file next to the destination and is renamed into place, so a failed write
/// never leaves a truncated file behind. An existing destination keeps its
/// permissions; a new one gets the usual `0644`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> ExportResult<()> {
    let content = to_json_string(value)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.flush())
        .map_err(|e| ExportError::io(path, e))?;

    let permissions = match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.permissions()),
        _ => default_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| ExportError::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| ExportError::io(path, e.error))?;

    tracing::debug!(target: "writer", "wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

// Temporary files are created 0600.
#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}
