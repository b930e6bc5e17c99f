//! Load, merge and save the persisted changelog document.

use std::io::Write;
use std::path::Path;

use tempfile::Builder;
use tracing::{debug, warn};

use crate::error::ChangelogError;

use super::document::{ChangelogDocument, ChangelogVersion};

/// Default location of the persisted document.
pub const DEFAULT_DOCUMENT_PATH: &str = "changelog.json";

/// Read and parse a persisted document.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<ChangelogDocument>, ChangelogError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let document =
        serde_json::from_str(&content).map_err(|source| ChangelogError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(document))
}

/// Load a document, treating a missing or unreadable file as empty.
pub fn load(path: &Path) -> ChangelogDocument {
    read_document(path)
        .unwrap_or_else(|e| {
            warn!("{}. Starting from an empty changelog.", e);
            None
        })
        .unwrap_or_else(|| {
            debug!(path = %path.display(), "No existing changelog, starting empty");
            ChangelogDocument::default()
        })
}

/// Merge a version into the document.
///
/// A version with the same identifier is replaced where it stands; otherwise
/// the new version is prepended.
pub fn merge(mut document: ChangelogDocument, version: ChangelogVersion) -> ChangelogDocument {
    match document
        .versions
        .iter()
        .position(|existing| existing.version == version.version)
    {
        Some(index) => {
            debug!(version = %version.version, index, "Replacing existing version");
            document.versions[index] = version;
        }
        None => {
            debug!(version = %version.version, "Prepending new version");
            document.versions.insert(0, version);
        }
    }

    document
}

/// Serialize a document to indented JSON.
pub fn to_json(document: &ChangelogDocument) -> Result<String, ChangelogError> {
    serde_json::to_string_pretty(document).map_err(ChangelogError::SerializeFailed)
}

/// Write a document to `path` as indented JSON.
pub fn save(path: &Path, document: &ChangelogDocument) -> Result<(), ChangelogError> {
    write_atomic(path, &to_json(document)?)
}

/// Write text to `path` through a temp file in the same directory.
///
/// An existing file keeps its permissions. A new file gets the same
/// umask-derived mode a plain `std::fs::write` would give it.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let write_err = |source| ChangelogError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = Builder::new();
    builder.prefix(".chronik");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Creation mode is masked by the process umask, like `fs::write`.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(dir).map_err(write_err)?;
    if let Some(permissions) = existing {
        file.as_file()
            .set_permissions(permissions)
            .map_err(write_err)?;
    }
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}
