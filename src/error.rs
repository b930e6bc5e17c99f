//! Error types for chronik modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to describe HEAD: {0}")]
    DescribeFailed(#[source] git2::Error),
}

/// Errors from reading or writing the persisted changelog document.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read changelog {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse changelog {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize changelog: {0}")]
    SerializeFailed(#[source] serde_json::Error),
}

/// Errors from exporting rendered changelogs.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to export {format}: {source}")]
    WriteFailed {
        format: &'static str,
        #[source]
        source: ChangelogError,
    },

    #[error("Failed to render {format}: {source}")]
    RenderFailed {
        format: &'static str,
        #[source]
        source: ChangelogError,
    },
}

/// Errors from the interactive commit selection prompt.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("Commit selection prompt failed: {0}")]
    PromptFailed(#[source] dialoguer::Error),
}

/// Errors from invalid command-line configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No valid export format in '{0}'. Supported formats: json, md, html")]
    NoValidFormats(String),
}

/// Errors that end a changelog run.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Failed to read commit history: {0}")]
    CommitLog(#[source] GitError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to render preview: {0}")]
    Preview(#[source] ChangelogError),
}
