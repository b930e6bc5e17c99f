//! Run configuration resolved from the command line.

use std::path::PathBuf;

use tracing::warn;

use crate::changelog::store::DEFAULT_DOCUMENT_PATH;
use crate::error::ConfigError;
use crate::export::{ExportFormat, RenderOptions};
use crate::git::CommitType;

/// Version label used when there is no tag and no override.
pub const DEFAULT_VERSION: &str = "v0.1.0";

/// Default comma-separated export formats.
pub const DEFAULT_FORMATS: &str = "json,md";

/// Default comma-separated allowed commit types.
pub const DEFAULT_TYPES: &str = "feat,fix,perf";

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct Config {
    pub formats: Vec<ExportFormat>,
    pub output_dir: PathBuf,
    pub version: Option<String>,
    pub allowed_types: Vec<CommitType>,
    pub input: PathBuf,
    pub render: RenderOptions,
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Json, ExportFormat::Markdown],
            output_dir: PathBuf::from("."),
            version: None,
            allowed_types: vec![CommitType::Feat, CommitType::Fix, CommitType::Perf],
            input: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            render: RenderOptions::default(),
            dry_run: false,
        }
    }
}

impl Config {
    /// Build a config from raw CSV flag values.
    ///
    /// Fails only when `formats` contains no valid format.
    pub fn from_flags(formats: &str, types: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            formats: ExportFormat::parse_list(formats)?,
            allowed_types: parse_types(types),
            ..Self::default()
        })
    }
}

/// Parse a comma-separated commit type list, skipping unknown tokens.
pub fn parse_types(csv: &str) -> Vec<CommitType> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| match token.parse::<CommitType>() {
            Ok(commit_type) => Some(commit_type),
            Err(e) => {
                warn!("{}. Ignoring.", e);
                None
            }
        })
        .collect()
}
