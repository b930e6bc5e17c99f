//! Render a changelog document into the requested output files.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::changelog::{ChangelogDocument, store::write_atomic};
use crate::error::{ConfigError, ExportError};
use crate::render::{HtmlRenderer, JsonRenderer, MarkdownRenderer, Renderer};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Markdown,
    Html,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Fixed file name written for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Json => "changelog.json",
            Self::Markdown => "CHANGELOG.md",
            Self::Html => "changelog.html",
        }
    }

    /// Parse a comma-separated format list.
    ///
    /// Unknown tokens are skipped with a warning. Duplicates are kept. Fails
    /// only when nothing valid remains.
    pub fn parse_list(csv: &str) -> Result<Vec<Self>, ConfigError> {
        let formats: Vec<Self> = csv
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| match token.parse::<Self>() {
                Ok(format) => Some(format),
                Err(e) => {
                    warn!("{}. Skipping.", e);
                    None
                }
            })
            .collect();

        if formats.is_empty() {
            return Err(ConfigError::NoValidFormats(csv.to_string()));
        }

        Ok(formats)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

/// Rendering switches that apply across formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub escape_html: bool,
}

/// One successfully written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub format: ExportFormat,
    pub path: PathBuf,
}

/// Compute the output path for a format.
pub fn output_path(output_dir: &Path, format: ExportFormat) -> PathBuf {
    output_dir.join(format.file_name())
}

/// Render `document` in each format, in the order given, and write the files.
///
/// Duplicate formats are written again. Existing files are overwritten.
pub fn export(
    document: &ChangelogDocument,
    formats: &[ExportFormat],
    output_dir: &Path,
    options: RenderOptions,
) -> Result<Vec<ExportReport>, ExportError> {
    if !formats.is_empty() && !output_dir.as_os_str().is_empty() && !output_dir.exists() {
        std::fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;
    }

    let mut reports = Vec::with_capacity(formats.len());

    for &format in formats {
        let rendered = render(document, format, options).map_err(|source| {
            ExportError::RenderFailed {
                format: format.as_str(),
                source,
            }
        })?;

        let path = output_path(output_dir, format);
        write_atomic(&path, &rendered).map_err(|source| ExportError::WriteFailed {
            format: format.as_str(),
            source,
        })?;

        info!(format = %format, path = %path.display(), "Exported changelog");
        reports.push(ExportReport { format, path });
    }

    Ok(reports)
}

/// Render a document in one format without writing it.
pub fn render(
    document: &ChangelogDocument,
    format: ExportFormat,
    options: RenderOptions,
) -> Result<String, crate::error::ChangelogError> {
    match format {
        ExportFormat::Json => JsonRenderer.render(document),
        ExportFormat::Markdown => MarkdownRenderer.render(document),
        ExportFormat::Html => HtmlRenderer {
            escape: options.escape_html,
        }
        .render(document),
    }
}
