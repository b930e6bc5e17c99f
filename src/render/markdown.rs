//! Grouped Markdown renderer.

use crate::changelog::{ChangelogDocument, ChangelogVersion};
use crate::error::ChangelogError;

use super::{CHANGELOG_TITLE, Renderer};

/// Renders one section per version with entries grouped by category.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Format a single version section.
    pub fn format_version(&self, version: &ChangelogVersion) -> String {
        let mut section = format!("## {} - {}\n\n", version.version, version.date);

        for (category, entries) in version.entries_by_category() {
            section.push_str(&format!("### {}\n\n", category.label()));

            for entry in entries {
                section.push_str(&format!("- {}\n", entry.text));
            }

            section.push('\n');
        }

        section
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, document: &ChangelogDocument) -> Result<String, ChangelogError> {
        let mut output = format!("# {}\n\n", CHANGELOG_TITLE);

        for version in &document.versions {
            output.push_str(&self.format_version(version));
        }

        let mut output = output.trim_end().to_string();
        output.push('\n');
        Ok(output)
    }
}
