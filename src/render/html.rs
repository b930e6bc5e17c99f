//! Standalone HTML renderer.

use std::borrow::Cow;

use crate::changelog::{Category, ChangelogDocument, ChangelogVersion};
use crate::error::ChangelogError;

use super::{CHANGELOG_TITLE, Renderer, escape_html};

const STYLE: &str = r#"    body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif; max-width: 800px; margin: 40px auto; padding: 0 20px; color: #24292e; line-height: 1.6; }
    h1 { border-bottom: 2px solid #eaecef; padding-bottom: 10px; }
    .version { margin-bottom: 40px; }
    .version h2 { color: #0366d6; border-bottom: 1px solid #eaecef; padding-bottom: 6px; }
    h3 { margin-bottom: 8px; }
    h3.feature { color: #28a745; }
    h3.fix { color: #d73a49; }
    h3.performance { color: #f66a0a; }
    h3.other { color: #6a737d; }
    ul { padding-left: 24px; }
    li { margin: 4px 0; }
"#;

/// Renders a complete HTML page with one container per version.
///
/// Entry text is inserted verbatim unless `escape` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    pub escape: bool,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape entry text and headings with [`escape_html`].
    pub fn escaped() -> Self {
        Self { escape: true }
    }

    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.escape {
            escape_html(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn class_for(category: &Category) -> &'static str {
        match category {
            Category::Feature => "feature",
            Category::Fix => "fix",
            Category::Performance => "performance",
            _ => "other",
        }
    }

    fn format_version(&self, version: &ChangelogVersion) -> String {
        let mut section = String::from("  <div class=\"version\">\n");
        section.push_str(&format!(
            "    <h2>{} - {}</h2>\n",
            self.text(&version.version),
            self.text(&version.date)
        ));

        for (category, entries) in version.entries_by_category() {
            section.push_str(&format!(
                "    <h3 class=\"{}\">{}</h3>\n",
                Self::class_for(category),
                category.label()
            ));
            section.push_str("    <ul>\n");
            for entry in entries {
                section.push_str(&format!("      <li>{}</li>\n", self.text(&entry.text)));
            }
            section.push_str("    </ul>\n");
        }

        section.push_str("  </div>\n");
        section
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, document: &ChangelogDocument) -> Result<String, ChangelogError> {
        let mut output = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("  <meta charset=\"UTF-8\">\n");
        output.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        output.push_str(&format!("  <title>{}</title>\n", CHANGELOG_TITLE));
        output.push_str("  <style>\n");
        output.push_str(STYLE);
        output.push_str("  </style>\n</head>\n<body>\n");
        output.push_str(&format!("  <h1>{}</h1>\n", CHANGELOG_TITLE));

        for version in &document.versions {
            output.push_str(&self.format_version(version));
        }

        output.push_str("</body>\n</html>\n");
        Ok(output)
    }
}
