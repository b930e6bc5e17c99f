//! Changelog renderers.

mod html;
mod json;
mod markdown;

use std::borrow::Cow;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;

use crate::changelog::ChangelogDocument;
use crate::error::ChangelogError;

/// Top-level heading of the Markdown and HTML exports.
pub const CHANGELOG_TITLE: &str = "Changelog";

/// Turns a changelog document into text.
///
/// Implementations are pure: the same document always renders the same text.
pub trait Renderer {
    fn render(&self, document: &ChangelogDocument) -> Result<String, ChangelogError>;
}

/// Escape the five HTML-significant characters.
///
/// Borrows the input when nothing needs escaping.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
