//! JSON passthrough renderer.

use crate::changelog::{ChangelogDocument, store};
use crate::error::ChangelogError;

use super::Renderer;

/// Renders the document exactly as it is persisted.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, document: &ChangelogDocument) -> Result<String, ChangelogError> {
        store::to_json(document)
    }
}
