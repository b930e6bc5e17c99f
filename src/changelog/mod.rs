//! Changelog document model, category mapping and persistence.

pub mod category;
pub mod document;
pub mod store;

pub use category::{Category, canonicalize};
pub use document::{ChangelogDocument, ChangelogEntry, ChangelogVersion};
pub use store::{load, merge, read_document, save};
