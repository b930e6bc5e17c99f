//! chronik - An interactive CLI that curates conventional commits into a versioned changelog.
//!
//! # Overview
//!
//! chronik reads the commits since the latest tag, offers the conventional
//! ones for selection, merges the chosen entries into a JSON changelog keyed
//! by version, and renders that document as JSON, Markdown and HTML.

pub mod changelog;
pub mod config;
pub mod error;
pub mod export;
pub mod git;
pub mod release;
pub mod render;
pub mod select;

// Re-export commonly used types
pub use changelog::{Category, ChangelogDocument, ChangelogEntry, ChangelogVersion, canonicalize};
pub use config::Config;
pub use error::{ChangelogError, ConfigError, ExportError, GitError, ReleaseError, SelectionError};
pub use export::{ExportFormat, ExportReport, RenderOptions, export};
pub use git::{CommitSource, CommitType, GitSource, ParsedCommit, harvest, parse_subject};
pub use release::{RunOutcome, run};
pub use render::{HtmlRenderer, JsonRenderer, MarkdownRenderer, Renderer, escape_html};
pub use select::{AutoSelector, Choice, CommitSelector, PromptSelector};
