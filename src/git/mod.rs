//! Git history access and conventional commit parsing.

pub mod commits;
pub mod source;

pub use commits::{CommitType, END_MARKER, ParsedCommit, harvest, parse_subject};
pub use source::{CommitSource, GitSource};
