//! Changelog categories and the commit type mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::git::CommitType;

/// The grouping an entry is listed under.
///
/// Serializes to its lowercase name (e.g. `"feature"`). Names that are not
/// recognised on load are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Feature,
    Fix,
    Performance,
    Chore,
    Docs,
    Style,
    Refactor,
    Test,
    Build,
    Ci,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Feature => "feature",
            Self::Fix => "fix",
            Self::Performance => "performance",
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Other(name) => name,
        }
    }

    /// Heading shown above the category in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feature => "✨ New Features",
            Self::Fix => "🐛 Fixes",
            Self::Performance => "⚡ Performance",
            _ => "📦 Other",
        }
    }

    /// Position among the primary categories, which always render first.
    pub fn primary_rank(&self) -> Option<u8> {
        match self {
            Self::Feature => Some(0),
            Self::Fix => Some(1),
            Self::Performance => Some(2),
            _ => None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.primary_rank().is_some()
    }

    /// Parse a stored category name. Never fails; unknown names become `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "feature" => Self::Feature,
            "fix" => Self::Fix,
            "performance" => Self::Performance,
            "chore" => Self::Chore,
            "docs" => Self::Docs,
            "style" => Self::Style,
            "refactor" => Self::Refactor,
            "test" => Self::Test,
            "build" => Self::Build,
            "ci" => Self::Ci,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Category::from_name(&s))
    }
}

impl From<CommitType> for Category {
    fn from(commit_type: CommitType) -> Self {
        canonicalize(commit_type.as_str())
    }
}

/// Map a raw commit type tag to its changelog category.
///
/// Total over all strings: anything that is not a known tag falls back to
/// [`Category::Feature`].
pub fn canonicalize(tag: &str) -> Category {
    match tag {
        "feat" => Category::Feature,
        "fix" => Category::Fix,
        "perf" => Category::Performance,
        "chore" => Category::Chore,
        "docs" => Category::Docs,
        "style" => Category::Style,
        "refactor" => Category::Refactor,
        "test" => Category::Test,
        "build" => Category::Build,
        "ci" => Category::Ci,
        _ => Category::Feature,
    }
}
