//! Conventional commit parsing and harvesting of raw log blocks.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

/// Sentinel that terminates each commit block in the raw log text.
pub const END_MARKER: &str = "==END==";

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl CommitType {
    /// The tag as it appears in a commit subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// A commit subject reduced to its conventional commit parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    pub subject: String,
    pub hash: String,
    pub raw: String,
}

impl ParsedCommit {
    /// True when the subject carried a recognised type prefix.
    pub fn is_conventional(&self) -> bool {
        self.commit_type.is_some()
    }

    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map_or(self.hash.len(), |(i, _)| i);
        &self.hash[..end]
    }
}

// Types are spelled out so a tag is never matched as a prefix of a longer word.
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|docs|style|refactor|perf|test|chore|build|ci)(?:\(([^)]+)\))?: (.*)$")
        .expect("subject pattern is valid")
});

/// Parse a single commit subject line.
///
/// The caller is responsible for passing only the first line of a message.
/// `hash` and `raw` are left empty; [`harvest`] fills them in.
pub fn parse_subject(subject: &str) -> ParsedCommit {
    if let Some(caps) = SUBJECT_RE.captures(subject) {
        let commit_type = caps.get(1).and_then(|m| m.as_str().parse::<CommitType>().ok());
        let scope = caps.get(2).map(|m| m.as_str().to_string());
        let rest = caps.get(3).map_or("", |m| m.as_str());

        return ParsedCommit {
            commit_type,
            scope,
            subject: rest.to_string(),
            hash: String::new(),
            raw: String::new(),
        };
    }

    ParsedCommit {
        commit_type: None,
        scope: None,
        subject: subject.to_string(),
        hash: String::new(),
        raw: String::new(),
    }
}

/// Split a raw log blob into commits.
///
/// Each block is `hash\nsubject\nbody...` terminated by [`END_MARKER`].
/// Blocks that are empty after trimming are skipped. Output order follows
/// the input.
pub fn harvest(raw_log: &str) -> Vec<ParsedCommit> {
    let commits: Vec<ParsedCommit> = raw_log
        .split(END_MARKER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            let mut lines = piece.lines();
            let hash = lines.next().unwrap_or("");
            let subject = lines.next().unwrap_or("");

            ParsedCommit {
                hash: hash.to_string(),
                raw: piece.to_string(),
                ..parse_subject(subject)
            }
        })
        .collect();

    debug!(count = commits.len(), "Harvested commits from raw log");
    commits
}
