//! Raw commit log and latest tag lookup using git2-rs.
//!
//! The log is rendered in the same block format `git log
//! --format=%H%n%s%n%b==END==` produces, so the harvester only ever sees text.

use std::path::Path;

use git2::{Commit, DescribeFormatOptions, DescribeOptions, ErrorClass, Oid, Repository};
use tracing::debug;

use crate::error::GitError;

use super::commits::END_MARKER;

/// Source of commit history for a run.
pub trait CommitSource {
    /// Name of the most recent tag reachable from HEAD, if any.
    fn latest_tag(&self) -> Result<Option<String>, GitError>;

    /// Raw log text for commits after `since_tag`, or the whole history.
    fn commit_log(&self, since_tag: Option<&str>) -> Result<String, GitError>;
}

/// [`CommitSource`] backed by a local git repository.
pub struct GitSource {
    repo: Repository,
}

impl GitSource {
    /// Open the repository containing `path`.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let repo = Repository::discover(path).map_err(GitError::OpenRepository)?;
        Ok(Self { repo })
    }

    pub fn from_repository(repo: Repository) -> Self {
        Self { repo }
    }
}

impl CommitSource for GitSource {
    fn latest_tag(&self) -> Result<Option<String>, GitError> {
        let tags = self.repo.tag_names(None).map_err(GitError::DescribeFailed)?;
        if tags.is_empty() {
            debug!("Repository has no tags");
            return Ok(None);
        }

        let mut opts = DescribeOptions::new();
        opts.describe_tags();

        // libgit2 reports "nothing to describe" as a generic error in the describe class.
        let describe = match self.repo.describe(&opts) {
            Ok(describe) => describe,
            Err(e) if e.class() == ErrorClass::Describe => {
                debug!(reason = %e.message(), "No tag reachable from HEAD");
                return Ok(None);
            }
            Err(e) => return Err(GitError::DescribeFailed(e)),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        let name = describe
            .format(Some(&format))
            .map_err(GitError::DescribeFailed)?;
        let name = name.trim();

        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    fn commit_log(&self, since_tag: Option<&str>) -> Result<String, GitError> {
        let mut revwalk = self.repo.revwalk().map_err(GitError::RevwalkError)?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .map_err(GitError::RevwalkError)?;
        revwalk.push_head().map_err(GitError::RevwalkError)?;

        if let Some(tag) = since_tag {
            let oid = resolve_reference(&self.repo, tag)?;
            revwalk.hide(oid).map_err(GitError::RevwalkError)?;
        }

        let mut log = String::new();
        for oid in revwalk {
            let oid = oid.map_err(GitError::RevwalkError)?;
            let commit = self.repo.find_commit(oid).map_err(GitError::ParseCommit)?;
            log.push_str(&format_block(&commit));
        }

        Ok(log)
    }
}

/// Format one commit as `hash\nsubject\nbody` followed by the end marker.
fn format_block(commit: &Commit) -> String {
    format!(
        "{}\n{}\n{}\n{}\n",
        commit.id(),
        commit.summary().unwrap_or(""),
        commit.body().unwrap_or("").trim_end(),
        END_MARKER
    )
}

/// Resolve a reference (tag, branch, commit hash) to a commit OID.
fn resolve_reference(repo: &Repository, reference: &str) -> Result<Oid, GitError> {
    let obj = repo
        .revparse_single(reference)
        .map_err(|e| GitError::ReferenceNotFound(reference.to_string(), e))?;

    Ok(obj.peel_to_commit().map_err(GitError::ParseCommit)?.id())
}
