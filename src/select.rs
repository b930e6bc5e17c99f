//! Commit selection: which harvested commits become changelog entries.

use dialoguer::MultiSelect;
use tracing::debug;

use crate::error::SelectionError;
use crate::git::{CommitType, ParsedCommit};

/// One selectable commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Position of the commit in the harvested list.
    pub id: usize,
}

/// Picks a subset of choices.
#[cfg_attr(test, mockall::automock)]
pub trait CommitSelector {
    /// Return the ids of the chosen items. An empty result means nothing was chosen.
    fn select(&self, choices: &[Choice]) -> Result<Vec<usize>, SelectionError>;
}

/// Asks the operator with a multi-select prompt.
#[derive(Debug, Default)]
pub struct PromptSelector;

impl CommitSelector for PromptSelector {
    fn select(&self, choices: &[Choice]) -> Result<Vec<usize>, SelectionError> {
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        let picked = MultiSelect::new()
            .with_prompt("Select commits to include (space to toggle, enter to confirm)")
            .items(&labels)
            .interact_opt()
            .map_err(SelectionError::PromptFailed)?
            .unwrap_or_default();

        Ok(picked
            .into_iter()
            .filter_map(|i| choices.get(i).map(|c| c.id))
            .collect())
    }
}

/// Selects every choice without asking.
#[derive(Debug, Default)]
pub struct AutoSelector;

impl CommitSelector for AutoSelector {
    fn select(&self, choices: &[Choice]) -> Result<Vec<usize>, SelectionError> {
        Ok(choices.iter().map(|c| c.id).collect())
    }
}

/// Label shown for a commit: `type(scope): subject (short-hash)`.
pub fn choice_label(commit: &ParsedCommit) -> String {
    let mut label = String::new();
    if let Some(commit_type) = commit.commit_type {
        label.push_str(commit_type.as_str());
        if let Some(scope) = &commit.scope {
            label.push_str(&format!("({})", scope));
        }
        label.push_str(": ");
    }
    label.push_str(&commit.subject);
    if !commit.hash.is_empty() {
        label.push_str(&format!(" ({})", commit.short_hash()));
    }
    label
}

/// Build choices for commits whose type is allowed and whose subject is non-empty.
pub fn build_choices(commits: &[ParsedCommit], allowed: &[CommitType]) -> Vec<Choice> {
    let choices: Vec<Choice> = commits
        .iter()
        .enumerate()
        .filter(|(_, commit)| {
            commit
                .commit_type
                .is_some_and(|commit_type| allowed.contains(&commit_type))
                && !commit.subject.is_empty()
        })
        .map(|(id, commit)| Choice {
            label: choice_label(commit),
            id,
        })
        .collect();

    debug!(
        total = commits.len(),
        offered = choices.len(),
        "Filtered commits by allowed type"
    );
    choices
}
