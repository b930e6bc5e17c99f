//! The changelog run: harvest, select, merge, export.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::changelog::{self, ChangelogDocument, ChangelogEntry, ChangelogVersion, canonicalize};
use crate::config::{Config, DEFAULT_VERSION};
use crate::error::ReleaseError;
use crate::export::{self, ExportReport};
use crate::git::{CommitSource, ParsedCommit, harvest};
use crate::render::{MarkdownRenderer, Renderer};
use crate::select::{CommitSelector, build_choices};

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// No commit matched the allowed types.
    NoMatchingCommits,
    /// The operator chose nothing. Nothing was written.
    NothingSelected,
    /// Dry run: the new version rendered as Markdown, nothing written.
    Preview {
        version: ChangelogVersion,
        markdown: String,
    },
    Exported {
        version: ChangelogVersion,
        document: ChangelogDocument,
        reports: Vec<ExportReport>,
    },
}

/// Today's date as `YYYY-MM-DD`.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Pick the version label: explicit override, then latest tag, then the default.
pub fn resolve_version(requested: Option<&str>, latest_tag: Option<&str>) -> String {
    requested
        .or(latest_tag)
        .unwrap_or(DEFAULT_VERSION)
        .to_string()
}

/// Build entries from the selected commit ids, in selection order.
pub fn entries_from_selection(
    commits: &[ParsedCommit],
    selected: &[usize],
) -> Vec<ChangelogEntry> {
    selected
        .iter()
        .filter_map(|&id| commits.get(id))
        .filter_map(|commit| {
            let commit_type = commit.commit_type?;
            Some(ChangelogEntry::new(
                canonicalize(commit_type.as_str()),
                commit.subject.clone(),
            ))
        })
        .collect()
}

/// Run the full pipeline against a commit source and a selector.
///
/// `date` is stamped on the new version.
pub fn run(
    config: &Config,
    source: &dyn CommitSource,
    selector: &dyn CommitSelector,
    date: &str,
) -> Result<RunOutcome, ReleaseError> {
    let latest_tag = source.latest_tag().unwrap_or_else(|e| {
        warn!("Could not determine latest tag: {}. Using full history.", e);
        None
    });
    let version = resolve_version(config.version.as_deref(), latest_tag.as_deref());
    debug!(version = %version, tag = ?latest_tag, "Resolved version");

    let raw_log = source
        .commit_log(latest_tag.as_deref())
        .map_err(ReleaseError::CommitLog)?;
    let commits = harvest(&raw_log);

    let choices = build_choices(&commits, &config.allowed_types);
    if choices.is_empty() {
        info!(total = commits.len(), "No commits matched the allowed types");
        return Ok(RunOutcome::NoMatchingCommits);
    }

    let selected = selector.select(&choices)?;

    let entries = entries_from_selection(&commits, &selected);
    if entries.is_empty() {
        return Ok(RunOutcome::NothingSelected);
    }

    let new_version = ChangelogVersion {
        version,
        date: date.to_string(),
        entries,
    };

    if config.dry_run {
        let preview = ChangelogDocument::new(vec![new_version.clone()]);
        let markdown = MarkdownRenderer
            .render(&preview)
            .map_err(ReleaseError::Preview)?;
        return Ok(RunOutcome::Preview {
            version: new_version,
            markdown,
        });
    }

    let document = changelog::load(&config.input);
    let document = changelog::merge(document, new_version.clone());

    let reports = export::export(&document, &config.formats, &config.output_dir, config.render)?;

    Ok(RunOutcome::Exported {
        version: new_version,
        document,
        reports,
    })
}

/// One-line summary of a recorded version.
pub fn generate_summary(version: &ChangelogVersion) -> String {
    let total = version.entries.len();
    let details: Vec<String> = version
        .count_by_category()
        .iter()
        .map(|(cat, count)| format!("{}: {}", cat, count))
        .collect();

    let entry_word = if total == 1 { "entry" } else { "entries" };

    format!(
        "Recorded {} {} ({}) for {}",
        total,
        entry_word,
        details.join(", "),
        version.version
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::Category;
    use crate::error::GitError;
    use std::cell::RefCell;

    use crate::select::{AutoSelector, MockCommitSelector};

    struct FakeSource {
        tag: Option<String>,
        log: String,
    }

    impl CommitSource for FakeSource {
        fn latest_tag(&self) -> Result<Option<String>, GitError> {
            Ok(self.tag.clone())
        }

        fn commit_log(&self, _since_tag: Option<&str>) -> Result<String, GitError> {
            Ok(self.log.clone())
        }
    }

    /// Tag lookup fails; the log query succeeds and records its range.
    struct UndescribableSource {
        since: RefCell<Vec<Option<String>>>,
    }

    impl CommitSource for UndescribableSource {
        fn latest_tag(&self) -> Result<Option<String>, GitError> {
            Err(GitError::DescribeFailed(git2::Error::from_str("describe failed")))
        }

        fn commit_log(&self, since_tag: Option<&str>) -> Result<String, GitError> {
            self.since.borrow_mut().push(since_tag.map(str::to_string));
            Ok(LOG.to_string())
        }
    }

    const LOG: &str = "aaaaaaa1\nfeat: add export\n==END==\n\
                       bbbbbbb2\nchore: tidy\n==END==\n\
                       ccccccc3\nfix(cli): handle empty input\n==END==\n";

    fn config(dir: &std::path::Path) -> Config {
        Config {
            output_dir: dir.to_path_buf(),
            input: dir.join("changelog.json"),
            ..Config::default()
        }
    }

    #[test]
    fn test_resolve_version() {
        assert_eq!(resolve_version(Some("v9"), Some("v1.0.0")), "v9");
        assert_eq!(resolve_version(None, Some("v1.0.0")), "v1.0.0");
        assert_eq!(resolve_version(None, None), "v0.1.0");
    }

    #[test]
    fn test_entries_follow_selection_order() {
        let commits = harvest(LOG);
        let entries = entries_from_selection(&commits, &[2, 0]);
        assert_eq!(
            entries,
            vec![
                ChangelogEntry::new(Category::Fix, "handle empty input"),
                ChangelogEntry::new(Category::Feature, "add export"),
            ]
        );
    }

    #[test]
    fn test_run_uses_selector_choices() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            tag: Some("v1.2.0".to_string()),
            log: LOG.to_string(),
        };

        let mut selector = MockCommitSelector::new();
        selector
            .expect_select()
            .withf(|choices| choices.iter().map(|c| c.id).collect::<Vec<_>>() == vec![0, 2])
            .times(1)
            .returning(|_| Ok(vec![2]));

        let outcome = run(&config(dir.path()), &source, &selector, "2024-05-01").unwrap();

        match outcome {
            RunOutcome::Exported {
                version, reports, ..
            } => {
                assert_eq!(version.version, "v1.2.0");
                assert_eq!(version.date, "2024-05-01");
                assert_eq!(version.entries.len(), 1);
                assert_eq!(version.entries[0].category, Category::Fix);
                assert_eq!(reports.len(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(dir.path().join("changelog.json").exists());
        assert!(dir.path().join("CHANGELOG.md").exists());
    }

    #[test]
    fn test_run_nothing_selected_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            tag: None,
            log: LOG.to_string(),
        };

        let mut selector = MockCommitSelector::new();
        selector.expect_select().returning(|_| Ok(vec![]));

        let outcome = run(&config(dir.path()), &source, &selector, "2024-05-01").unwrap();
        assert!(matches!(outcome, RunOutcome::NothingSelected));
        assert!(!dir.path().join("changelog.json").exists());
    }

    #[test]
    fn test_run_no_matching_commits_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            tag: None,
            log: "aaaaaaa1\nchore: tidy\n==END==\n".to_string(),
        };

        let mut selector = MockCommitSelector::new();
        selector.expect_select().times(0);

        let outcome = run(&config(dir.path()), &source, &selector, "2024-05-01").unwrap();
        assert!(matches!(outcome, RunOutcome::NoMatchingCommits));
    }

    #[test]
    fn test_run_tag_lookup_failure_falls_back_to_full_history() {
        let dir = tempfile::tempdir().unwrap();
        let source = UndescribableSource {
            since: RefCell::new(Vec::new()),
        };

        let outcome = run(&config(dir.path()), &source, &AutoSelector, "2024-05-01").unwrap();

        assert_eq!(*source.since.borrow(), vec![None]);
        match outcome {
            RunOutcome::Exported { version, .. } => {
                assert_eq!(version.version, "v0.1.0");
                assert_eq!(version.entries.len(), 2);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(dir.path().join("changelog.json").exists());
    }

    #[test]
    fn test_run_auto_selector_dry_run_previews_all() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource {
            tag: None,
            log: LOG.to_string(),
        };

        let config = Config {
            dry_run: true,
            ..config(dir.path())
        };

        match run(&config, &source, &AutoSelector, "2024-05-01").unwrap() {
            RunOutcome::Preview { version, markdown } => {
                assert_eq!(version.version, "v0.1.0");
                assert_eq!(version.entries.len(), 2);
                assert!(markdown.starts_with("# Changelog\n\n## v0.1.0 - 2024-05-01"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!dir.path().join("changelog.json").exists());
    }

    #[test]
    fn test_generate_summary() {
        let version = ChangelogVersion {
            version: "v1.0.0".to_string(),
            date: "2024-01-01".to_string(),
            entries: vec![
                ChangelogEntry::new(Category::Feature, "a"),
                ChangelogEntry::new(Category::Feature, "b"),
                ChangelogEntry::new(Category::Fix, "c"),
            ],
        };

        assert_eq!(
            generate_summary(&version),
            "Recorded 3 entries (feature: 2, fix: 1) for v1.0.0"
        );
    }
}
