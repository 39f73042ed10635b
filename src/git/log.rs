//! Commit history reader backed by libgit2.

use super::CommitSource;
use crate::models::CommitInfo;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use git2::{Commit, DiffOptions, ErrorCode, Repository, Sort};
use std::path::{Path, PathBuf};

/// Reads commits from a local repository.
#[derive(Debug, Clone)]
pub struct GitCommitLog {
    /// Path to the repository (or any directory inside it).
    repo_path: PathBuf,
}

impl GitCommitLog {
    /// Creates a reader for the repository at `repo_path`.
    #[must_use]
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Returns the repository path.
    #[must_use]
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn open_repo(&self) -> Result<Repository> {
        Repository::discover(&self.repo_path).map_err(|e| git_error("open_repository", &e))
    }

    fn commit_info(repo: &Repository, commit: &Commit<'_>) -> Result<CommitInfo> {
        let tree = commit
            .tree()
            .map_err(|e| git_error("read_commit_tree", &e))?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(
                parent
                    .tree()
                    .map_err(|e| git_error("read_parent_tree", &e))?,
            ),
            Err(_) => None,
        };

        let mut options = DiffOptions::new();
        let diff = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut options))
            .map_err(|e| git_error("diff_commit", &e))?;

        let files_changed = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();
        let line_count = diff
            .stats()
            .map(|stats| stats.insertions() + stats.deletions())
            .map_err(|e| git_error("diff_stats", &e))?;

        let date = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0)
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();

        Ok(CommitInfo {
            hash: commit.id().to_string(),
            message: commit.summary().unwrap_or_default().to_string(),
            author: commit.author().name().unwrap_or_default().to_string(),
            date,
            files_changed,
            line_count,
        })
    }
}

impl CommitSource for GitCommitLog {
    fn recent(&self, limit: usize) -> Result<Vec<CommitInfo>> {
        let repo = self.open_repo()?;
        if head_oid(&repo)?.is_none() {
            return Ok(Vec::new());
        }

        let mut walk = repo.revwalk().map_err(|e| git_error("revwalk", &e))?;
        walk.push_head().map_err(|e| git_error("revwalk", &e))?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(|e| git_error("revwalk", &e))?;

        let mut commits = Vec::with_capacity(limit);
        for oid in walk.take(limit) {
            let oid = oid.map_err(|e| git_error("revwalk", &e))?;
            let commit = repo
                .find_commit(oid)
                .map_err(|e| git_error("find_commit", &e))?;
            commits.push(Self::commit_info(&repo, &commit)?);
        }

        tracing::debug!(
            repo = %self.repo_path.display(),
            count = commits.len(),
            "Read recent commits"
        );
        Ok(commits)
    }

    fn head(&self) -> Result<Option<String>> {
        let repo = self.open_repo()?;
        Ok(head_oid(&repo)?.map(|oid| oid.to_string()))
    }

    fn commit(&self, rev: &str) -> Result<CommitInfo> {
        let repo = self.open_repo()?;
        let commit = repo
            .revparse_single(rev)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| Error::InvalidInput(format!("unknown revision '{rev}': {e}")))?;
        Self::commit_info(&repo, &commit)
    }
}

fn head_oid(repo: &Repository) -> Result<Option<git2::Oid>> {
    match repo.head() {
        Ok(reference) => Ok(reference.target()),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(git_error("get_head", &e)),
    }
}

fn git_error(operation: &str, err: &git2::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: err.message().to_string(),
    }
}
