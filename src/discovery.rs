//! Find git working trees below a directory
use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::errors::{ToghError, ToghErrorKind};

/// Name of the git directory inside a working tree
const GIT_DIR: &str = ".git";

/// Check if a given path is a git working tree
pub fn is_git_repo(path: &Path) -> bool {
    path.join(GIT_DIR).is_dir()
}

/// Entry the walk could not read
#[derive(Debug)]
pub struct WalkError {
    /// Path of the unreadable entry
    pub path: PathBuf,

    /// What went wrong
    pub error: ToghError,
}

/// Lazy depth-first walk yielding every git working tree below a root.
///
/// A directory yielded as a repository is never descended into. Symbolic
/// links are followed, a link back to one of its own ancestors is skipped.
#[derive(Debug)]
pub struct GitRepos {
    /// Root of the walk, reported when an error has no path
    root: PathBuf,

    /// Underlying directory walk
    walk: walkdir::IntoIter,
}

/// Walk `path` for git working trees
pub fn find_git_repos(path: &Path) -> GitRepos {
    GitRepos {
        root: path.to_path_buf(),
        walk: WalkDir::new(path)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter(),
    }
}

impl Iterator for GitRepos {
    type Item = Result<PathBuf, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(&self.root).to_path_buf();
                    if e.loop_ancestor().is_some() {
                        warn!("Skipping {} as it links to a parent", path.display());
                        continue;
                    }
                    return Some(Err(WalkError {
                        path,
                        error: ToghError::wrap(ToghErrorKind::Filesystem, e),
                    }));
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.file_name() == GIT_DIR {
                self.walk.skip_current_dir();
                continue;
            }
            if is_git_repo(entry.path()) {
                self.walk.skip_current_dir();
                return Some(Ok(entry.into_path()));
            }
        }
    }
}
