//! Adopt every repository found below a directory
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use crate::{
    discovery::{find_git_repos, WalkError},
    errors::{ToghError, ToghErrorKind},
    git::{default_fetch_refspec, push_all, push_tags, set_remote},
    lock::{lock_exists, set_lock},
    naming::create_repo_name,
    platform::{get_or_create_repo, Platform},
    prompt::UserPrompt,
};

/// Settings of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Name of the remote pointing to the platform
    pub remote_name: String,

    /// Name of the lock file marking processed repositories
    pub lock_name: String,

    /// Create missing remote repositories as private
    pub private: bool,

    /// Stop at the first repository failing
    pub fail_fast: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            remote_name: "origin".to_string(),
            lock_name: "github_lock".to_string(),
            private: true,
            fail_fast: false,
        }
    }
}

/// How the processing of one repository ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Already processed by a previous run
    Skipped,

    /// The user chose not to process it
    Declined,

    /// Published to the remote repository with this name
    Done(String),
}

/// Summary of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    /// Repositories published during this run
    pub processed: Vec<PathBuf>,

    /// Repositories already locked
    pub skipped: Vec<PathBuf>,

    /// Repositories the user declined
    pub declined: Vec<PathBuf>,

    /// Repositories (or directories) that failed, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl ProcessReport {
    /// Whether every repository went through without error
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Company and project names suggested for a repository: its parent
/// directory name and its own directory name. The parent is resolved first
/// so a walk started from `.` or `..` still suggests a company.
fn naming_defaults(repo_path: &Path) -> (String, String) {
    let segment = |p: &Path| {
        p.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    };
    let company = repo_path
        .parent()
        .map(|parent| match parent.canonicalize() {
            Ok(resolved) => segment(&resolved),
            Err(_) => segment(parent),
        })
        .unwrap_or_default();
    (company, segment(repo_path))
}

/// Ask until the answer isn't blank
fn ask_non_empty(
    prompt: &mut dyn UserPrompt,
    question: &str,
    default: &str,
) -> Result<String, ToghError> {
    loop {
        let answer = prompt.ask(question, default)?;
        if !answer.trim().is_empty() {
            return Ok(answer);
        }
        warn!("A value is required");
    }
}

/// Run the whole pipeline on one repository
/// # Errors
/// Error if any step after the confirmation fails; the repository is then
/// left unlocked
pub async fn process_repo(
    repo_path: &Path,
    platform: &dyn Platform,
    prompt: &mut dyn UserPrompt,
    options: &ProcessOptions,
) -> Result<RepoOutcome, ToghError> {
    let repo = repo_path.display();
    if lock_exists(repo_path, &options.lock_name) {
        info!("Skipping {repo} as it is locked");
        return Ok(RepoOutcome::Skipped);
    }
    if !prompt.confirm(&format!("Do you want to process {repo}?"))? {
        return Ok(RepoOutcome::Declined);
    }

    let (company_default, project_default) = naming_defaults(repo_path);
    let company_name = ask_non_empty(
        prompt,
        &format!("Company name for {repo}"),
        &company_default,
    )?;
    let project_name = ask_non_empty(
        prompt,
        &format!("Project name for {repo}"),
        &project_default,
    )?;
    let repo_name = create_repo_name(&company_name, &project_name);

    info!("Creating {repo_name}");
    let ssh_url = get_or_create_repo(platform, &repo_name, options.private).await?;

    info!("Setting remote {} to {}", options.remote_name, ssh_url);
    set_remote(
        repo_path,
        &options.remote_name,
        &ssh_url,
        &default_fetch_refspec(&options.remote_name),
    )?;

    info!("Pushing {repo} to {}", options.remote_name);
    push_all(repo_path, &options.remote_name)?;

    info!("Pushing tags to {}", options.remote_name);
    push_tags(repo_path, &options.remote_name)?;

    info!("Setting lock for {repo}");
    set_lock(repo_path, &options.lock_name)?;
    Ok(RepoOutcome::Done(repo_name))
}

/// Process every git repository found below `path`, one after the other.
///
/// A failing repository is logged and the run goes on with the next one,
/// unless `fail_fast` is set.
/// # Errors
/// Error if reading user input fails, or on the first failure with `fail_fast`
pub async fn process_repos(
    path: &Path,
    platform: &dyn Platform,
    prompt: &mut dyn UserPrompt,
    options: &ProcessOptions,
) -> Result<ProcessReport, ToghError> {
    let mut report = ProcessReport::default();
    for found in find_git_repos(path) {
        let result = match found {
            Ok(repo_path) => process_repo(&repo_path, platform, prompt, options)
                .await
                .map(|outcome| (repo_path.clone(), outcome))
                .map_err(|e| (repo_path, e)),
            Err(WalkError { path: failed, error }) => Err((failed, error)),
        };
        match result {
            Ok((repo_path, RepoOutcome::Skipped)) => report.skipped.push(repo_path),
            Ok((repo_path, RepoOutcome::Declined)) => report.declined.push(repo_path),
            Ok((repo_path, RepoOutcome::Done(repo_name))) => {
                info!("Done {} as {repo_name}", repo_path.display());
                report.processed.push(repo_path);
            }
            Err((_, e)) if e.kind() == &ToghErrorKind::Prompt => return Err(e),
            Err((failed_path, e)) => {
                error!("Failed {}: {e}", failed_path.display());
                if options.fail_fast {
                    return Err(e);
                }
                report.failed.push((failed_path, e.to_string()));
            }
        }
    }
    info!(
        "{} processed, {} skipped, {} declined, {} failed",
        report.processed.len(),
        report.skipped.len(),
        report.declined.len(),
        report.failed.len()
    );
    Ok(report)
}
