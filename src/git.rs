//! Local git operations: remote configuration and publishing
use std::path::Path;

use git2::{
    BranchType, ConfigLevel, Cred, CredentialType, ErrorCode, PushOptions, RemoteCallbacks,
    Repository,
};
use log::{debug, info};

use crate::errors::{ToghError, ToghErrorKind};

/// Fetch refspec mirroring every branch of `remote_name`
pub fn default_fetch_refspec(remote_name: &str) -> String {
    format!("+refs/heads/*:refs/remotes/{remote_name}/*")
}

/// Replace every value of `key` in `config` with `value`
fn replace_value(config: &mut git2::Config, key: &str, value: &str) -> Result<(), git2::Error> {
    match config.remove_multivar(key, ".*") {
        Ok(()) => {}
        Err(e) if e.code() == ErrorCode::NotFound => {}
        Err(e) => return Err(e),
    }
    config.set_str(key, value)
}

/// Point `remote_name` at `url` with the given fetch refspec
/// # Errors
/// Error if the path is not a repository or its config can't be written
pub fn set_remote(
    repo_path: &Path,
    remote_name: &str,
    url: &str,
    fetch_refspec: &str,
) -> Result<(), ToghError> {
    let wrap = |e: git2::Error| ToghError::wrap(ToghErrorKind::ConfigWrite, e);
    let repo = Repository::open(repo_path).map_err(wrap)?;
    let mut config = repo
        .config()
        .and_then(|c| c.open_level(ConfigLevel::Local))
        .map_err(wrap)?;
    replace_value(&mut config, &format!("remote.{remote_name}.url"), url).map_err(wrap)?;
    replace_value(
        &mut config,
        &format!("remote.{remote_name}.fetch"),
        fetch_refspec,
    )
    .map_err(wrap)?;
    Ok(())
}

/// Callbacks authenticating with the ssh agent or git's credential helper,
/// failing on any ref the remote rejects
fn remote_callbacks(config: git2::Config) -> RemoteCallbacks<'static> {
    let mut callbacks = RemoteCallbacks::new();
    let mut tried = CredentialType::empty();
    callbacks.credentials(move |url, username_from_url, allowed| {
        let username = username_from_url.unwrap_or("git");
        if allowed.contains(CredentialType::SSH_KEY) && !tried.contains(CredentialType::SSH_KEY) {
            tried.insert(CredentialType::SSH_KEY);
            return Cred::ssh_key_from_agent(username);
        }
        if allowed.contains(CredentialType::USER_PASS_PLAINTEXT)
            && !tried.contains(CredentialType::USER_PASS_PLAINTEXT)
        {
            tried.insert(CredentialType::USER_PASS_PLAINTEXT);
            return Cred::credential_helper(&config, url, username_from_url);
        }
        if allowed.contains(CredentialType::DEFAULT) && !tried.contains(CredentialType::DEFAULT) {
            tried.insert(CredentialType::DEFAULT);
            return Cred::default();
        }
        Err(git2::Error::from_str(&format!("no usable credentials for {url}")))
    });
    callbacks.push_update_reference(|refname, status| match status {
        Some(reason) => Err(git2::Error::from_str(&format!(
            "remote rejected {refname}: {reason}"
        ))),
        None => {
            debug!("Updated {refname}");
            Ok(())
        }
    });
    callbacks
}

/// Force push `refspecs` to `remote_name`
fn force_push(repo: &Repository, remote_name: &str, refspecs: &[String]) -> Result<(), git2::Error> {
    if refspecs.is_empty() {
        return Ok(());
    }
    let mut remote = repo.find_remote(remote_name)?;
    let mut opts = PushOptions::new();
    opts.remote_callbacks(remote_callbacks(repo.config()?));
    remote.push(refspecs, Some(&mut opts))
}

/// Force refspec pushing `refname` to the same name
fn force_refspec(refname: &str) -> String {
    format!("+{refname}:{refname}")
}

/// Force push every local branch to `remote_name`
/// # Errors
/// Error if the repository can't be read, a ref is rejected or the transport fails
pub fn push_all(repo_path: &Path, remote_name: &str) -> Result<(), ToghError> {
    let repo = Repository::open(repo_path)?;
    let mut refspecs = vec![];
    for branch in repo.branches(Some(BranchType::Local))? {
        let (branch, _) = branch?;
        if let Some(refname) = branch.get().name() {
            refspecs.push(force_refspec(refname));
        }
    }
    info!("Pushing {} branches to {}", refspecs.len(), remote_name);
    Ok(force_push(&repo, remote_name, &refspecs)?)
}

/// Force push every tag to `remote_name`, one at a time
/// # Errors
/// Error if the repository can't be read, a tag is rejected or the transport fails
pub fn push_tags(repo_path: &Path, remote_name: &str) -> Result<(), ToghError> {
    let repo = Repository::open(repo_path)?;
    let tags = repo.tag_names(None)?;
    for tag in tags.iter().flatten() {
        info!("Pushing tag {tag} to {remote_name}");
        let refspec = force_refspec(&format!("refs/tags/{tag}"));
        force_push(&repo, remote_name, &[refspec])?;
    }
    Ok(())
}
