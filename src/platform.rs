//! Hosting platform abstraction and the get-or-create provisioning step
use std::{future::Future, pin::Pin};

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::ToghError;

/// Boxed future returned by [`Platform`] methods
pub type PlatformFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ToghError>> + Send + 'a>>;

/// Repository as seen by the hosting platform
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone)]
pub struct RemoteRepo {
    /// Name of the repository
    pub name: String,

    /// SSH clone URL
    pub ssh_url: String,

    /// Whether the repository is private
    pub private: bool,
}

/// Result of looking a repository up by name
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RepoLookup {
    /// The repository exists
    Found(RemoteRepo),

    /// No repository with that name
    NotFound,
}

/// Hosting platform holding the remote repositories
pub trait Platform: Sync + Send {
    /// Look a repository up by name in the authenticated account
    fn get_repo(&self, name: &str) -> PlatformFuture<'_, RepoLookup>;

    /// Create a repository in the authenticated account
    fn create_repo(&self, name: &str, private: bool) -> PlatformFuture<'_, RemoteRepo>;

    /// Host name of the platform
    fn get_remote_url(&self) -> &str;
}

/// Return the SSH URL of the repository `name`, creating it first if it
/// doesn't exist. An existing repository is left untouched.
/// # Errors
/// Error if the lookup fails for another reason than "not found", or if the
/// creation fails
pub async fn get_or_create_repo(
    platform: &dyn Platform,
    name: &str,
    private: bool,
) -> Result<String, ToghError> {
    let repo = match platform.get_repo(name).await? {
        RepoLookup::Found(repo) => {
            info!("Using existing {} on {}", repo.name, platform.get_remote_url());
            repo
        }
        RepoLookup::NotFound => {
            info!("Creating {} on {}", name, platform.get_remote_url());
            platform.create_repo(name, private).await?
        }
    };
    Ok(repo.ssh_url)
}
