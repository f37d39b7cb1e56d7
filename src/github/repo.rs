//! Github Repo struct and conversion to RemoteRepo struct
use crate::platform::RemoteRepo;
use serde::{Deserialize, Serialize};

/// Github Repo
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
pub struct RepoGithub {
    /// Repository ID
    pub id: u64,

    /// Repository name
    pub name: String,

    /// Repository private status
    pub private: bool,

    /// Repository URL
    pub html_url: String,

    /// Repository SSH clone URL
    pub ssh_url: String,
}

impl From<RepoGithub> for RemoteRepo {
    fn from(repo: RepoGithub) -> Self {
        RemoteRepo {
            name: repo.name,
            ssh_url: repo.ssh_url,
            private: repo.private,
        }
    }
}

/// Body of a repository creation request
#[derive(Serialize, Debug, Clone)]
pub struct CreateRepoGithub<'a> {
    /// Repository name
    pub name: &'a str,

    /// Repository private status
    pub private: bool,
}

/// Authenticated Github user
#[derive(Deserialize, Debug, Clone)]
pub struct UserGithub {
    /// Login of the user
    pub login: String,
}
