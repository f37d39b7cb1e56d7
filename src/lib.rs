//! # togh
//!
//! Find every git repository below a directory and upload it to GitHub
//!
//! ## Usage
//!
//! ```txt
//! Usage: togh [OPTIONS] <PATH>
//!
//! Arguments:
//!   <PATH>  Directory to search for git repositories
//!
//! Options:
//!   -r, --remote-name <REMOTE_NAME>  Name of the remote pointing to GitHub [default: origin]
//!   -l, --lock-name <LOCK_NAME>      Name of the lock file written in `.git` once a repository is done [default: github_lock]
//!       --public                     Create missing GitHub repositories as public
//!       --fail-fast                  Stop at the first repository failing
//!   -c, --config <CONFIG>            Custom configuration file path
//!       --show-config-path           Show the current config path
//!   -v, --verbose...                 Verbose mode (-v, -vv)
//!   -h, --help                       Print help
//!   -V, --version                    Print version
//! ```
//!
//! Repositories are named `<company>_<project>` on GitHub, both parts being
//! asked for each repository. Once uploaded, a repository is locked with a
//! file in its `.git` folder and skipped by later runs.

#![warn(clippy::all, rust_2018_idioms)]
#![deny(
    missing_docs,
    clippy::all,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::missing_docs_in_private_items
    )
)]
#![warn(clippy::multiple_crate_versions)]

pub(crate) mod cli;
pub(crate) mod config;
pub mod discovery;
pub mod errors;
pub mod git;
pub mod lock;
pub mod naming;
pub mod platform;
pub mod process;
pub mod prompt;

mod github;

#[cfg(test)]
mod test_utils;

pub use cli::{togh_main, ToghCli};
pub use config::ToghConfig;
pub use github::platform::GithubPlatform;
pub use process::{process_repos, ProcessOptions, ProcessReport};
