//! Command line options for the togh tool
use crate::{
    config::ToghConfig,
    errors::{ToghError, ToghErrorKind},
    github::config::GithubConfig,
    platform::Platform,
    process::{process_repos, ProcessOptions},
    prompt::TerminalPrompt,
};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

/// Parse a path that must exist
fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("'{value}' does not exist"))
    }
}

/// togh - Find every git repository in a directory and upload it to GitHub.
///
/// Each repository gets a GitHub repository named after its company and
/// project (`<company>_<project>`), created if it doesn't exist yet. All
/// local branches and tags are force pushed to it. A lock file is then
/// written in the `.git` folder so the repository isn't processed again.
///
/// The `GITHUB_TOKEN` environment variable must hold a token with read
/// access to metadata and read/write access to administration.
#[derive(Parser, Default, Clone, Debug)]
#[command(version)]
pub struct ToghCli {
    /// Directory to search for git repositories
    #[arg(value_parser = existing_path, required_unless_present = "show_config_path")]
    pub path: Option<PathBuf>,

    /// Name of the remote pointing to GitHub
    #[arg(short, long, default_value = "origin")]
    pub remote_name: String,

    /// Name of the lock file written in `.git` once a repository is done
    #[arg(short, long, default_value = "github_lock")]
    pub lock_name: String,

    /// Create missing GitHub repositories as public
    #[arg(long)]
    pub public: bool,

    /// Stop at the first repository failing
    #[arg(long)]
    pub fail_fast: bool,

    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Verbose mode (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ToghCli {
    /// Log level matching the verbosity
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Processing options from the command line
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            remote_name: self.remote_name.clone(),
            lock_name: self.lock_name.clone(),
            private: !self.public,
            fail_fast: self.fail_fast,
        }
    }
}

/// Run the togh tool with the provided command line options
/// # Errors
/// Error if the configuration is invalid, if input can't be read, or if any
/// repository failed
pub async fn togh_main(args: ToghCli) -> Result<(), ToghError> {
    let config = ToghConfig::try_new(args)?;
    if config.cli_args.show_config_path {
        println!("{}", config.config_path.display());
        return Ok(());
    }
    let path = config
        .cli_args
        .path
        .clone()
        .ok_or_else(|| ToghError::new(ToghErrorKind::Config).with_text("No path given"))?;
    let platform = GithubConfig::get_platform(&config)?;
    info!("Uploading repositories to {}", platform.get_remote_url());
    let mut prompt = TerminalPrompt::stdio();
    let report = process_repos(
        &path,
        &platform,
        &mut prompt,
        &config.cli_args.process_options(),
    )
    .await?;
    if report.is_success() {
        Ok(())
    } else {
        Err(ToghError::new(ToghErrorKind::Incomplete)
            .with_text(&format!("{} repositories failed", report.failed.len())))
    }
}
