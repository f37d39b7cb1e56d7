//! Github configuration
use super::{platform::GithubPlatform, DEFAULT_TIMEOUT, GITHUB_API_URL, GITHUB_TOKEN_ENV};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::{
    config::ToghConfig,
    errors::{ToghError, ToghErrorKind},
};

/// Github configuration
#[derive(Deserialize, Serialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    /// Github token, used when the environment variable is unset
    pub token: Option<String>,

    /// Github API URL
    pub api_url: Option<String>,

    /// Timeout of one API request, in seconds
    pub timeout: Option<u64>,
}

/// Pick the token from the environment first, then from the config file
fn resolve_token(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    from_env
        .filter(|token| !token.trim().is_empty())
        .or_else(|| from_file.map(str::to_string))
        .filter(|token| !token.trim().is_empty())
}

impl GithubConfig {
    /// Get the github platform
    /// # Errors
    /// Error if no token is available or the API URL is invalid
    pub fn get_platform(config: &ToghConfig) -> Result<GithubPlatform, ToghError> {
        let github = config.config_data.github.clone().unwrap_or_default();
        let token = resolve_token(std::env::var(GITHUB_TOKEN_ENV).ok(), github.token.as_deref())
            .ok_or_else(|| {
                ToghError::new(ToghErrorKind::Config).with_text(&format!(
                    "{GITHUB_TOKEN_ENV} environment variable is not set \
                     (https://github.com/settings/personal-access-tokens)"
                ))
            })?;
        let api_url = github.api_url.as_deref().unwrap_or(GITHUB_API_URL);
        let api_url = Url::parse(api_url).map_err(|e| {
            ToghError::new(ToghErrorKind::Config)
                .with_text(&format!("Invalid Github API URL '{api_url}': {e}"))
        })?;
        let timeout = Duration::from_secs(github.timeout.unwrap_or(DEFAULT_TIMEOUT));
        GithubPlatform::new(token, api_url, timeout)
    }
}
