//! Github Platform
use super::{GITHUB_API_HEADER, GITHUB_API_VERSION, GITHUB_URL};
use crate::{
    errors::{ToghError, ToghErrorKind},
    github::repo::{CreateRepoGithub, RepoGithub, UserGithub},
    platform::{Platform, PlatformFuture, RemoteRepo, RepoLookup},
};
use log::debug;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    Method, RequestBuilder, StatusCode,
};
use std::{fmt, time::Duration};
use tokio::sync::OnceCell;
use url::Url;
use urlencoding::encode;

/// User agent sent with every request
const TOGH_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Connect timeout of every request
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Github Platform
pub struct GithubPlatform {
    /// Github token
    token: String,

    /// Base URL of the API
    api_url: Url,

    /// Login of the token owner, fetched on first use
    username: OnceCell<String>,

    /// Reqwest client
    client: reqwest::Client,
}

impl fmt::Debug for GithubPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubPlatform")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("username", &self.username.get())
            .finish_non_exhaustive()
    }
}

impl GithubPlatform {
    /// Create a new GithubPlatform
    /// # Errors
    /// Error if the HTTP client can't be built
    pub(crate) fn new(token: String, api_url: Url, timeout: Duration) -> Result<Self, ToghError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ToghError::wrap(ToghErrorKind::Config, e))?;
        Ok(Self {
            token,
            api_url,
            username: OnceCell::new(),
            client,
        })
    }

    /// Build an authenticated request to `path` under the API URL
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url.as_str().trim_end_matches('/'), path);
        debug!("{method} {url}");
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, TOGH_USER_AGENT)
            .header(GITHUB_API_HEADER, GITHUB_API_VERSION)
    }

    /// Login of the authenticated user
    async fn get_username(&self) -> Result<&str, ToghError> {
        let username = self
            .username
            .get_or_try_init(|| async {
                let lookup_error = |e: reqwest::Error| ToghError::wrap(ToghErrorKind::Lookup, e);
                let response = self
                    .request(Method::GET, "/user")
                    .send()
                    .await
                    .map_err(lookup_error)?;
                let status = response.status();
                let text = response.text().await.map_err(lookup_error)?;
                if !status.is_success() {
                    return Err(ToghError::new(ToghErrorKind::Lookup).with_text(&format!(
                        "Unable to get the authenticated user ({status}): {text}"
                    )));
                }
                let user: UserGithub = serde_json::from_str(&text)?;
                Ok::<String, ToghError>(user.login)
            })
            .await?;
        Ok(username.as_str())
    }
}

impl Platform for GithubPlatform {
    fn get_remote_url(&self) -> &str {
        GITHUB_URL
    }

    fn get_repo(&self, name: &str) -> PlatformFuture<'_, RepoLookup> {
        let repo_name = name.to_string();
        Box::pin(async move {
            let lookup_error = |e: reqwest::Error| ToghError::wrap(ToghErrorKind::Lookup, e);
            let username = self.get_username().await?;
            let path = format!("/repos/{}/{}", encode(username), encode(&repo_name));
            let response = self
                .request(Method::GET, &path)
                .send()
                .await
                .map_err(lookup_error)?;
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Ok(RepoLookup::NotFound);
            }
            let text = response.text().await.map_err(lookup_error)?;
            if !status.is_success() {
                return Err(ToghError::new(ToghErrorKind::Lookup)
                    .with_text(&format!("{repo_name} ({status}): {text}")));
            }
            let repo: RepoGithub = serde_json::from_str(&text)?;
            Ok(RepoLookup::Found(repo.into()))
        })
    }

    fn create_repo(&self, name: &str, private: bool) -> PlatformFuture<'_, RemoteRepo> {
        let repo_name = name.to_string();
        Box::pin(async move {
            let creation_error =
                |e: reqwest::Error| ToghError::wrap(ToghErrorKind::RepoCreation, e);
            let body = CreateRepoGithub {
                name: &repo_name,
                private,
            };
            let response = self
                .request(Method::POST, "/user/repos")
                .json(&body)
                .send()
                .await
                .map_err(creation_error)?;
            let status = response.status();
            let text = response.text().await.map_err(creation_error)?;
            if !status.is_success() {
                return Err(ToghError::new(ToghErrorKind::RepoCreation)
                    .with_text(&format!("{repo_name} ({status}): {text}")));
            }
            let repo: RepoGithub = serde_json::from_str(&text)?;
            Ok(repo.into())
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::platform::get_or_create_repo;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Body of a repository as returned by the API
    fn repo_json(name: &str, private: bool) -> serde_json::Value {
        json!({
            "id": 42,
            "name": name,
            "private": private,
            "html_url": format!("https://github.com/octo/{name}"),
            "ssh_url": format!("git@github.com:octo/{name}.git"),
        })
    }

    /// Platform talking to `server`, which answers `/user` exactly `user_calls` times
    async fn platform(server: &MockServer, user_calls: u64) -> GithubPlatform {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octo"})))
            .expect(user_calls)
            .mount(server)
            .await;
        let api_url = Url::parse(&server.uri()).unwrap();
        GithubPlatform::new("secret".to_string(), api_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn get_repo_found() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .and(header("authorization", "Bearer secret"))
            .and(header("x-github-api-version", "2022-11-28"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("acme_api", true)))
            .mount(&server)
            .await;

        let lookup = github.get_repo("acme_api").await.unwrap();

        assert_eq!(
            lookup,
            RepoLookup::Found(RemoteRepo {
                name: "acme_api".to_string(),
                ssh_url: "git@github.com:octo/acme_api.git".to_string(),
                private: true,
            })
        );
    }

    #[tokio::test]
    async fn get_repo_not_found() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        assert_eq!(github.get_repo("acme_api").await.unwrap(), RepoLookup::NotFound);
    }

    #[tokio::test]
    async fn get_repo_other_failures_are_errors() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = github.get_repo("acme_api").await.unwrap_err();

        assert_eq!(err.kind(), &ToghErrorKind::Lookup);
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn bad_credentials_fail_the_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;
        let api_url = Url::parse(&server.uri()).unwrap();
        let github =
            GithubPlatform::new("wrong".to_string(), api_url, Duration::from_secs(5)).unwrap();

        let err = github.get_repo("acme_api").await.unwrap_err();

        assert_eq!(err.kind(), &ToghErrorKind::Lookup);
    }

    #[tokio::test]
    async fn create_repo_posts_name_and_visibility() {
        let server = MockServer::start().await;
        let github = platform(&server, 0).await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .and(body_json(json!({"name": "acme_api", "private": true})))
            .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("acme_api", true)))
            .expect(1)
            .mount(&server)
            .await;

        let repo = github.create_repo("acme_api", true).await.unwrap();

        assert_eq!(repo.ssh_url, "git@github.com:octo/acme_api.git");
    }

    #[tokio::test]
    async fn create_repo_failure() {
        let server = MockServer::start().await;
        let github = platform(&server, 0).await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(422).set_body_string("name already exists"))
            .mount(&server)
            .await;

        let err = github.create_repo("acme_api", true).await.unwrap_err();

        assert_eq!(err.kind(), &ToghErrorKind::RepoCreation);
    }

    #[tokio::test]
    async fn get_or_create_twice_creates_once() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .respond_with(ResponseTemplate::new(404))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("acme_api", true)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(201).set_body_json(repo_json("acme_api", true)))
            .expect(1)
            .mount(&server)
            .await;

        let first = get_or_create_repo(&github, "acme_api", true).await.unwrap();
        let second = get_or_create_repo(&github, "acme_api", true).await.unwrap();

        assert_eq!(first, "git@github.com:octo/acme_api.git");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn get_or_create_existing_repo_does_not_post() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("acme_web", false)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let url = get_or_create_repo(&github, "acme_web", true).await.unwrap();

        assert_eq!(url, "git@github.com:octo/acme_web.git");
    }

    #[tokio::test]
    async fn username_is_fetched_once() {
        let server = MockServer::start().await;
        let github = platform(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/acme_api"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        github.get_repo("acme_api").await.unwrap();
        github.get_repo("acme_api").await.unwrap();
    }

    #[tokio::test]
    async fn debug_hides_the_token() {
        let server = MockServer::start().await;
        let github = platform(&server, 0).await;

        let debug = format!("{github:?}");

        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains(&server.uri()));
    }
}
