//! Error handling for the togh crate.
use std::{error::Error as StdError, fmt};

/// Error type for the togh crate.
#[derive(Debug)]
pub struct ToghError {
    /// Inner error.
    inner: Box<Inner>,
}

impl ToghError {
    /// Create a new error.
    pub(crate) fn new(kind: ToghErrorKind) -> Self {
        Self {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    /// Create a new error with a text source.
    pub(crate) fn with_text(mut self, text: &str) -> Self {
        self.inner.source = Some(Box::new(std::io::Error::other(text.to_string())));
        self
    }

    /// Create a new error with a source error.
    pub(crate) fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.inner.source = Some(source.into());
        self
    }

    /// Wrap a source error under another kind.
    pub(crate) fn wrap<E>(kind: ToghErrorKind, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::new(kind).with_source(source)
    }

    /// Kind of the error.
    pub fn kind(&self) -> &ToghErrorKind {
        &self.inner.kind
    }
}

/// Type alias for a boxed error.
pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Inner error type for the togh crate.
#[derive(Debug)]
struct Inner {
    /// Error kind.
    kind: ToghErrorKind,

    /// Source error.
    source: Option<BoxError>,
}

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToghErrorKind {
    /// Missing credential or invalid configuration.
    Config,

    /// Remote lookup failed for a reason other than "not found".
    Lookup,

    /// Remote repository creation failed.
    RepoCreation,

    /// Local git config could not be written.
    ConfigWrite,

    /// Push rejected or transport failure.
    Publish,

    /// Filesystem access failed.
    Filesystem,

    /// Reading user input failed.
    Prompt,

    /// Some repositories could not be processed.
    Incomplete,

    /// Error related to the reqwest crate.
    Reqwest,

    /// Error related to serde.
    Serde,
}

impl fmt::Display for ToghErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ToghErrorKind::Config => "configuration error",
            ToghErrorKind::Lookup => "remote lookup failed",
            ToghErrorKind::RepoCreation => "remote creation failed",
            ToghErrorKind::ConfigWrite => "unable to write git config",
            ToghErrorKind::Publish => "push failed",
            ToghErrorKind::Filesystem => "filesystem error",
            ToghErrorKind::Prompt => "unable to read input",
            ToghErrorKind::Incomplete => "run incomplete",
            ToghErrorKind::Reqwest => "http error",
            ToghErrorKind::Serde => "unable to decode response",
        };
        f.write_str(text)
    }
}

impl fmt::Display for ToghError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.source {
            Some(source) => write!(f, "{}: {}", self.inner.kind, source),
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

impl StdError for ToghError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

impl From<reqwest::Error> for ToghError {
    fn from(e: reqwest::Error) -> Self {
        Self::wrap(ToghErrorKind::Reqwest, e)
    }
}

impl From<serde_json::Error> for ToghError {
    fn from(e: serde_json::Error) -> Self {
        Self::wrap(ToghErrorKind::Serde, e)
    }
}

impl From<std::io::Error> for ToghError {
    fn from(e: std::io::Error) -> Self {
        Self::wrap(ToghErrorKind::Filesystem, e)
    }
}

impl From<git2::Error> for ToghError {
    fn from(e: git2::Error) -> Self {
        Self::wrap(ToghErrorKind::Publish, e)
    }
}

impl From<toml::de::Error> for ToghError {
    fn from(e: toml::de::Error) -> Self {
        Self::wrap(ToghErrorKind::Config, e)
    }
}

impl From<&str> for ToghError {
    fn from(text: &str) -> Self {
        Self::new(ToghErrorKind::Config).with_text(text)
    }
}

impl From<String> for ToghError {
    fn from(text: String) -> Self {
        Self::new(ToghErrorKind::Config).with_text(&text)
    }
}
