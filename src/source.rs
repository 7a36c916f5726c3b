//! Where the music lives.
//!
//! A library is addressed with slash-separated relative targets such as
//! `songs/Folder2/cover.jpg`. Targets may be percent-encoded or carry literal
//! spaces; both forms address the same file, the way a web server decodes a
//! request path.

mod dir;
mod http;

#[cfg(test)]
pub(crate) mod fixture;

pub use dir::DirSource;
pub use http::HttpSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("`{0}` is not a usable library location")]
    InvalidLocation(String),
    #[error("`{0}` cannot be addressed in this library")]
    InvalidTarget(String),
}

impl SourceError {
    /// True when the target itself is malformed, as opposed to a lookup that
    /// failed on the way (network, permissions, ...).
    pub fn is_addressing(&self) -> bool {
        matches!(self, Self::InvalidTarget(_) | Self::InvalidLocation(_))
    }
}

/// Read access to a library of folders.
#[allow(async_fn_in_trait)]
pub trait MediaSource {
    /// Existence check that does not transfer the body.
    async fn exists(&self, target: &str) -> Result<bool, SourceError>;

    /// Fetch the whole body, `Ok(None)` when the target does not exist.
    async fn fetch(&self, target: &str) -> Result<Option<Vec<u8>>, SourceError>;

    /// Immediate subdirectories of `prefix` as targets, sorted by name.
    /// Sources that cannot enumerate return an empty list.
    async fn list_dirs(&self, prefix: &str) -> Result<Vec<String>, SourceError>;
}

/// A library opened from a command-line location.
pub enum Library {
    Http(HttpSource),
    Dir(DirSource),
}

impl Library {
    /// `http://` and `https://` locations are served remotely, anything else
    /// is a local directory.
    pub fn open(location: &str) -> Result<Self, SourceError> {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Http(HttpSource::new(location)?))
        } else {
            Ok(Self::Dir(DirSource::new(location)?))
        }
    }

    pub fn location(&self) -> String {
        match self {
            Self::Http(s) => s.base().to_string(),
            Self::Dir(s) => s.root().display().to_string(),
        }
    }
}

impl MediaSource for Library {
    async fn exists(&self, target: &str) -> Result<bool, SourceError> {
        match self {
            Self::Http(s) => s.exists(target).await,
            Self::Dir(s) => s.exists(target).await,
        }
    }

    async fn fetch(&self, target: &str) -> Result<Option<Vec<u8>>, SourceError> {
        match self {
            Self::Http(s) => s.fetch(target).await,
            Self::Dir(s) => s.fetch(target).await,
        }
    }

    async fn list_dirs(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        match self {
            Self::Http(s) => s.list_dirs(prefix).await,
            Self::Dir(s) => s.list_dirs(prefix).await,
        }
    }
}

#[cfg(test)]
mod tests;
