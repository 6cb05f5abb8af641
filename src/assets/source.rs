/// Where metadata and image assets come from
///
/// A location is either a file on disk or an http(s) URL. References found
/// inside the metadata document are resolved against the document's own
/// location, the same way a browser resolves relative links against the
/// page.

use reqwest::{Client, Url};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{GalleryError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Remote(Url),
}

impl Location {
    /// Interpret a user-supplied string (CLI argument, metadata field)
    pub fn parse(reference: &str) -> Self {
        match remote_url(reference) {
            Some(url) => Location::Remote(url),
            None => Location::Local(PathBuf::from(reference)),
        }
    }

    /// Resolve `reference` relative to this location
    pub fn resolve(&self, reference: &str) -> Result<Location> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(GalleryError::InvalidReference("empty reference".to_string()));
        }
        if let Some(url) = remote_url(reference) {
            return Ok(Location::Remote(url));
        }

        match self {
            Location::Remote(base) => base
                .join(reference)
                .map(Location::Remote)
                .map_err(|e| GalleryError::InvalidReference(format!("{reference}: {e}"))),
            Location::Local(base) => {
                let path = Path::new(reference);
                if path.is_absolute() {
                    return Ok(Location::Local(path.to_path_buf()));
                }
                let dir = base.parent().unwrap_or_else(|| Path::new(""));
                Ok(Location::Local(dir.join(path)))
            }
        }
    }

    /// Fetch the full contents of this location. Remote fetches go through
    /// `client` so they share its connection pool.
    pub async fn fetch(&self, client: &Client) -> Result<Vec<u8>> {
        match self {
            Location::Local(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| GalleryError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            Location::Remote(url) => {
                let response = client.get(url.clone()).send().await?.error_for_status()?;
                Ok(response.bytes().await?.to_vec())
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// HTTP client shared by every metadata and picture fetch of a session
pub fn http_client() -> Client {
    let agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
    Client::builder().user_agent(agent).build().unwrap_or_else(|e| {
        tracing::warn!("falling back to the default HTTP client: {e}");
        Client::new()
    })
}

fn remote_url(reference: &str) -> Option<Url> {
    let url = Url::parse(reference).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
