/// Error types for the gallery
///
/// Loaders and the selection engine return `Result<T>`; the UI layer turns
/// errors into log lines and, at async boundaries, into `String`s so they
/// can travel inside `Clone` messages.

use thiserror::Error;

use crate::ui::surface::GroupId;

#[derive(Error, Debug)]
pub enum GalleryError {
    /// Local file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Network request failed or returned a non-success status
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Metadata document is not valid JSON or does not match the schema
    #[error("malformed metadata: {0}")]
    Json(#[from] serde_json::Error),

    /// Image bytes could not be decoded
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// An asset reference that cannot be resolved against its source
    #[error("invalid asset reference: {0}")]
    InvalidReference(String),

    /// Artist key that is not in the catalog
    #[error("unknown artist: {0}")]
    UnknownArtist(String),

    /// Group id that does not belong to any mounted artist row
    #[error("unknown artist group: {0:?}")]
    UnknownGroup(GroupId),

    /// Background blocking task panicked or was cancelled
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Convenience Result type using GalleryError
pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_subject() {
        let err = GalleryError::UnknownArtist("carol".to_string());
        assert_eq!(err.to_string(), "unknown artist: carol");

        let err = GalleryError::Io {
            path: "missing.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("failed to read missing.json"));

        let err = GalleryError::UnknownGroup(GroupId::from_index(7));
        assert_eq!(err.to_string(), "unknown artist group: GroupId(7)");
    }
}
