/// Shared data structures for the gallery
///
/// These structs represent the metadata document as it flows from the
/// loader into the selection engine and out to the render surface.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GalleryError, Result};

/// A single image in the metadata document
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Asset shown in the tile (usually a .webp)
    #[serde(rename = "webpFile")]
    pub webp_file: String,
    /// Short caption, copied to the clipboard on click
    #[serde(default)]
    pub caption: String,
    /// Generation prompt, shown as the tile tooltip
    #[serde(default)]
    pub prompt: String,
    /// Full-resolution image
    #[serde(rename = "imageURL")]
    pub image_url: String,
    /// Grid / contact-sheet image
    #[serde(rename = "gridURL")]
    pub grid_url: String,
}

/// Immutable mapping from artist name to that artist's images.
///
/// Artist keys iterate in sorted order so a seeded session always sees the
/// same starting sequence before shuffling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    artists: BTreeMap<String, Vec<ImageRecord>>,
}

impl Catalog {
    /// Parse a catalog from the raw bytes of the JSON metadata document
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let artists: BTreeMap<String, Vec<ImageRecord>> =
            serde_json::from_slice(bytes).map_err(GalleryError::from)?;
        Ok(Self { artists })
    }

    /// Number of artists in the catalog
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// Total number of images across all artists
    pub fn image_count(&self) -> usize {
        self.artists.values().map(Vec::len).sum()
    }

    /// All artist keys, in catalog order
    pub fn artists(&self) -> impl Iterator<Item = &str> {
        self.artists.keys().map(String::as_str)
    }

    /// Images for one artist
    pub fn images(&self, artist: &str) -> Result<&[ImageRecord]> {
        self.artists
            .get(artist)
            .map(Vec::as_slice)
            .ok_or_else(|| GalleryError::UnknownArtist(artist.to_string()))
    }
}

impl FromIterator<(String, Vec<ImageRecord>)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ImageRecord>)>>(iter: I) -> Self {
        Self {
            artists: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Image record whose fields all derive from `name`
    pub fn record(name: &str) -> ImageRecord {
        ImageRecord {
            webp_file: format!("{name}.webp"),
            caption: format!("caption {name}"),
            prompt: format!("prompt {name}"),
            image_url: format!("https://example.com/{name}.png"),
            grid_url: format!("https://example.com/{name}_grid.png"),
        }
    }

    /// Catalog built from (artist, image count) pairs
    pub fn catalog(layout: &[(&str, usize)]) -> Catalog {
        layout.iter()
            .map(|(artist, count)| {
                let images = (1..=*count)
                    .map(|i| record(&format!("{artist}-{i}")))
                    .collect();
                (artist.to_string(), images)
            })
            .collect()
    }
}
