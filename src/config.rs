/// Command-line configuration
///
/// Every option can also come from the environment, so a packaged build
/// can be pointed at a different metadata document without a wrapper
/// script.

use clap::Parser;

use crate::assets::thumbnail::THUMBNAIL_SIZE;
use crate::assets::Location;

#[derive(Parser, Debug, Clone)]
#[command(name = "artist-gallery")]
#[command(about = "Browse images grouped by artist, a few at a time")]
#[command(version)]
pub struct Config {
    /// Metadata document: a local path or an http(s) URL
    #[arg(
        short,
        long,
        default_value = "niji6_metadata_output.json",
        env = "GALLERY_METADATA"
    )]
    pub metadata: String,

    /// Artists added per batch (initial load and each scroll)
    #[arg(
        short,
        long,
        default_value_t = 20,
        env = "GALLERY_BATCH_SIZE",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub batch_size: u32,

    /// Seed for a reproducible selection order
    #[arg(long, env = "GALLERY_SEED")]
    pub seed: Option<u64>,

    /// Tile edge length in pixels; images are downscaled to fit
    #[arg(
        long,
        default_value_t = THUMBNAIL_SIZE,
        env = "GALLERY_TILE_SIZE",
        value_parser = clap::value_parser!(u32).range(32..=2048)
    )]
    pub tile_size: u32,

    /// Load more artists once the end of the page is within this many pixels
    #[arg(long, default_value_t = 200.0, env = "GALLERY_TRIGGER_MARGIN")]
    pub trigger_margin: f32,
}

impl Config {
    pub fn metadata_location(&self) -> Location {
        Location::parse(&self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["artist-gallery"]).unwrap();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.tile_size, 256);
        assert_eq!(config.seed, None);
        assert_eq!(config.metadata, "niji6_metadata_output.json");
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "artist-gallery",
            "--metadata",
            "https://example.com/meta.json",
            "--batch-size",
            "5",
            "--seed",
            "42",
            "--trigger-margin",
            "0",
        ])
        .unwrap();

        assert_eq!(config.batch_size, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.trigger_margin, 0.0);
        assert!(matches!(config.metadata_location(), Location::Remote(_)));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(Config::try_parse_from(["artist-gallery", "--batch-size", "0"]).is_err());
    }
}
