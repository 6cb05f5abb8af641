use image::imageops::FilterType;
use reqwest::Client;
use tokio::task;

use super::source::Location;
use crate::error::Result;

/// Default edge length of a tile thumbnail
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decoded RGBA pixels ready to hand to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Fetch an image asset and decode it into a thumbnail no larger than
/// `size` on either edge
pub async fn load_thumbnail(location: Location, size: u32, client: Client) -> Result<Thumbnail> {
    let bytes = location.fetch(&client).await?;

    // Decoding and resizing are CPU-bound
    task::spawn_blocking(move || decode_thumbnail(&bytes, size)).await?
}

/// Decode image bytes (any format the image crate knows, webp included)
/// and downscale them to fit in a `size` x `size` box
fn decode_thumbnail(bytes: &[u8], size: u32) -> Result<Thumbnail> {
    let img = image::load_from_memory(bytes)?;

    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::source::http_client;
    use crate::error::GalleryError;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 90, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_large_image_is_downscaled() {
        let thumb = decode_thumbnail(&png(600, 300), 256).unwrap();
        assert_eq!((thumb.width, thumb.height), (256, 128));
        assert_eq!(thumb.pixels.len(), 256 * 128 * 4);
    }

    #[test]
    fn test_small_image_keeps_size() {
        let thumb = decode_thumbnail(&png(40, 20), 256).unwrap();
        assert_eq!((thumb.width, thumb.height), (40, 20));
        assert_eq!(&thumb.pixels[..4], &[200, 40, 90, 255]);
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        assert!(matches!(
            decode_thumbnail(b"definitely not an image", 256),
            Err(GalleryError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        std::fs::write(&path, png(512, 512)).unwrap();

        let thumb = load_thumbnail(Location::Local(path), 128, http_client())
            .await
            .unwrap();
        assert_eq!((thumb.width, thumb.height), (128, 128));
    }
}
