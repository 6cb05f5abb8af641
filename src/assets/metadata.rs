/// Metadata document loading
///
/// The document is fetched exactly once at startup. There is no retry: a
/// failed fetch or a malformed document leaves the gallery empty.

use reqwest::Client;

use super::source::Location;
use crate::error::Result;
use crate::state::data::Catalog;

/// Fetch and parse the metadata document at `source`
pub async fn load_catalog(source: Location, client: Client) -> Result<Catalog> {
    tracing::info!(%source, "loading metadata");

    let bytes = source.fetch(&client).await?;
    let catalog = Catalog::from_slice(&bytes)?;

    tracing::info!(
        artists = catalog.artist_count(),
        images = catalog.image_count(),
        "metadata loaded"
    );
    Ok(catalog)
}
