/// Selection engine
///
/// Decides which artists enter the view, how many of each artist's images
/// are shown up front, and which image comes next when the user asks for
/// more. All randomness comes from the injected `Rng`, so a seeded engine
/// replays the same session.

use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::data::{Catalog, ImageRecord};
use super::disclosure::DisclosureState;
use super::shuffle::{shuffle_in_place, shuffled};
use crate::error::Result;

/// How many images an artist shows when first introduced
pub const INITIAL_REVEAL: RangeInclusive<usize> = 3..=5;

/// Images to mount for a newly introduced artist
#[derive(Debug, Clone, PartialEq)]
pub struct InitialReveal {
    pub images: Vec<ImageRecord>,
    /// True when the artist has more images than were revealed
    pub show_more: bool,
}

pub struct SelectionEngine<R: Rng> {
    catalog: Arc<Catalog>,
    state: DisclosureState,
    batch_size: usize,
    rng: R,
}

impl<R: Rng> SelectionEngine<R> {
    pub fn new(catalog: Arc<Catalog>, batch_size: usize, rng: R) -> Self {
        let artists = catalog.artists().map(str::to_string).collect();
        Self {
            catalog,
            state: DisclosureState::new(artists),
            batch_size: batch_size.max(1),
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &DisclosureState {
        &self.state
    }

    /// True once every artist has been introduced
    pub fn is_exhausted(&self) -> bool {
        self.state.introduced_artists() >= self.state.total_artists()
    }

    /// Pick the first batch of artists from the whole catalog.
    ///
    /// Meant to be called once. A second call does not reshuffle; it
    /// returns the artists already introduced.
    pub fn select_initial_artists(&mut self) -> Vec<String> {
        if self.state.introduced_artists() > 0 {
            return self.state.introduced().to_vec();
        }
        self.select_next_batch()
    }

    /// Pick the next batch from the artists not yet introduced.
    /// Returns an empty list once the catalog is exhausted.
    pub fn select_next_batch(&mut self) -> Vec<String> {
        shuffle_in_place(self.state.remaining_mut(), &mut self.rng);
        let batch = self.state.introduce(self.batch_size);

        tracing::debug!(
            batch = batch.len(),
            introduced = self.state.introduced_artists(),
            total = self.state.total_artists(),
            "selected artist batch"
        );
        batch
    }

    /// Choose the images an artist shows when its group is first mounted.
    pub fn initial_reveal(&mut self, artist: &str) -> Result<InitialReveal> {
        let images = self.catalog.images(artist)?;

        if let Some(existing) = self.state.artist(artist) {
            // Already introduced: report what is on screen without drawing again
            let revealed = existing
                .revealed_indices()
                .iter()
                .map(|&i| images[i].clone())
                .collect();
            return Ok(InitialReveal {
                images: revealed,
                show_more: !existing.is_exhausted(),
            });
        }

        let count = self.rng.gen_range(INITIAL_REVEAL);
        let indices: Vec<usize> = (0..images.len()).collect();
        let order = shuffled(&indices, &mut self.rng);

        let disclosure = self.state.begin_artist(artist, order);
        let revealed: Vec<ImageRecord> = disclosure
            .reveal(count)
            .iter()
            .map(|&i| images[i].clone())
            .collect();
        let show_more = images.len() > revealed.len();

        tracing::debug!(
            artist,
            shown = revealed.len(),
            total = images.len(),
            "initial reveal"
        );

        Ok(InitialReveal {
            images: revealed,
            show_more,
        })
    }

    /// Reveal one more image for `artist`, or `None` when all are shown.
    pub fn reveal_next(&mut self, artist: &str) -> Result<Option<ImageRecord>> {
        let images = self.catalog.images(artist)?;

        // An artist that was never introduced has nothing queued
        let Some(disclosure) = self.state.artist_mut(artist) else {
            tracing::warn!(artist, "reveal requested for an artist not yet introduced");
            return Ok(None);
        };

        Ok(disclosure.reveal_one().map(|i| images[i].clone()))
    }
}
