/// Per-session disclosure bookkeeping
///
/// Tracks which artists have been introduced into the view and, for each
/// of them, the order in which its images are revealed and how far along
/// that order the gallery has gone. Nothing here is ever removed: taking
/// a tile off the screen does not give its image back.

use std::collections::HashMap;

/// Reveal progress for one artist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistDisclosure {
    /// Permutation of indices into the artist's catalog entry
    order: Vec<usize>,
    /// How many entries of `order` have been revealed
    revealed: usize,
}

impl ArtistDisclosure {
    pub fn new(order: Vec<usize>) -> Self {
        Self { order, revealed: 0 }
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Catalog indices revealed so far, in reveal order
    pub fn revealed_indices(&self) -> &[usize] {
        &self.order[..self.revealed]
    }

    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.order.len()
    }

    /// Mark up to `count` images as revealed and return their catalog indices
    pub fn reveal(&mut self, count: usize) -> &[usize] {
        let start = self.revealed;
        let end = (start + count).min(self.order.len());
        self.revealed = end;
        &self.order[start..end]
    }

    /// Reveal one more image, if any remain
    pub fn reveal_one(&mut self) -> Option<usize> {
        self.reveal(1).first().copied()
    }
}

/// Session-wide disclosure state owned by the selection engine
#[derive(Debug, Clone, Default)]
pub struct DisclosureState {
    /// Every artist key; the first `introduced` entries are on screen
    artist_order: Vec<String>,
    introduced: usize,
    artists: HashMap<String, ArtistDisclosure>,
}

impl DisclosureState {
    pub fn new(artist_order: Vec<String>) -> Self {
        Self {
            artist_order,
            introduced: 0,
            artists: HashMap::new(),
        }
    }

    /// Number of artists ever assigned a render group
    pub fn introduced_artists(&self) -> usize {
        self.introduced
    }

    /// Introduced artists, in the order they were introduced
    pub fn introduced(&self) -> &[String] {
        &self.artist_order[..self.introduced]
    }

    pub fn total_artists(&self) -> usize {
        self.artist_order.len()
    }

    /// Artists not yet introduced; selection may reorder this tail freely
    pub fn remaining_mut(&mut self) -> &mut [String] {
        &mut self.artist_order[self.introduced..]
    }

    /// Introduce up to `count` artists from the front of the remaining tail
    pub fn introduce(&mut self, count: usize) -> Vec<String> {
        let start = self.introduced;
        let end = (start + count).min(self.artist_order.len());
        self.introduced = end;
        self.artist_order[start..end].to_vec()
    }

    /// Images revealed so far for `artist` (0 if never introduced)
    pub fn revealed_count(&self, artist: &str) -> usize {
        self.artists.get(artist).map_or(0, ArtistDisclosure::revealed)
    }

    pub fn artist(&self, artist: &str) -> Option<&ArtistDisclosure> {
        self.artists.get(artist)
    }

    pub fn artist_mut(&mut self, artist: &str) -> Option<&mut ArtistDisclosure> {
        self.artists.get_mut(artist)
    }

    /// Start tracking an artist. An artist already being tracked keeps its
    /// existing order and progress.
    pub fn begin_artist(&mut self, artist: &str, order: Vec<usize>) -> &mut ArtistDisclosure {
        self.artists
            .entry(artist.to_string())
            .or_insert_with(|| ArtistDisclosure::new(order))
    }
}
