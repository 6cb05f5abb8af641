/// Gallery controller
///
/// Glues the selection engine to a render surface: mounts batches of
/// artist groups, answers "show more" clicks, and keeps the single-shot
/// load trigger pointed at the last group on the page.

use rand::Rng;
use std::collections::HashMap;

use crate::error::{GalleryError, Result};
use crate::state::selection::SelectionEngine;
use crate::state::trigger::LoadTrigger;
use crate::ui::surface::{GroupId, RenderSurface};

pub struct Gallery<R: Rng> {
    engine: SelectionEngine<R>,
    trigger: LoadTrigger<GroupId>,
    /// Which artist each mounted group belongs to
    groups: HashMap<GroupId, String>,
}

impl<R: Rng> Gallery<R> {
    pub fn new(engine: SelectionEngine<R>) -> Self {
        Self {
            engine,
            trigger: LoadTrigger::new(),
            groups: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &SelectionEngine<R> {
        &self.engine
    }

    #[cfg(test)]
    pub fn trigger(&self) -> &LoadTrigger<GroupId> {
        &self.trigger
    }

    /// The group whose arrival on screen loads the next batch
    pub fn watched_group(&self) -> Option<GroupId> {
        self.trigger.watching()
    }

    /// Number of artists on the page
    pub fn artists_shown(&self) -> usize {
        self.groups.len()
    }

    /// Mount the first batch of artists and start watching the last one.
    /// Returns the number of groups mounted.
    pub fn start<S: RenderSurface>(&mut self, surface: &mut S) -> Result<usize> {
        let artists = self.engine.select_initial_artists();
        self.mount_batch(surface, &artists)?;

        tracing::info!(
            artists = artists.len(),
            total = self.engine.catalog().artist_count(),
            "initial artists mounted"
        );
        Ok(artists.len())
    }

    /// Feed a viewport observation. When the trigger fires, mounts the next
    /// batch and re-arms, or disarms for good once the catalog is exhausted.
    /// Returns the number of groups mounted.
    pub fn on_viewport<S: RenderSurface>(&mut self, near_end: bool, surface: &mut S) -> Result<usize> {
        if self.trigger.observe(near_end).is_none() {
            return Ok(0);
        }

        let artists = self.engine.select_next_batch();
        self.mount_batch(surface, &artists)?;

        if !artists.is_empty() {
            tracing::info!(
                artists = artists.len(),
                introduced = self.engine.state().introduced_artists(),
                total = self.engine.catalog().artist_count(),
                "loaded more artists"
            );
        }
        Ok(artists.len())
    }

    /// Feed a report that `group` is on screen. Only the watched group
    /// counts, which covers content that never scrolls because it already
    /// fits the window. Returns the number of groups mounted.
    pub fn on_group_visible<S: RenderSurface>(&mut self, group: GroupId, surface: &mut S) -> Result<usize> {
        if self.trigger.watching() != Some(group) {
            return Ok(0);
        }
        self.on_viewport(true, surface)
    }

    /// Handle a click on a group's "show more" button. Returns true if an
    /// image was added; false means the button has been hidden.
    pub fn show_more<S: RenderSurface>(&mut self, group: GroupId, surface: &mut S) -> Result<bool> {
        let artist = self
            .groups
            .get(&group)
            .ok_or(GalleryError::UnknownGroup(group))?;

        match self.engine.reveal_next(artist)? {
            Some(image) => {
                surface.mount_image(group, image);
                tracing::debug!(
                    artist = artist.as_str(),
                    revealed = self.engine.state().revealed_count(artist),
                    "revealed one more image"
                );
                if self
                    .engine
                    .state()
                    .artist(artist)
                    .is_some_and(|progress| progress.is_exhausted())
                {
                    surface.hide_reveal_affordance(group);
                }
                Ok(true)
            }
            None => {
                surface.hide_reveal_affordance(group);
                Ok(false)
            }
        }
    }

    fn mount_batch<S: RenderSurface>(&mut self, surface: &mut S, artists: &[String]) -> Result<()> {
        for artist in artists {
            let reveal = self.engine.initial_reveal(artist)?;
            let group = surface.mount_artist_group(artist);
            self.groups.insert(group, artist.clone());

            for image in reveal.images {
                surface.mount_image(group, image);
            }
            if reveal.show_more {
                surface.mount_reveal_affordance(group);
            }
        }

        if artists.is_empty() {
            self.trigger.disarm();
        } else if let Some(last) = surface.last_group() {
            self.trigger.arm(last);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures;
    use crate::state::trigger::TriggerPhase;
    use crate::ui::surface::GallerySurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gallery(layout: &[(&str, usize)], batch_size: usize) -> Gallery<StdRng> {
        let catalog = Arc::new(fixtures::catalog(layout));
        Gallery::new(SelectionEngine::new(catalog, batch_size, StdRng::seed_from_u64(5)))
    }

    fn tiles_for(surface: &GallerySurface, artist: &str) -> usize {
        surface
            .groups()
            .iter()
            .filter(|group| group.artist == artist)
            .map(|group| group.tiles.len())
            .sum()
    }

    #[test]
    fn test_start_mounts_groups_and_arms() {
        let mut gallery = gallery(&[("alice", 2), ("bob", 6)], 2);
        let mut surface = GallerySurface::new();

        assert_eq!(gallery.start(&mut surface).unwrap(), 2);
        assert_eq!(surface.groups().len(), 2);
        assert_eq!(gallery.trigger().phase(), TriggerPhase::Armed(surface.last_group().unwrap()));

        for group in surface.groups() {
            let revealed = gallery.engine().state().revealed_count(&group.artist);
            assert_eq!(group.tiles.len(), revealed);
            let total = gallery.engine().catalog().images(&group.artist).unwrap().len();
            assert_eq!(group.show_more, revealed < total);
        }
    }

    #[test]
    fn test_show_more_until_hidden() {
        let mut gallery = gallery(&[("bob", 6)], 1);
        let mut surface = GallerySurface::new();
        gallery.start(&mut surface).unwrap();

        let group = surface.last_group().unwrap();
        assert!(surface.group(group).unwrap().show_more);

        let mut added = 0;
        while gallery.show_more(group, &mut surface).unwrap() {
            added += 1;
            assert!(added <= 3, "more images added than remain");
        }

        assert_eq!(tiles_for(&surface, "bob"), 6);
        assert!(!surface.group(group).unwrap().show_more);
        assert_eq!(gallery.engine().state().revealed_count("bob"), 6);
    }

    #[test]
    fn test_removed_tiles_are_not_given_back() {
        let mut gallery = gallery(&[("bob", 6)], 1);
        let mut surface = GallerySurface::new();
        gallery.start(&mut surface).unwrap();

        let group = surface.last_group().unwrap();
        let first = surface.group(group).unwrap().tiles[0].id;
        surface.remove_image(first);

        let before = gallery.engine().state().revealed_count("bob");
        gallery.show_more(group, &mut surface).unwrap();
        assert_eq!(gallery.engine().state().revealed_count("bob"), before + 1);
        assert_eq!(tiles_for(&surface, "bob"), before);
    }

    #[test]
    fn test_scrolling_loads_until_exhausted() {
        let names: Vec<String> = (0..7).map(|i| format!("artist{i}")).collect();
        let layout: Vec<(&str, usize)> = names.iter().map(|n| (n.as_str(), 3)).collect();
        let mut gallery = gallery(&layout, 3);
        let mut surface = GallerySurface::new();

        assert_eq!(gallery.start(&mut surface).unwrap(), 3);

        // Not near the end yet
        assert_eq!(gallery.on_viewport(false, &mut surface).unwrap(), 0);

        assert_eq!(gallery.on_viewport(true, &mut surface).unwrap(), 3);
        assert_eq!(gallery.on_viewport(true, &mut surface).unwrap(), 1);
        assert_eq!(surface.groups().len(), 7);
        assert_eq!(gallery.watched_group(), surface.last_group());

        // Last fire finds nothing and disarms
        assert_eq!(gallery.on_viewport(true, &mut surface).unwrap(), 0);
        assert_eq!(gallery.trigger().phase(), TriggerPhase::Disarmed);
        assert_eq!(gallery.on_viewport(true, &mut surface).unwrap(), 0);

        let mut artists: Vec<&str> = surface.groups().iter().map(|g| g.artist.as_str()).collect();
        artists.sort();
        artists.dedup();
        assert_eq!(artists.len(), 7);
    }

    #[test]
    fn test_batches_that_fit_the_window_keep_loading() {
        // Three short rows fit any window, so no scroll event ever arrives.
        // Each row reports itself visible as soon as it is mounted.
        let mut gallery = gallery(&[("a", 3), ("b", 3), ("c", 3)], 1);
        let mut surface = GallerySurface::new();
        assert_eq!(gallery.start(&mut surface).unwrap(), 1);

        let mut rounds = 0;
        while let Some(last) = gallery.watched_group() {
            assert_eq!(Some(last), surface.last_group());
            gallery.on_group_visible(last, &mut surface).unwrap();
            rounds += 1;
            assert!(rounds <= 3, "trigger kept firing after the catalog ran out");
        }

        assert_eq!(surface.groups().len(), 3);
        assert_eq!(gallery.artists_shown(), 3);
        assert_eq!(gallery.trigger().phase(), TriggerPhase::Disarmed);
    }

    #[test]
    fn test_only_the_watched_group_loads_more() {
        let mut gallery = gallery(&[("a", 3), ("b", 3), ("c", 3), ("d", 3)], 2);
        let mut surface = GallerySurface::new();
        gallery.start(&mut surface).unwrap();

        let first = surface.groups()[0].id;
        let last = surface.last_group().unwrap();
        assert_eq!(gallery.on_group_visible(first, &mut surface).unwrap(), 0);
        assert_eq!(gallery.on_group_visible(last, &mut surface).unwrap(), 2);

        // A stale report for the old last row does not fire again
        assert_eq!(gallery.on_group_visible(last, &mut surface).unwrap(), 0);
        assert_eq!(surface.groups().len(), 4);
    }

    #[test]
    fn test_show_more_on_unknown_group() {
        let mut gallery = gallery(&[("bob", 6)], 1);
        let mut surface = GallerySurface::new();
        gallery.start(&mut surface).unwrap();

        let missing = GroupId::from_index(9);
        assert!(matches!(
            gallery.show_more(missing, &mut surface),
            Err(GalleryError::UnknownGroup(group)) if group == missing
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let mut gallery = gallery(&[], 4);
        let mut surface = GallerySurface::new();
        assert_eq!(gallery.start(&mut surface).unwrap(), 0);
        assert_eq!(gallery.trigger().phase(), TriggerPhase::Disarmed);
    }
}
