/// Render surface
///
/// The selection engine never touches widgets directly. It issues mount /
/// unmount commands against a `RenderSurface`; `GallerySurface` is the
/// in-memory model that the iced view draws from.

use iced::widget::container;
use iced::widget::image::Handle;
use std::collections::HashMap;

use crate::state::data::ImageRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(usize);

impl GroupId {
    /// Widget id of the container that wraps this group's row, used to
    /// ask the runtime whether the row is on screen
    pub fn container_id(self) -> container::Id {
        container::Id::new(format!("artist-group-{}", self.0))
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Commands the gallery issues against whatever draws it
pub trait RenderSurface {
    /// Append a new, empty row for `artist`
    fn mount_artist_group(&mut self, artist: &str) -> GroupId;

    /// Append an image tile to a group (before its "show more" button)
    fn mount_image(&mut self, group: GroupId, image: ImageRecord) -> Option<TileId>;

    /// Take a tile off the screen. Removing twice is a no-op.
    fn remove_image(&mut self, tile: TileId);

    fn mount_reveal_affordance(&mut self, group: GroupId);

    fn hide_reveal_affordance(&mut self, group: GroupId);

    /// The group currently at the end of the page
    fn last_group(&self) -> Option<GroupId>;
}

/// Loading state of a tile's picture
#[derive(Debug, Clone)]
pub enum Visual {
    Pending,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub image: ImageRecord,
    pub visual: Visual,
}

#[derive(Debug, Clone)]
pub struct ArtistGroup {
    pub id: GroupId,
    pub artist: String,
    pub tiles: Vec<Tile>,
    pub show_more: bool,
}

/// Everything currently on the page, in page order
#[derive(Debug, Default)]
pub struct GallerySurface {
    groups: Vec<ArtistGroup>,
    tile_groups: HashMap<TileId, GroupId>,
    next_tile: usize,
    /// Tiles whose pictures have not been requested yet. They stay here
    /// until their group is seen on screen.
    pending: Vec<TileId>,
}

impl GallerySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[ArtistGroup] {
        &self.groups
    }

    #[cfg(test)]
    pub fn group(&self, id: GroupId) -> Option<&ArtistGroup> {
        self.groups.get(id.0)
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        let group = self.tile_groups.get(&id)?;
        self.groups[group.0].tiles.iter().find(|tile| tile.id == id)
    }

    /// Groups that still have tiles waiting for their picture, in page order
    pub fn groups_awaiting_pictures(&self) -> Vec<GroupId> {
        let mut groups: Vec<GroupId> = self
            .pending
            .iter()
            .filter_map(|id| self.tile_groups.get(id).copied())
            .collect();
        groups.sort_by_key(|group| group.0);
        groups.dedup();
        groups
    }

    /// Pictures to request for `group`, with the image each tile shows.
    /// Tiles of other groups stay pending.
    pub fn take_pending_loads(&mut self, group: GroupId) -> Vec<(TileId, ImageRecord)> {
        let (taken, rest): (Vec<TileId>, Vec<TileId>) = std::mem::take(&mut self.pending)
            .into_iter()
            .filter(|id| self.tile_groups.contains_key(id))
            .partition(|id| self.tile_groups.get(id) == Some(&group));
        self.pending = rest;

        taken
            .into_iter()
            .filter_map(|id| self.tile(id).map(|tile| (id, tile.image.clone())))
            .collect()
    }

    /// Attach a loaded (or failed) picture. Returns false if the tile was
    /// removed while its picture was loading.
    pub fn set_visual(&mut self, id: TileId, visual: Visual) -> bool {
        let Some(group) = self.tile_groups.get(&id) else {
            return false;
        };
        match self.groups[group.0].tiles.iter_mut().find(|tile| tile.id == id) {
            Some(tile) => {
                tile.visual = visual;
                true
            }
            None => false,
        }
    }
}

impl RenderSurface for GallerySurface {
    fn mount_artist_group(&mut self, artist: &str) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(ArtistGroup {
            id,
            artist: artist.to_string(),
            tiles: Vec::new(),
            show_more: false,
        });
        id
    }

    fn mount_image(&mut self, group: GroupId, image: ImageRecord) -> Option<TileId> {
        let row = self.groups.get_mut(group.0)?;
        let id = TileId(self.next_tile);
        self.next_tile += 1;

        row.tiles.push(Tile {
            id,
            image,
            visual: Visual::Pending,
        });
        self.tile_groups.insert(id, group);
        self.pending.push(id);
        Some(id)
    }

    fn remove_image(&mut self, tile: TileId) {
        if let Some(group) = self.tile_groups.remove(&tile) {
            self.groups[group.0].tiles.retain(|t| t.id != tile);
        }
    }

    fn mount_reveal_affordance(&mut self, group: GroupId) {
        if let Some(row) = self.groups.get_mut(group.0) {
            row.show_more = true;
        }
    }

    fn hide_reveal_affordance(&mut self, group: GroupId) {
        if let Some(row) = self.groups.get_mut(group.0) {
            row.show_more = false;
        }
    }

    fn last_group(&self) -> Option<GroupId> {
        self.groups.last().map(|group| group.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::fixtures::record;

    #[test]
    fn test_mount_and_remove() {
        let mut surface = GallerySurface::new();
        assert_eq!(surface.last_group(), None);

        let alice = surface.mount_artist_group("alice");
        let bob = surface.mount_artist_group("bob");
        assert_eq!(surface.last_group(), Some(bob));

        let first = surface.mount_image(alice, record("a1")).unwrap();
        let second = surface.mount_image(alice, record("a2")).unwrap();
        assert_ne!(first, second);
        assert_eq!(surface.group(alice).unwrap().tiles.len(), 2);

        surface.remove_image(first);
        surface.remove_image(first);
        let tiles = &surface.group(alice).unwrap().tiles;
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].id, second);
        assert!(surface.tile(first).is_none());
    }

    #[test]
    fn test_affordance_toggles() {
        let mut surface = GallerySurface::new();
        let group = surface.mount_artist_group("bob");
        assert!(!surface.group(group).unwrap().show_more);

        surface.mount_reveal_affordance(group);
        assert!(surface.group(group).unwrap().show_more);
        surface.hide_reveal_affordance(group);
        assert!(!surface.group(group).unwrap().show_more);
    }

    #[test]
    fn test_pending_loads_skip_removed_tiles() {
        let mut surface = GallerySurface::new();
        let group = surface.mount_artist_group("alice");
        let kept = surface.mount_image(group, record("a1")).unwrap();
        let removed = surface.mount_image(group, record("a2")).unwrap();
        surface.remove_image(removed);

        let pending = surface.take_pending_loads(group);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0, kept);
        assert!(surface.take_pending_loads(group).is_empty());
        assert!(surface.groups_awaiting_pictures().is_empty());
    }

    #[test]
    fn test_pictures_wait_for_their_group() {
        let mut surface = GallerySurface::new();
        let alice = surface.mount_artist_group("alice");
        let bob = surface.mount_artist_group("bob");
        let empty = surface.mount_artist_group("carol");
        surface.mount_image(bob, record("b1")).unwrap();
        let a1 = surface.mount_image(alice, record("a1")).unwrap();
        surface.mount_image(bob, record("b2")).unwrap();

        assert_eq!(surface.groups_awaiting_pictures(), vec![alice, bob]);
        assert!(surface.take_pending_loads(empty).is_empty());

        // Loading alice's row leaves bob's tiles untouched
        let loads = surface.take_pending_loads(alice);
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].0, a1);
        assert_eq!(surface.groups_awaiting_pictures(), vec![bob]);
        assert!(matches!(surface.tile(loads[0].0).unwrap().visual, Visual::Pending));

        let loads = surface.take_pending_loads(bob);
        let names: Vec<&str> = loads.iter().map(|(_, image)| image.webp_file.as_str()).collect();
        assert_eq!(names, vec!["b1.webp", "b2.webp"]);
        assert!(surface.groups_awaiting_pictures().is_empty());
    }

    #[test]
    fn test_container_ids_are_per_group() {
        let mut surface = GallerySurface::new();
        let alice = surface.mount_artist_group("alice");
        let bob = surface.mount_artist_group("bob");
        assert_ne!(alice.container_id(), bob.container_id());
        assert_eq!(alice.container_id(), alice.container_id());
    }

    #[test]
    fn test_visual_for_removed_tile_is_dropped() {
        let mut surface = GallerySurface::new();
        let group = surface.mount_artist_group("alice");
        let tile = surface.mount_image(group, record("a1")).unwrap();

        assert!(surface.set_visual(tile, Visual::Failed));
        assert!(matches!(surface.tile(tile).unwrap().visual, Visual::Failed));

        surface.remove_image(tile);
        assert!(!surface.set_visual(tile, Visual::Failed));
    }

    #[test]
    fn test_mount_into_unknown_group() {
        let mut surface = GallerySurface::new();
        assert!(surface.mount_image(GroupId(4), record("x")).is_none());
    }
}
