//! Slot module - the bounded matching tray
//!
//! Holds at most [`MAX_SLOTS`] picked tiles, kept sorted by kind name so equal
//! kinds sit next to each other. The sort is cosmetic; match detection scans in
//! slot order and does not rely on it. Each entry remembers when it arrived so
//! undo can find the most recently picked tile after sorting.

use arrayvec::ArrayVec;

use crate::tile::Tile;
use crate::types::{TileId, TileKind, MATCH_SIZE, MAX_SLOTS};

/// A tile waiting in the slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotEntry {
    pub tile: Tile,
    /// Monotonic arrival sequence within the slot's lifetime.
    pub arrival: u32,
}

/// Matching tray.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slot {
    entries: ArrayVec<SlotEntry, MAX_SLOTS>,
    next_arrival: u32,
}

impl Slot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    pub fn entries(&self) -> &[SlotEntry] {
        &self.entries
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.entries.iter().map(|e| &e.tile)
    }

    /// The slot with `tile` appended and re-sorted. `None` when full.
    pub fn with_tile(&self, tile: Tile) -> Option<Slot> {
        let mut next = self.clone();
        next.entries
            .try_push(SlotEntry {
                tile,
                arrival: next.next_arrival,
            })
            .ok()?;
        next.next_arrival = next.next_arrival.wrapping_add(1);
        // Stable: equal kinds keep arrival order.
        next.entries
            .sort_by(|a, b| a.tile.kind.as_str().cmp(b.tile.kind.as_str()));
        Some(next)
    }

    /// First kind (in slot order) with at least three tiles.
    pub fn find_triple(&self) -> Option<TileKind> {
        let mut counts = [0usize; TileKind::COUNT];
        for entry in &self.entries {
            counts[entry.tile.kind.index()] += 1;
        }
        self.entries
            .iter()
            .map(|e| e.tile.kind)
            .find(|kind| counts[kind.index()] >= MATCH_SIZE)
    }

    /// Ids of the first three tiles of `kind`, in slot order.
    pub fn first_three_of(&self, kind: TileKind) -> ArrayVec<TileId, MATCH_SIZE> {
        self.entries
            .iter()
            .filter(|e| e.tile.kind == kind)
            .map(|e| e.tile.id)
            .take(MATCH_SIZE)
            .collect()
    }

    /// The slot without the given ids.
    pub fn without_ids(&self, ids: &[TileId]) -> Slot {
        let mut next = self.clone();
        next.entries.retain(|e| !ids.contains(&e.tile.id));
        next
    }

    /// The slot without its most recently appended tile, plus that tile.
    pub fn without_last_appended(&self) -> Option<(Slot, Tile)> {
        let (index, entry) = self
            .entries
            .iter()
            .enumerate()
            .max_by_key(|(_, e)| e.arrival)?;
        let tile = entry.tile;

        let mut next = self.clone();
        next.entries.remove(index);
        Some((next, tile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileKind::*;

    fn t(id: u32, kind: TileKind) -> Tile {
        Tile::placed(TileId(id), kind, 0, 0.0, 0.0, id)
    }

    fn slot_of(tiles: &[Tile]) -> Slot {
        tiles
            .iter()
            .fold(Slot::new(), |s, &tile| s.with_tile(tile).unwrap())
    }

    fn kinds(slot: &Slot) -> Vec<TileKind> {
        slot.tiles().map(|t| t.kind).collect()
    }

    #[test]
    fn test_with_tile_sorts_by_kind_name() {
        let slot = slot_of(&[t(1, Sheep), t(2, Carrot), t(3, Wool), t(4, Carrot)]);
        assert_eq!(kinds(&slot), vec![Carrot, Carrot, Sheep, Wool]);
        // Stable within a kind.
        let ids: Vec<u32> = slot.tiles().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_with_tile_full_returns_none() {
        let tiles: Vec<Tile> = (0..7)
            .map(|i| t(i, TileKind::from_index(i as usize).unwrap()))
            .collect();
        let slot = slot_of(&tiles);
        assert!(slot.is_full());
        assert!(slot.with_tile(t(99, Milk)).is_none());
    }

    #[test]
    fn test_find_triple() {
        let slot = slot_of(&[t(1, Fire), t(2, Corn), t(3, Fire)]);
        assert_eq!(slot.find_triple(), None);

        let slot = slot.with_tile(t(4, Fire)).unwrap();
        assert_eq!(slot.find_triple(), Some(Fire));
    }

    #[test]
    fn test_first_three_of_takes_slot_order() {
        let slot = slot_of(&[t(1, Grass), t(2, Grass), t(3, Grass), t(4, Grass)]);
        let ids = slot.first_three_of(Grass);
        assert_eq!(ids.as_slice(), &[TileId(1), TileId(2), TileId(3)]);

        let after = slot.without_ids(&ids);
        assert_eq!(after.len(), 1);
        assert_eq!(after.tiles().next().unwrap().id, TileId(4));
    }

    #[test]
    fn test_without_last_appended_ignores_sort_position() {
        // Bucket sorts first but was appended last.
        let slot = slot_of(&[t(1, Wool), t(2, Sheep), t(3, Bucket)]);
        assert_eq!(slot.tiles().next().unwrap().id, TileId(3));

        let (rest, tile) = slot.without_last_appended().unwrap();
        assert_eq!(tile.id, TileId(3));
        assert_eq!(kinds(&rest), vec![Sheep, Wool]);

        let (rest, tile) = rest.without_last_appended().unwrap();
        assert_eq!(tile.id, TileId(2));
        assert_eq!(kinds(&rest), vec![Wool]);
    }

    #[test]
    fn test_without_last_appended_empty() {
        assert!(Slot::new().without_last_appended().is_none());
    }
}
