//! Keyboard selection cursor over clickable tiles.
//!
//! Clickable tiles are visited in reading order (top to bottom, then left to
//! right). The cursor stores only a tile id; callers pass the current board
//! tiles on every call, so no list is kept or allocated.

use std::cmp::Ordering;

use crate::core::Tile;
use crate::types::TileId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    selected: Option<TileId>,
}

fn reading_order(a: &Tile, b: &Tile) -> Ordering {
    a.y.total_cmp(&b.y)
        .then(a.x.total_cmp(&b.x))
        .then(a.id.cmp(&b.id))
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Keep the selection on a clickable tile, falling back to the first one.
    pub fn sync(&mut self, tiles: &[Tile]) {
        if self.current(tiles).is_none() {
            self.selected = first(tiles).map(|t| t.id);
        }
    }

    pub fn next(&mut self, tiles: &[Tile]) {
        let after = match self.current(tiles) {
            Some(cur) => tiles
                .iter()
                .filter(|t| t.clickable && reading_order(t, cur) == Ordering::Greater)
                .min_by(|a, b| reading_order(a, b)),
            None => None,
        };
        self.selected = after.or_else(|| first(tiles)).map(|t| t.id);
    }

    pub fn prev(&mut self, tiles: &[Tile]) {
        let before = match self.current(tiles) {
            Some(cur) => tiles
                .iter()
                .filter(|t| t.clickable && reading_order(t, cur) == Ordering::Less)
                .max_by(|a, b| reading_order(a, b)),
            None => None,
        };
        self.selected = before.or_else(|| last(tiles)).map(|t| t.id);
    }

    fn current<'a>(&self, tiles: &'a [Tile]) -> Option<&'a Tile> {
        let id = self.selected?;
        tiles.iter().find(|t| t.id == id && t.clickable)
    }
}

fn first(tiles: &[Tile]) -> Option<&Tile> {
    tiles
        .iter()
        .filter(|t| t.clickable)
        .min_by(|a, b| reading_order(a, b))
}

fn last(tiles: &[Tile]) -> Option<&Tile> {
    tiles
        .iter()
        .filter(|t| t.clickable)
        .max_by(|a, b| reading_order(a, b))
}
