//! Board module - the tiles still in play
//!
//! The board is a value: every operation that changes it returns a new
//! `Board`, already sorted by `(layer, draw_order)` and with clickability
//! recomputed. The game state swaps the new value in, which keeps the
//! previous board intact until the command has fully succeeded.

use crate::layout::random_interior;
use crate::occlusion::update_clickability;
use crate::rng::RandomSource;
use crate::tile::{Placement, Tile};
use crate::types::{TileId, LAYER_STRIDE};

/// Tiles on the play surface, in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from arbitrary tiles: sorts for drawing and computes
    /// clickability.
    pub fn from_tiles(mut tiles: Vec<Tile>) -> Self {
        tiles.sort_by_key(|t| (t.layer, t.draw_order));
        update_clickability(&mut tiles);
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn is_clickable(&self, id: TileId) -> bool {
        self.get(id).map(|t| t.clickable).unwrap_or(false)
    }

    pub fn clickable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.clickable).count()
    }

    /// Highest layer on the board, 0 when empty.
    pub fn max_layer(&self) -> u32 {
        self.tiles.iter().map(|t| t.layer).max().unwrap_or(0)
    }

    /// The board without `id`, plus the removed tile.
    pub fn without(&self, id: TileId) -> Option<(Board, Tile)> {
        let index = self.tiles.iter().position(|t| t.id == id)?;
        let mut tiles = self.tiles.clone();
        let tile = tiles.remove(index);
        update_clickability(&mut tiles);
        Some((Board { tiles }, tile))
    }

    /// Put `tile` back on top of the stack at a random interior cell.
    ///
    /// The tile gets `layer = max_layer + 1` and `draw_order = layer * 100`.
    pub fn with_returned<R: RandomSource>(&self, tile: Tile, grid_size: u32, rng: &mut R) -> Board {
        let layer = self.max_layer() + 1;
        let x = random_interior(rng, grid_size);
        let y = random_interior(rng, grid_size);
        let returned = tile.at(Placement {
            layer,
            x,
            y,
            draw_order: layer * LAYER_STRIDE,
        });

        let mut tiles = Vec::with_capacity(self.tiles.len() + 1);
        tiles.extend_from_slice(&self.tiles);
        tiles.push(returned);
        Board::from_tiles(tiles)
    }

    /// Re-deal which tile sits at which position.
    ///
    /// Placements stay in their slots; the tile identities are permuted with
    /// Fisher-Yates and laid back onto the captured placements in order.
    pub fn shuffled<R: RandomSource>(&self, rng: &mut R) -> Board {
        let placements: Vec<Placement> = self.tiles.iter().map(Tile::placement).collect();

        let mut tiles = self.tiles.clone();
        rng.shuffle(&mut tiles);
        for (tile, placement) in tiles.iter_mut().zip(placements) {
            *tile = tile.at(placement);
        }

        update_clickability(&mut tiles);
        Board { tiles }
    }
}
