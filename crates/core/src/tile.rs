//! Tile module - a single positioned game piece

use crate::types::{TileId, TileKind, LAYER_STRIDE};

/// A typed, positioned tile
///
/// Coordinates are continuous grid units. `draw_order` is the only stacking
/// key that matters for occlusion; `layer` is a coarse tier kept for drawing
/// and for placing returned tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub layer: u32,
    pub x: f32,
    pub y: f32,
    pub draw_order: u32,
    /// Derived; refreshed by [`crate::occlusion::update_clickability`].
    pub clickable: bool,
}

impl Tile {
    /// Create a tile at a layout position. The draw order is derived from the
    /// layer and the tile's index in the generation sequence.
    pub fn placed(id: TileId, kind: TileKind, layer: u32, x: f32, y: f32, index: u32) -> Self {
        Self {
            id,
            kind,
            layer,
            x,
            y,
            draw_order: layer * LAYER_STRIDE + index,
            clickable: false,
        }
    }

    /// Positional attributes, detached from identity.
    pub fn placement(&self) -> Placement {
        Placement {
            layer: self.layer,
            x: self.x,
            y: self.y,
            draw_order: self.draw_order,
        }
    }

    /// Same identity moved to another placement.
    pub fn at(self, placement: Placement) -> Self {
        Self {
            layer: placement.layer,
            x: placement.x,
            y: placement.y,
            draw_order: placement.draw_order,
            ..self
        }
    }
}

/// Where a tile sits on the board, independent of which tile it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub layer: u32,
    pub x: f32,
    pub y: f32,
    pub draw_order: u32,
}
