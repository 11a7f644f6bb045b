//! Occlusion module - which tiles can currently be picked
//!
//! A tile is covered when another tile with a strictly higher draw order
//! overlaps its footprint on both axes. Footprints are squares of side
//! [`OCCLUSION_THRESHOLD`] grid units, so even small overlaps block.
//!
//! The check is all-pairs, O(n²), and runs over the whole board after every
//! change. Levels top out around 120 tiles, so this stays cheap as long as it
//! does not allocate: both functions work in place on a slice.

use crate::tile::Tile;
use crate::types::OCCLUSION_THRESHOLD;

/// True if `upper` lies above `lower` and their footprints overlap.
#[inline(always)]
pub fn covers(upper: &Tile, lower: &Tile) -> bool {
    upper.draw_order > lower.draw_order
        && (upper.x - lower.x).abs() < OCCLUSION_THRESHOLD
        && (upper.y - lower.y).abs() < OCCLUSION_THRESHOLD
}

/// True if any other tile in `tiles` covers `target`.
pub fn is_covered(target: &Tile, tiles: &[Tile]) -> bool {
    tiles
        .iter()
        .any(|other| other.id != target.id && covers(other, target))
}

/// Recompute `clickable` for every tile against the whole slice.
pub fn update_clickability(tiles: &mut [Tile]) {
    for i in 0..tiles.len() {
        let covered = is_covered(&tiles[i], tiles);
        tiles[i].clickable = !covered;
    }
}
