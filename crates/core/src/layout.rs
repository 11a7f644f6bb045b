//! Layout module - turns a shuffled deck into positioned tiles
//!
//! Each [`LayoutStrategy`] maps deck index `i` to a layer and an `(x, y)`
//! position in grid units. All strategies share the draw-order rule
//! `layer * 100 + i`, which keeps draw orders unique as long as the layer never
//! decreases along the deck (true for every strategy here).
//!
//! Strategies are stateless unit structs; [`strategy_for`] picks one from a
//! [`LayoutPattern`].

use crate::rng::RandomSource;
use crate::tile::Tile;
use crate::types::{LayoutPattern, TileId, TileKind};

/// Share of the deck that forms the sparse base layer in [`LayeredRandom`].
const BASE_LAYER_SHARE: f64 = 0.3;

/// Number of progress bands above the base layer in [`LayeredRandom`].
const LAYER_BANDS: f64 = 12.0;

/// Half-width of the grid-scatter jitter, in grid units.
const SCATTER_JITTER: f32 = 0.2;

/// Angle added per tile in the spiral tower, in radians.
const SPIRAL_STEP: f32 = 0.4;

/// Tiles per layer in the spiral tower.
const SPIRAL_TILES_PER_LAYER: u32 = 6;

/// Maps a deck onto board positions.
pub trait LayoutStrategy {
    /// Place every deck entry. Tile ids are the deck indices; the result is in
    /// deck order and clickability is left unset.
    fn place(&self, deck: &[TileKind], grid_size: u32, rng: &mut dyn RandomSource) -> Vec<Tile>;
}

/// Classic stacked layout: a scattered base, then tighter layers near the center.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredRandom;

/// Flatter, grid-aligned layout with a little jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridScatter;

/// Experimental spiral that climbs a layer every six tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpiralTower;

/// Strategy implementing `pattern`.
pub fn strategy_for(pattern: LayoutPattern) -> &'static dyn LayoutStrategy {
    match pattern {
        LayoutPattern::LayeredRandom => &LayeredRandom,
        LayoutPattern::GridScatter => &GridScatter,
        LayoutPattern::SpiralTower => &SpiralTower,
    }
}

impl LayoutStrategy for LayeredRandom {
    fn place(&self, deck: &[TileKind], grid_size: u32, rng: &mut dyn RandomSource) -> Vec<Tile> {
        let len = deck.len() as f64;
        let max = grid_size.saturating_sub(1) as f32;
        let center = grid_size as f32 / 2.0;

        deck.iter()
            .enumerate()
            .map(|(index, &kind)| {
                let progress = index as f64 / len;

                let (layer, x, y) = if progress < BASE_LAYER_SHARE {
                    let x = random_interior(rng, grid_size);
                    let y = random_interior(rng, grid_size);
                    (0, x, y)
                } else {
                    let layer = (progress * LAYER_BANDS).floor() as u32;
                    let offset_range = (3.0 - layer as f32 * 0.25).max(0.5);
                    let x = snap_half(center - 0.5 + rng.next_signed(offset_range));
                    let y = snap_half(center - 0.5 + rng.next_signed(offset_range));
                    (layer, x, y)
                };

                Tile::placed(
                    TileId(index as u32),
                    kind,
                    layer,
                    x.clamp(0.0, max),
                    y.clamp(0.0, max),
                    index as u32,
                )
            })
            .collect()
    }
}

impl LayoutStrategy for GridScatter {
    fn place(&self, deck: &[TileKind], grid_size: u32, rng: &mut dyn RandomSource) -> Vec<Tile> {
        let span = grid_size.saturating_sub(1).max(1);
        let items_per_layer = span * span;
        let row_size = ((items_per_layer as f64).sqrt().floor() as u32).max(1);

        deck.iter()
            .enumerate()
            .map(|(index, &kind)| {
                let index = index as u32;
                let layer = index / items_per_layer;
                let pos = index % items_per_layer;

                let x = 1.0 + (pos % row_size) as f32 + rng.next_signed(SCATTER_JITTER);
                let y = 1.0 + (pos / row_size) as f32 + rng.next_signed(SCATTER_JITTER);

                Tile::placed(TileId(index), kind, layer, x, y, index)
            })
            .collect()
    }
}

impl LayoutStrategy for SpiralTower {
    fn place(&self, deck: &[TileKind], grid_size: u32, _rng: &mut dyn RandomSource) -> Vec<Tile> {
        let half = grid_size as f32 / 2.0;
        let center = half - 0.5;
        let max_radius = half - 1.0;
        let len = deck.len() as f32;

        deck.iter()
            .enumerate()
            .map(|(index, &kind)| {
                let angle = index as f32 * SPIRAL_STEP;
                // Later tiles sit higher and closer to the center.
                let radius = max_radius * (1.0 - index as f32 / len);
                let layer = index as u32 / SPIRAL_TILES_PER_LAYER;

                Tile::placed(
                    TileId(index as u32),
                    kind,
                    layer,
                    center + angle.cos() * radius,
                    center + angle.sin() * radius,
                    index as u32,
                )
            })
            .collect()
    }
}

/// Uniform integer cell in `1..=grid_size-2`, away from the edges.
pub fn random_interior(rng: &mut dyn RandomSource, grid_size: u32) -> f32 {
    (rng.next_range(grid_size.saturating_sub(2)) + 1) as f32
}

/// Round to the nearest half unit, halves rounding up.
pub fn snap_half(v: f32) -> f32 {
    (v * 2.0 + 0.5).floor() / 2.0
}
