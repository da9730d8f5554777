//! Tile calculations for the global FLINT grid of 1°x1° tiles
//!
//! Tile `(0, 0)` is the cell whose upper left corner is at
//! longitude -180°, latitude 90°. `x` grows eastwards, `y` southwards.
//!
//! ```rust
//! use flint_tile::{bounds, LngLatBbox, Tile};
//!
//! assert_eq!(
//!     bounds(&Tile::new(180, 90)),
//!     LngLatBbox {
//!         west: 0.0,
//!         south: -1.0,
//!         east: 1.0,
//!         north: 0.0,
//!     }
//! );
//! ```
//!
//! ## Tile iterators
//!
//! ```rust
//! use flint_tile::{index, name, tiles};
//!
//! for tile in tiles(5.0, 45.0, 11.0, 48.0) {
//!     println!("Tile {} ({})", name(&tile), index(&tile));
//! }
//! ```

mod feature;
mod tile;
mod tile_iterator;
#[cfg(test)]
mod tile_test;

pub use feature::feature;
pub use tile::{
    bounds, index, locate, name, truncate_lnglat, upper_left, LngLat, LngLatBbox, Tile,
    GRID_COLUMNS, TILE_SIZE,
};
pub use tile_iterator::{tiles, TileIterator};
