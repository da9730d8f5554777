//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Global 1°x1° tile grid

use std::fmt;

/// Number of tile columns of the full globe
pub const GRID_COLUMNS: i64 = 360;

/// Tile width and height in degrees
pub const TILE_SIZE: f64 = 1.0;

/// Tile of the global grid
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
}

impl Tile {
    pub fn new(x: i32, y: i32) -> Tile {
        Tile { x, y }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Longitude and latitude pair in decimal degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Geographic bounding box in decimal degrees
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct LngLatBbox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl LngLatBbox {
    pub fn width(&self) -> f64 {
        self.east - self.west
    }
    pub fn height(&self) -> f64 {
        self.north - self.south
    }
}

/// Upper left longitude and latitude of a tile
pub fn upper_left(tile: &Tile) -> LngLat {
    LngLat {
        lng: tile.x as f64 - 180.0,
        lat: 90.0 - tile.y as f64,
    }
}

/// Bounding box of a tile
pub fn bounds(tile: &Tile) -> LngLatBbox {
    let ul = upper_left(tile);
    // saturates for tiles located outside of the globe
    let lr = upper_left(&Tile::new(tile.x.saturating_add(1), tile.y.saturating_add(1)));
    LngLatBbox {
        west: ul.lng,
        south: lr.lat,
        east: lr.lng,
        north: ul.lat,
    }
}

/// Tile containing a longitude and latitude.
///
/// The position is not clamped to the globe, see `truncate_lnglat`.
pub fn locate(lng: f64, lat: f64) -> Tile {
    let x = (lng + 180.0).floor() as i32;
    let y = (-(lat - 90.0).floor()) as i32;
    Tile::new(x, y)
}

/// Clamp a position to [-180, 180] x [-90, 90]
pub fn truncate_lnglat(lng: f64, lat: f64) -> (f64, f64) {
    (lng.max(-180.0).min(180.0), lat.max(-90.0).min(90.0))
}

/// Dense surrogate key of a tile, used in file names
pub fn index(tile: &Tile) -> i64 {
    tile.y as i64 * GRID_COLUMNS + tile.x as i64
}

/// Fixed width degree label of the tile's upper left corner, e.g. `-001_090`
pub fn name(tile: &Tile) -> String {
    let b = bounds(tile);
    format!(
        "{}{:03}_{}{:03}",
        if b.west < 0.0 { "-" } else { "" },
        (b.west as i64).abs(),
        if b.north < 0.0 { "-" } else { "" },
        (b.north as i64).abs()
    )
}
