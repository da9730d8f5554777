//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_gdal::transform::{from_bounds, translate, GeoTransform};
use flint_tile::{bounds, tiles, LngLatBbox, Tile};

/// Pixels added on each side of a tile to avoid interpolation artefacts at its edges
pub const PAD_PIXELS: usize = 2;

/// Warp parameters of one grid tile
#[derive(PartialEq, Clone, Debug)]
pub struct TileJob {
    pub tile: Tile,
    pub bounds: LngLatBbox,
    /// Output size in pixels
    pub width: usize,
    pub height: usize,
    /// Output transform without padding
    pub transform: GeoTransform,
    pub padded_transform: GeoTransform,
    pub padded_width: usize,
    pub padded_height: usize,
}

impl TileJob {
    /// `res` is the absolute target pixel size (x, y) in degrees
    pub fn new(tile: Tile, res: (f64, f64)) -> TileJob {
        let bounds = bounds(&tile);
        let width = ((bounds.width() / res.0).round() as usize).max(1);
        let height = ((bounds.height() / res.1).round() as usize).max(1);
        let transform = from_bounds(
            bounds.west,
            bounds.south,
            bounds.east,
            bounds.north,
            width,
            height,
        );
        let pad = PAD_PIXELS as f64;
        TileJob {
            tile,
            bounds,
            width,
            height,
            transform,
            padded_transform: translate(&transform, -pad, -pad),
            padded_width: width + 2 * PAD_PIXELS,
            padded_height: height + 2 * PAD_PIXELS,
        }
    }
    /// Offset of the output window within the padded raster
    pub fn window_offset(&self) -> (usize, usize) {
        (PAD_PIXELS, PAD_PIXELS)
    }
    pub fn pixels(&self) -> usize {
        self.width * self.height
    }
    pub fn padded_pixels(&self) -> usize {
        self.padded_width * self.padded_height
    }
}

/// Jobs of all grid tiles intersecting `bounds` (west, south, east, north)
pub fn tile_jobs(bounds: &[f64; 4], res: (f64, f64)) -> impl Iterator<Item = TileJob> {
    tiles(bounds[0], bounds[1], bounds[2], bounds[3]).map(move |tile| TileJob::new(tile, res))
}
