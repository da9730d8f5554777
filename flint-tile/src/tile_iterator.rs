//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile iterators

use crate::tile::{locate, LngLatBbox, Tile};

/// Half-open tile index ranges `[minx, maxx) x [miny, maxy)`
#[derive(PartialEq, Clone, Debug)]
pub(crate) struct TileRange {
    pub minx: i32,
    pub miny: i32,
    pub maxx: i32,
    pub maxy: i32,
}

impl TileRange {
    fn is_empty(&self) -> bool {
        self.minx >= self.maxx || self.miny >= self.maxy
    }
}

/// Split a box crossing the antimeridian (`west > east`) into a western and an eastern part
pub(crate) fn split_antimeridian(west: f64, south: f64, east: f64, north: f64) -> Vec<LngLatBbox> {
    if west > east {
        vec![
            LngLatBbox {
                west: -180.0,
                south,
                east,
                north,
            },
            LngLatBbox {
                west,
                south,
                east: 180.0,
                north,
            },
        ]
    } else {
        vec![LngLatBbox {
            west,
            south,
            east,
            north,
        }]
    }
}

/// Tile ranges of a box not crossing the antimeridian.
///
/// The lower left tile bounds `maxy` and the upper right tile bounds `maxx`,
/// both exclusive. A tile at the east or south edge whose interior is still
/// covered by the box can therefore be left out.
pub(crate) fn tile_range(bbox: &LngLatBbox) -> TileRange {
    let w = bbox.west.max(-180.0);
    let s = bbox.south.max(-90.0);
    let e = bbox.east.min(180.0);
    let n = bbox.north.min(90.0);

    let ll = locate(w, s);
    let ur = locate(e, n);

    TileRange {
        minx: ll.x.max(0),
        miny: ur.y.max(0),
        maxx: ur.x,
        maxy: ll.y,
    }
}

/// Column-by-column iterator over one or more tile ranges
pub struct TileIterator {
    ranges: Vec<TileRange>,
    current: usize,
    x: i32,
    y: i32,
}

impl TileIterator {
    pub(crate) fn new(ranges: Vec<TileRange>) -> TileIterator {
        let mut iter = TileIterator {
            ranges,
            current: 0,
            x: 0,
            y: 0,
        };
        iter.skip_empty_ranges();
        iter
    }

    fn skip_empty_ranges(&mut self) {
        while let Some(range) = self.ranges.get(self.current) {
            if range.is_empty() {
                self.current += 1;
            } else {
                self.x = range.minx;
                self.y = range.miny;
                return;
            }
        }
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.ranges.get(self.current)?;
        let current = Tile::new(self.x, self.y);
        if self.y < range.maxy - 1 {
            self.y += 1;
        } else if self.x < range.maxx - 1 {
            self.x += 1;
            self.y = range.miny;
        } else {
            self.current += 1;
            self.skip_empty_ranges();
        }
        Some(current)
    }
}

/// Tiles intersecting a geographic bounding box.
///
/// Boxes with `west > east` wrap the antimeridian; the part west of the
/// antimeridian is enumerated first.
pub fn tiles(west: f64, south: f64, east: f64, north: f64) -> TileIterator {
    let ranges = split_antimeridian(west, south, east, north)
        .iter()
        .map(tile_range)
        .collect();
    TileIterator::new(ranges)
}
