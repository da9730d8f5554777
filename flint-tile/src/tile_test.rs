//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::feature::feature;
use crate::tile::{
    bounds, index, locate, name, truncate_lnglat, upper_left, LngLat, LngLatBbox, Tile,
};
use crate::tile_iterator::{split_antimeridian, tile_range, tiles, TileRange};
use serde_json::{json, Map};
use std::collections::HashSet;

#[test]
fn test_upper_left() {
    assert_eq!(
        upper_left(&Tile::new(0, 0)),
        LngLat {
            lng: -180.0,
            lat: 90.0
        }
    );
    assert_eq!(
        upper_left(&Tile::new(180, 90)),
        LngLat { lng: 0.0, lat: 0.0 }
    );
    // no clamping
    assert_eq!(
        upper_left(&Tile::new(361, 181)),
        LngLat {
            lng: 181.0,
            lat: -91.0
        }
    );
}

#[test]
fn test_bounds() {
    assert_eq!(
        bounds(&Tile::new(0, 0)),
        LngLatBbox {
            west: -180.0,
            south: 89.0,
            east: -179.0,
            north: 90.0,
        }
    );
    assert_eq!(
        bounds(&Tile::new(359, 179)),
        LngLatBbox {
            west: 179.0,
            south: -90.0,
            east: 180.0,
            north: -89.0,
        }
    );
    let b = bounds(&Tile::new(186, 43));
    assert_eq!(b.width(), 1.0);
    assert_eq!(b.height(), 1.0);
}

#[test]
fn test_bounds_unclamped() {
    let tile = locate(f64::MAX, 0.0);
    assert_eq!(tile.x, i32::MAX);
    let b = bounds(&tile);
    assert_eq!(b.west, i32::MAX as f64 - 180.0);
    assert!(b.east >= b.west);
    assert_eq!(b.height(), 1.0);

    let tile = locate(f64::MIN, f64::MIN);
    assert_eq!((tile.x, tile.y), (i32::MIN, i32::MAX));
    let b = bounds(&tile);
    assert!(b.west.is_finite() && b.north.is_finite());
}

#[test]
fn test_locate_corners() {
    for tile in &[
        Tile::new(0, 0),
        Tile::new(5, 10),
        Tile::new(180, 90),
        Tile::new(359, 179),
    ] {
        let ul = upper_left(tile);
        assert_eq!(locate(ul.lng, ul.lat), *tile);
    }
}

#[test]
fn test_locate_interior() {
    // Longitudes inside a tile column stay in that column
    assert_eq!(locate(-174.5, 80.0).x, 5);
    assert_eq!(locate(-174.0001, 80.0).x, 5);
    // Latitudes inside a tile row resolve to the row below
    assert_eq!(locate(-174.5, 79.5), Tile::new(5, 11));
    assert_eq!(locate(0.5, -0.5), Tile::new(180, 91));
}

#[test]
fn test_truncate_lnglat() {
    assert_eq!(truncate_lnglat(-181.0, 91.0), (-180.0, 90.0));
    assert_eq!(truncate_lnglat(200.0, -95.5), (180.0, -90.0));
    assert_eq!(truncate_lnglat(10.5, 20.25), (10.5, 20.25));
}

#[test]
fn test_index() {
    assert_eq!(index(&Tile::new(0, 0)), 0);
    assert_eq!(index(&Tile::new(1, 0)), 1);
    assert_eq!(index(&Tile::new(0, 1)), 360);
    assert_eq!(index(&Tile::new(359, 179)), 64799);

    let mut seen = HashSet::new();
    for x in 0..360 {
        for y in 0..180 {
            assert!(seen.insert(index(&Tile::new(x, y))));
        }
    }
    assert_eq!(seen.len(), 360 * 180);
}

#[test]
fn test_name() {
    assert_eq!(name(&Tile::new(179, 0)), "-001_090");
    assert_eq!(name(&Tile::new(181, 0)), "001_090");
    assert_eq!(name(&Tile::new(0, 0)), "-180_090");
    assert_eq!(name(&Tile::new(180, 90)), "000_000");
    assert_eq!(name(&Tile::new(180, 100)), "000_-010");
    assert_eq!(name(&Tile::new(359, 179)), "179_-089");
}

#[test]
fn test_split_antimeridian() {
    assert_eq!(
        split_antimeridian(-10.0, -10.0, 10.0, 10.0),
        vec![LngLatBbox {
            west: -10.0,
            south: -10.0,
            east: 10.0,
            north: 10.0
        }]
    );
    assert_eq!(
        split_antimeridian(170.0, -10.0, -170.0, 10.0),
        vec![
            LngLatBbox {
                west: -180.0,
                south: -10.0,
                east: -170.0,
                north: 10.0
            },
            LngLatBbox {
                west: 170.0,
                south: -10.0,
                east: 180.0,
                north: 10.0
            }
        ]
    );
}

#[test]
fn test_tile_range() {
    let range = tile_range(&LngLatBbox {
        west: -10.0,
        south: -10.0,
        east: 10.0,
        north: 10.0,
    });
    assert_eq!(
        range,
        TileRange {
            minx: 170,
            miny: 80,
            maxx: 190,
            maxy: 100
        }
    );

    // clamped to the globe
    let range = tile_range(&LngLatBbox {
        west: -200.0,
        south: -100.0,
        east: -170.0,
        north: -80.0,
    });
    assert_eq!(
        range,
        TileRange {
            minx: 0,
            miny: 170,
            maxx: 10,
            maxy: 180
        }
    );
}

#[test]
fn test_tiles() {
    let cells = tiles(-10.0, -10.0, 10.0, 10.0).collect::<Vec<_>>();
    assert_eq!(cells.len(), 400);
    assert_eq!(cells[0], Tile::new(170, 80));
    assert_eq!(cells[1], Tile::new(170, 81));
    assert_eq!(cells[20], Tile::new(171, 80));
    assert_eq!(cells[399], Tile::new(189, 99));
    for tile in &cells {
        let b = bounds(tile);
        assert!(b.west >= -10.0 && b.east <= 10.0);
        assert!(b.south >= -10.0 && b.north <= 10.0);
    }

    // Re-enumerable by calling again
    assert_eq!(tiles(-10.0, -10.0, 10.0, 10.0).count(), 400);
}

#[test]
fn test_tiles_antimeridian() {
    let cells = tiles(170.0, -10.0, -170.0, 10.0).collect::<Vec<_>>();
    assert_eq!(cells.len(), 400);
    // western sub-box first
    assert_eq!(cells[0], Tile::new(0, 80));
    assert_eq!(cells[199], Tile::new(9, 99));
    // then the eastern one
    assert_eq!(cells[200], Tile::new(350, 80));
    assert_eq!(cells[399], Tile::new(359, 99));
}

#[test]
fn test_tiles_half_open() {
    // The box touches four tiles, only the one at the lower left edge is returned
    let cells = tiles(0.5, 0.5, 1.5, 1.5).collect::<Vec<_>>();
    assert_eq!(cells, vec![Tile::new(180, 89)]);

    let cells = tiles(5.0, 5.0, 5.0, 5.0).collect::<Vec<_>>();
    assert_eq!(cells, vec![]);
}

#[test]
fn test_tiles_globe() {
    let cells = tiles(-180.0, -90.0, 180.0, 90.0).collect::<Vec<_>>();
    assert_eq!(cells.len(), 360 * 180);
    assert_eq!(cells[0], Tile::new(0, 0));
    assert_eq!(cells[cells.len() - 1], Tile::new(359, 179));

    let cells = tiles(-190.0, -95.0, 190.0, 95.0).collect::<Vec<_>>();
    assert_eq!(cells.len(), 360 * 180);
}

#[test]
fn test_feature() {
    let feat = feature(&Tile::new(0, 0), None, None, None, None);
    assert_eq!(feat["type"], "Feature");
    assert_eq!(feat["id"], 0);
    assert_eq!(feat["bbox"], json!([-180.0, 89.0, -179.0, 90.0]));
    assert_eq!(feat["properties"]["title"], "XY tile (0, 0)");
    let ring = feat["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    assert_eq!(ring[0], json!([-180.0, 89.0]));
    assert_eq!(ring[2], json!([-179.0, 90.0]));
}

#[test]
fn test_feature_options() {
    let mut props = Map::new();
    props.insert("title".to_string(), json!("custom"));
    props.insert("layer".to_string(), json!(1));
    let feat = feature(&Tile::new(1, 0), Some("tile-1"), Some(&props), None, None);
    assert_eq!(feat["id"], "tile-1");
    assert_eq!(feat["properties"], json!({"title": "custom", "layer": 1}));

    // A negative buffer larger than half a tile inverts the edges
    let feat = feature(&Tile::new(0, 0), None, None, Some(-0.75), None);
    assert_eq!(feat["bbox"], json!([-179.75, 89.25, -179.25, 89.75]));
    let ring = feat["geometry"]["coordinates"][0].as_array().unwrap();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);

    let feat = feature(&Tile::new(0, 0), None, None, Some(0.123456), Some(2));
    assert_eq!(feat["bbox"], json!([-180.12, 88.88, -178.88, 90.12]));
}
