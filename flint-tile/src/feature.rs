//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::tile::{bounds, index, Tile};
use serde_json::{json, Map, Value};

fn round_to(value: f64, precision: i32) -> f64 {
    let factor = 10f64.powi(precision);
    (value * factor).round() / factor
}

/// GeoJSON feature covering a tile
///
/// * `fid` - feature id replacing the tile index
/// * `props` - extra properties, merged over the default `title`
/// * `buffer` - buffer distance in degrees
/// * `precision` - number of decimal places of the coordinates
pub fn feature(
    tile: &Tile,
    fid: Option<&str>,
    props: Option<&Map<String, Value>>,
    buffer: Option<f64>,
    precision: Option<i32>,
) -> Value {
    let b = bounds(tile);
    let (mut west, mut south, mut east, mut north) = (b.west, b.south, b.east, b.north);
    if let Some(buffer) = buffer {
        west -= buffer;
        south -= buffer;
        east += buffer;
        north += buffer;
    }
    if let Some(precision) = precision.filter(|p| *p >= 0) {
        west = round_to(west, precision);
        south = round_to(south, precision);
        east = round_to(east, precision);
        north = round_to(north, precision);
    }
    let bbox = [
        west.min(east),
        south.min(north),
        west.max(east),
        south.max(north),
    ];

    let mut properties = Map::new();
    properties.insert("title".to_string(), json!(format!("XY tile {}", tile)));
    if let Some(props) = props {
        for (key, value) in props {
            properties.insert(key.clone(), value.clone());
        }
    }
    let id = match fid {
        Some(fid) => json!(fid),
        None => json!(index(tile)),
    };

    json!({
        "type": "Feature",
        "bbox": bbox,
        "id": id,
        "geometry": {
            "type": "Polygon",
            "coordinates": [[
                [west, south],
                [west, north],
                [east, north],
                [east, south],
                [west, south]
            ]]
        },
        "properties": properties
    })
}
