//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Layer descriptor read by the FLINT runtime

use crate::core::error::Result;
use flint_tile::TILE_SIZE;

/// Block width and height in degrees
pub const BLOCK_SIZE: f64 = 0.1;

#[derive(Serialize, PartialEq, Clone, Copy, Debug)]
pub enum LayerType {
    GridLayer,
    StackLayer,
}

#[derive(Serialize, PartialEq, Clone, Debug)]
pub struct LayerMetadata {
    pub layer_type: LayerType,
    pub layer_prefix: String,
    /// Pixel type name, e.g. `UInt8`
    pub layer_data: String,
    #[serde(rename = "tileLatSize")]
    pub tile_lat_size: f64,
    #[serde(rename = "tileLonSize")]
    pub tile_lon_size: f64,
    #[serde(rename = "blockLatSize")]
    pub block_lat_size: f64,
    #[serde(rename = "blockLonSize")]
    pub block_lon_size: f64,
    #[serde(rename = "cellLatSize")]
    pub cell_lat_size: f64,
    #[serde(rename = "cellLonSize")]
    pub cell_lon_size: f64,
    #[serde(rename = "coordinateSystem")]
    pub coordinate_system: Option<String>,
    /// west, south, east, north
    #[serde(rename = "cornerCoordinates")]
    pub corner_coordinates: [f64; 4],
    /// height, width
    pub size: [usize; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodata: Option<f64>,
    #[serde(rename = "nLayers", skip_serializing_if = "Option::is_none")]
    pub n_layers: Option<usize>,
}

impl LayerMetadata {
    /// Grid layer descriptor, or a stack layer descriptor when `n_layers` is given.
    /// `cell_size` and `size` are given as (x, y).
    pub fn new(
        layer_prefix: &str,
        layer_data: &str,
        cell_size: (f64, f64),
        coordinate_system: Option<String>,
        corner_coordinates: [f64; 4],
        size: (usize, usize),
        nodata: Option<f64>,
        n_layers: Option<usize>,
    ) -> LayerMetadata {
        let n_layers = n_layers.filter(|n| *n > 0);
        LayerMetadata {
            layer_type: if n_layers.is_some() {
                LayerType::StackLayer
            } else {
                LayerType::GridLayer
            },
            layer_prefix: layer_prefix.to_string(),
            layer_data: layer_data.to_string(),
            tile_lat_size: TILE_SIZE,
            tile_lon_size: TILE_SIZE,
            block_lat_size: BLOCK_SIZE,
            block_lon_size: BLOCK_SIZE,
            cell_lat_size: cell_size.1.abs(),
            cell_lon_size: cell_size.0.abs(),
            coordinate_system,
            corner_coordinates,
            size: [size.1, size.0],
            nodata,
            n_layers,
        }
    }

    /// JSON with sorted keys and two space indentation
    pub fn to_json(&self) -> Result<String> {
        // serde_json maps are ordered by key
        let value = serde_json::to_value(self)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
