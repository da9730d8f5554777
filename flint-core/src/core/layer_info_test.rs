//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::layer_info::{LayerMetadata, LayerType};

fn grid_layer() -> LayerMetadata {
    LayerMetadata::new(
        "forest",
        "UInt8",
        (0.00025, -0.00025),
        Some("EPSG:4326".to_string()),
        [10.0, 45.0, 11.0, 46.0],
        (4000, 4000),
        Some(255.0),
        None,
    )
}

#[test]
fn test_grid_layer() {
    let info = grid_layer();
    assert_eq!(info.layer_type, LayerType::GridLayer);
    assert_eq!(info.cell_lat_size, 0.00025);
    assert_eq!(info.cell_lon_size, 0.00025);
    assert_eq!(info.tile_lat_size, 1.0);
    assert_eq!(info.block_lon_size, 0.1);
    assert_eq!(info.n_layers, None);
}

#[test]
fn test_stack_layer() {
    let info = LayerMetadata::new(
        "cover",
        "Int16",
        (0.5, -0.25),
        None,
        [0.0, 0.0, 2.0, 1.0],
        (4, 3),
        None,
        Some(3),
    );
    assert_eq!(info.layer_type, LayerType::StackLayer);
    assert_eq!(info.size, [3, 4]);
    assert_eq!(info.n_layers, Some(3));

    let info = LayerMetadata::new(
        "cover",
        "Int16",
        (0.5, -0.25),
        None,
        [0.0, 0.0, 2.0, 1.0],
        (4, 3),
        None,
        Some(0),
    );
    assert_eq!(info.layer_type, LayerType::GridLayer);
}

#[test]
fn test_json() {
    let json = grid_layer().to_json().unwrap();
    let expected = r#"{
  "blockLatSize": 0.1,
  "blockLonSize": 0.1,
  "cellLatSize": 0.00025,
  "cellLonSize": 0.00025,
  "coordinateSystem": "EPSG:4326",
  "cornerCoordinates": [
    10.0,
    45.0,
    11.0,
    46.0
  ],
  "layer_data": "UInt8",
  "layer_prefix": "forest",
  "layer_type": "GridLayer",
  "nodata": 255.0,
  "size": [
    4000,
    4000
  ],
  "tileLatSize": 1.0,
  "tileLonSize": 1.0
}"#;
    assert_eq!(json, expected);

    let mut stack = grid_layer();
    stack.nodata = None;
    stack.n_layers = Some(3);
    stack.layer_type = LayerType::StackLayer;
    let value: serde_json::Value = serde_json::from_str(&stack.to_json().unwrap()).unwrap();
    assert_eq!(value["layer_type"], "StackLayer");
    assert_eq!(value["nLayers"], 3);
    assert!(value.get("nodata").is_none());
}
