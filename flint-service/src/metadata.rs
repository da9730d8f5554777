//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_core::output::OutputFolder;
use flint_core::Result;
use flint_gdal::RasterInfo;
use std::path::PathBuf;

/// Write the layer descriptor `<name>.json` into `folder`.
/// Stack descriptors carry the number of layers.
pub fn write_layer_info(
    info: &RasterInfo,
    name: &str,
    folder: &OutputFolder,
    n_layers: Option<usize>,
) -> Result<PathBuf> {
    let metadata = info.layer_metadata(name, n_layers);
    let json = metadata.to_json()?;
    let file = format!("{}.json", name);
    folder.write(&file, json.as_bytes(), true)?;
    info!("Layer info written to {}", folder.path(&file).display());
    Ok(folder.path(&file))
}
