//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GDAL boundary of the optimizer: opening source rasters, solving target
//! transforms, warping, writing tile rasters and iterating their blocks.

#[macro_use]
extern crate log;

pub mod compression;
pub mod env;
pub mod pixel_type;
pub mod raster;
pub mod tile_raster;
pub mod transform;
pub mod warp;


pub use crate::compression::Compression;
pub use crate::env::{GdalEnv, WarningFilter};
pub use crate::pixel_type::PixelType;
pub use crate::raster::{RasterInfo, RasterSource};
pub use crate::tile_raster::{BlockWindow, BlockWindows, TileRaster, BLOCK_PIXELS};
pub use crate::transform::{calculate_default_transform, target_srs, GeoTransform};
pub use crate::warp::{Resampling, WarpedView};
