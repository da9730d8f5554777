//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;

pub mod metadata;
pub mod optimize_rasters;
pub mod optimize_rasterstack;
pub mod options;
pub mod pattern;
mod progress;
pub mod tile_job;


pub use crate::metadata::write_layer_info;
pub use crate::optimize_rasters::TileRasterizer;
pub use crate::optimize_rasterstack::StackRasterizer;
pub use crate::options::OptimizeOptions;
pub use crate::pattern::{expand_inputs, RasterPattern};
pub use crate::tile_job::{tile_jobs, TileJob, PAD_PIXELS};
