//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_gdal::{Compression, Resampling};

/// Run options given on the command line
#[derive(Clone, Debug, Default)]
pub struct OptimizeOptions {
    /// Replace existing block files
    pub overwrite: bool,
    pub resampling: Resampling,
    pub compression: Compression,
    /// Force destination rasters into memory (`Some(true)`) or temporary files
    /// (`Some(false)`). By default the pixel count decides.
    pub in_memory: Option<bool>,
    /// No progress output
    pub quiet: bool,
}

impl OptimizeOptions {
    pub fn in_memory(&self, pixels: usize, threshold: u64) -> bool {
        self.in_memory.unwrap_or((pixels as u64) < threshold)
    }
}
