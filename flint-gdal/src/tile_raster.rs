//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::compression::Compression;
use crate::transform::{target_srs, GeoTransform};
use crate::warp::Resampling;
use flint_core::core::OutputCfg;
use flint_core::Result;
use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempPath;

/// Width and height of internal raster blocks
pub const BLOCK_PIXELS: usize = 400;

static MEM_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Storage of a destination raster, removed on drop
enum Backing {
    /// Path in GDAL's /vsimem/ file system
    Memory(String),
    /// Scoped temporary file
    TempFile(TempPath),
}

impl Drop for Backing {
    fn drop(&mut self) {
        if let Backing::Memory(path) = self {
            if let Err(e) = gdal::vsi::unlink_mem_file(path.as_str()) {
                warn!("Couldn't remove {}: {}", path, e);
            }
        }
    }
}

/// Single band tiled GeoTIFF receiving the warped pixels of one tile
pub struct TileRaster {
    // Dropped before the backing storage
    dataset: Dataset,
    backing: Backing,
    pub width: usize,
    pub height: usize,
}

fn tile_options() -> Result<CslStringList> {
    let mut options = CslStringList::new();
    options.set_name_value("TILED", "YES")?;
    options.set_name_value("BLOCKXSIZE", &BLOCK_PIXELS.to_string())?;
    options.set_name_value("BLOCKYSIZE", &BLOCK_PIXELS.to_string())?;
    options.set_name_value("INTERLEAVE", "PIXEL")?;
    options.set_name_value("BIGTIFF", "IF_SAFER")?;
    Ok(options)
}

impl TileRaster {
    /// Create the raster in memory or as temporary file in `tempdir`
    pub fn create<T: GdalType + Copy>(
        width: usize,
        height: usize,
        transform: &GeoTransform,
        nodata: Option<f64>,
        in_memory: bool,
        tempdir: &Path,
    ) -> Result<TileRaster> {
        let backing = if in_memory {
            let n = MEM_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
            Backing::Memory(format!("/vsimem/flint_tile_{}_{}.tif", std::process::id(), n))
        } else {
            let file = tempfile::Builder::new()
                .prefix("flint_tile_")
                .suffix(".tif")
                .tempfile_in(tempdir)?;
            Backing::TempFile(file.into_temp_path())
        };
        let path = match &backing {
            Backing::Memory(path) => path.clone(),
            Backing::TempFile(path) => path.to_string_lossy().to_string(),
        };
        debug!("Creating tile raster {} ({}x{})", path, width, height);
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let mut dataset = driver.create_with_band_type_with_options::<T, _>(
            &path,
            width,
            height,
            1,
            &tile_options()?,
        )?;
        dataset.set_geo_transform(transform)?;
        dataset.set_spatial_ref(&target_srs()?)?;
        if nodata.is_some() {
            dataset.rasterband(1)?.set_no_data_value(nodata)?;
        }
        Ok(TileRaster {
            dataset,
            backing,
            width,
            height,
        })
    }
    pub fn is_in_memory(&self) -> bool {
        matches!(self.backing, Backing::Memory(_))
    }
    /// Internal block windows in row-major order
    pub fn block_windows(&self) -> Result<BlockWindows> {
        let (bx, by) = self.dataset.rasterband(1)?.block_size();
        Ok(BlockWindows::new(self.width, self.height, bx, by))
    }
    pub fn write<T: GdalType + Copy>(
        &mut self,
        window: &BlockWindow,
        buffer: &mut Buffer<T>,
    ) -> Result<()> {
        let mut band = self.dataset.rasterband(1)?;
        band.write(
            (window.col_off as isize, window.row_off as isize),
            (window.width, window.height),
            buffer,
        )?;
        Ok(())
    }
    /// Build power-of-two overviews down to the block size
    pub fn build_overviews(&mut self, resampling: Resampling) -> Result<()> {
        let levels = overview_levels(self.width, self.height);
        if levels.is_empty() {
            return Ok(());
        }
        debug!("Building overviews {:?}", levels);
        self.dataset
            .build_overviews(resampling.overview_name(), &levels, &[])?;
        Ok(())
    }
    /// Write a compressed copy carrying the overviews.
    /// The copy reads through the block cache of the open dataset.
    pub fn copy_to(&mut self, path: &Path, compression: Compression, cfg: &OutputCfg) -> Result<()> {
        let mut options = tile_options()?;
        options.set_name_value("COMPRESS", compression.creation_option())?;
        match compression {
            Compression::Deflate => {
                options.set_name_value("ZLEVEL", &cfg.zlevel.to_string())?;
            }
            Compression::Zstd => {
                options.set_name_value("ZSTD_LEVEL", &cfg.zstd_level.to_string())?;
            }
            _ => {}
        }
        options.set_name_value("COPY_SRC_OVERVIEWS", "YES")?;
        let driver = DriverManager::get_driver_by_name("GTiff")?;
        let _copy = self.dataset.create_copy(&driver, path, &options)?;
        Ok(())
    }
}

/// Overview factors while the reduced raster keeps at least one full block
pub fn overview_levels(width: usize, height: usize) -> Vec<i32> {
    let mut levels = Vec::new();
    let mut factor = 2;
    while width.min(height) / factor >= BLOCK_PIXELS {
        levels.push(factor as i32);
        factor *= 2;
    }
    levels
}

/// Pixel window of a raster block
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct BlockWindow {
    pub col_off: usize,
    pub row_off: usize,
    pub width: usize,
    pub height: usize,
}

/// Row-major iterator over the blocks of a raster, clipped at its right and bottom edges
pub struct BlockWindows {
    width: usize,
    height: usize,
    block_width: usize,
    block_height: usize,
    col: usize,
    row: usize,
}

impl BlockWindows {
    pub fn new(width: usize, height: usize, block_width: usize, block_height: usize) -> Self {
        BlockWindows {
            width,
            height,
            block_width: block_width.max(1),
            block_height: block_height.max(1),
            col: 0,
            row: 0,
        }
    }
}

impl Iterator for BlockWindows {
    type Item = BlockWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.width == 0 || self.row >= self.height {
            return None;
        }
        let window = BlockWindow {
            col_off: self.col,
            row_off: self.row,
            width: self.block_width.min(self.width - self.col),
            height: self.block_height.min(self.height - self.row),
        };
        self.col += self.block_width;
        if self.col >= self.width {
            self.col = 0;
            self.row += self.block_height;
        }
        Some(window)
    }
}
