//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::metadata::write_layer_info;
use crate::optimize_rasters::target_grid;
use crate::options::OptimizeOptions;
use crate::progress::progress_bar;
use crate::tile_job::{tile_jobs, TileJob};
use flint_core::core::layer_info::BLOCK_SIZE;
use flint_core::core::{default_config, ApplicationCfg, Config, GdalCfg, OutputCfg};
use flint_core::output::OutputFolder;
use flint_core::Result;
use flint_gdal::{with_pixel_type, GdalEnv, RasterSource, WarningFilter, WarpedView};
use gdal::raster::GdalType;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Block size in pixels for a target resolution
pub fn block_size(res: (f64, f64)) -> (usize, usize) {
    (
        ((BLOCK_SIZE / res.0) as usize).max(1),
        ((BLOCK_SIZE / res.1) as usize).max(1),
    )
}

/// Arrange the layers of a tile into the block stream layout.
///
/// Blocks are ordered row-major and clipped at the right and bottom edges.
/// Within a block, cells are row-major and every cell holds the values of
/// all layers in stack order.
pub fn interleave_blocks<T: Copy>(
    layers: &[Vec<T>],
    width: usize,
    height: usize,
    block: (usize, usize),
) -> Vec<T> {
    let mut out = Vec::with_capacity(width * height * layers.len());
    for block_row in (0..height).step_by(block.1) {
        for block_col in (0..width).step_by(block.0) {
            for row in block_row..(block_row + block.1).min(height) {
                for col in block_col..(block_col + block.0).min(width) {
                    let idx = row * width + col;
                    out.extend(layers.iter().map(|layer| layer[idx]));
                }
            }
        }
    }
    out
}

/// Converts a stack of co-registered rasters into multi-layer block files
pub struct StackRasterizer {
    pub gdal: GdalCfg,
    pub output: OutputCfg,
    pub options: OptimizeOptions,
}

impl<'a> Config<'a, ApplicationCfg> for StackRasterizer {
    fn from_config(config: &ApplicationCfg) -> Result<Self> {
        Ok(StackRasterizer {
            gdal: GdalCfg::from_config(config)?,
            output: OutputCfg::from_config(config)?,
            options: OptimizeOptions::default(),
        })
    }
    fn gen_config() -> String {
        default_config()
    }
}

impl StackRasterizer {
    pub fn with_options(mut self, options: OptimizeOptions) -> Self {
        self.options = options;
        self
    }
    /// Write the block files of stack `name` into `<output_folder>/<name>/`.
    /// The first raster is the reference for coordinate system, bounds and resolution.
    /// Returns the number of tiles written.
    pub fn optimize(
        &self,
        raster_files: &[PathBuf],
        name: &str,
        output_folder: &Path,
    ) -> Result<u64> {
        if raster_files.is_empty() {
            if !self.options.quiet {
                println!("No files given");
            }
            return Ok(0);
        }
        let _env = GdalEnv::new(&self.gdal)?;
        let layers = raster_files
            .iter()
            .map(RasterSource::open)
            .collect::<Result<Vec<_>>>()?;
        for layer in &layers {
            if layer.info.band_count > 1 && !self.options.quiet {
                warn!(
                    "Raster file {} has more than one band. Only the first one will be used.",
                    layer.path.display()
                );
            }
        }
        let reference = &layers[0];

        let output_folder = OutputFolder::new(output_folder);
        let folder = output_folder.subfolder(name);
        folder.create()?;
        write_layer_info(&reference.info, name, &folder, Some(layers.len()))?;

        let (res, bounds) = target_grid(reference)?;
        let block = block_size(res);
        debug!(
            "{}: {} layers, target resolution {:?}, block size {:?}",
            name,
            layers.len(),
            res,
            block
        );
        let total_tiles = tile_jobs(&bounds, res).count() as u64;
        let mut pb = progress_bar("Tile ", total_tiles, self.options.quiet);
        let mut tileno = 0;
        for job in tile_jobs(&bounds, res) {
            with_pixel_type!(
                reference.info.pixel_type,
                process_stack_tile,
                &layers,
                &job,
                block,
                name,
                &folder,
                &self.options
            )?;
            tileno += 1;
            if let Some(pb) = pb.as_mut() {
                pb.inc();
            }
        }
        if let Some(mut pb) = pb {
            pb.finish_print("");
        }
        Ok(tileno)
    }
}

/// Warp every layer of one tile and write the interleaved block file
fn process_stack_tile<T: GdalType + Copy + bytemuck::Pod>(
    layers: &[RasterSource],
    job: &TileJob,
    block: (usize, usize),
    name: &str,
    folder: &OutputFolder,
    options: &OptimizeOptions,
) -> Result<()> {
    let blk_file = format!("{}_{}.blk", name, flint_tile::name(&job.tile));
    folder.check_conflict(&blk_file, options.overwrite)?;
    debug!("Tile {} -> {}", job.tile, blk_file);

    let _filter = WarningFilter::new();
    let mut tile_layers = Vec::with_capacity(layers.len());
    for layer in layers {
        let view = WarpedView::new::<T>(
            layer,
            &job.padded_transform,
            job.padded_width,
            job.padded_height,
            options.resampling,
        )?;
        let data = view.read::<T>(job.window_offset(), (job.width, job.height))?;
        tile_layers.push(data.data().to_vec());
    }
    let stack = interleave_blocks(&tile_layers, job.width, job.height, block);

    let mut blocks = folder.create_file(&blk_file, options.overwrite)?;
    blocks.write_all(bytemuck::cast_slice(&stack))?;
    blocks.flush()?;
    Ok(())
}
