//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::metadata::write_layer_info;
use crate::options::OptimizeOptions;
use crate::progress::progress_bar;
use crate::tile_job::{tile_jobs, TileJob};
use flint_core::core::{default_config, ApplicationCfg, Config, GdalCfg, OutputCfg};
use flint_core::output::OutputFolder;
use flint_core::Result;
use flint_gdal::transform::transform_bounds;
use flint_gdal::{
    calculate_default_transform, target_srs, with_pixel_type, Compression, GdalEnv, RasterSource,
    TileRaster, WarningFilter, WarpedView,
};
use gdal::raster::GdalType;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Target resolution and bounds of a source raster in the tile grid coordinate system
pub fn target_grid(src: &RasterSource) -> Result<((f64, f64), [f64; 4])> {
    let info = &src.info;
    let src_srs = src.spatial_ref()?;
    let dst_srs = target_srs()?;
    let (gt, _, _) =
        calculate_default_transform(&src_srs, &dst_srs, info.width, info.height, &info.bounds)?;
    let bounds = transform_bounds(&src_srs, &dst_srs, &info.bounds)?;
    Ok(((gt[1].abs(), gt[5].abs()), bounds))
}

/// Converts single band rasters into grid tile rasters and block files
pub struct TileRasterizer {
    pub gdal: GdalCfg,
    pub output: OutputCfg,
    pub options: OptimizeOptions,
}

impl<'a> Config<'a, ApplicationCfg> for TileRasterizer {
    fn from_config(config: &ApplicationCfg) -> Result<Self> {
        Ok(TileRasterizer {
            gdal: GdalCfg::from_config(config)?,
            output: OutputCfg::from_config(config)?,
            options: OptimizeOptions::default(),
        })
    }
    fn gen_config() -> String {
        default_config()
    }
}

impl TileRasterizer {
    pub fn with_options(mut self, options: OptimizeOptions) -> Self {
        self.options = options;
        self
    }
    /// Optimize all rasters into subfolders of `output_folder`.
    /// Returns the number of tiles written.
    pub fn optimize(&self, raster_files: &[PathBuf], output_folder: &Path) -> Result<u64> {
        if raster_files.is_empty() {
            if !self.options.quiet {
                println!("No files given");
            }
            return Ok(0);
        }
        let compression = self.options.compression.resolve()?;
        info!("Using {} compression", compression);
        let _env = GdalEnv::new(&self.gdal)?;

        // Check all inputs before writing anything
        let mut total_tiles = 0;
        for path in raster_files {
            let src = RasterSource::open(path)?;
            if src.info.band_count > 1 && !self.options.quiet {
                warn!(
                    "Raster file {} has more than one band. Only the first one will be used.",
                    path.display()
                );
            }
            let (res, bounds) = target_grid(&src)?;
            total_tiles += tile_jobs(&bounds, res).count() as u64;
        }

        let output_folder = OutputFolder::new(output_folder);
        output_folder.create()?;
        info!("{}", output_folder.info());

        let mut pb = progress_bar("Tile ", total_tiles, self.options.quiet);
        let mut tileno = 0;
        for path in raster_files {
            let src = RasterSource::open(path)?;
            let name = src.name();
            let folder = output_folder.subfolder(&name);
            folder.create()?;
            write_layer_info(&src.info, &name, &folder, None)?;

            let (res, bounds) = target_grid(&src)?;
            debug!("{}: target resolution {:?}, bounds {:?}", name, res, bounds);
            for job in tile_jobs(&bounds, res) {
                with_pixel_type!(
                    src.info.pixel_type,
                    process_tile,
                    &src,
                    &job,
                    &name,
                    &folder,
                    compression,
                    self
                )?;
                tileno += 1;
                if let Some(pb) = pb.as_mut() {
                    pb.inc();
                }
            }
        }
        if let Some(mut pb) = pb {
            pb.finish_print("");
        }
        Ok(tileno)
    }
}

/// Warp one tile, write its block file and its compressed tile raster
fn process_tile<T: GdalType + Copy + bytemuck::Pod>(
    src: &RasterSource,
    job: &TileJob,
    name: &str,
    folder: &OutputFolder,
    compression: Compression,
    rasterizer: &TileRasterizer,
) -> Result<()> {
    let options = &rasterizer.options;
    let blk_file = format!("{}_{}.blk", name, flint_tile::name(&job.tile));
    folder.check_conflict(&blk_file, options.overwrite)?;
    debug!("Tile {} -> {}", job.tile, blk_file);

    let _filter = WarningFilter::new();
    let view = WarpedView::new::<T>(
        src,
        &job.padded_transform,
        job.padded_width,
        job.padded_height,
        options.resampling,
    )?;
    let in_memory = options.in_memory(job.padded_pixels(), rasterizer.output.in_memory_threshold);
    let mut raster = TileRaster::create::<T>(
        job.width,
        job.height,
        &job.transform,
        src.info.nodata,
        in_memory,
        &folder.basepath,
    )?;

    let mut blocks = folder.create_file(&blk_file, options.overwrite)?;
    let (col_pad, row_pad) = job.window_offset();
    for window in raster.block_windows()? {
        let mut buffer = view.read::<T>(
            (window.col_off + col_pad, window.row_off + row_pad),
            (window.width, window.height),
        )?;
        blocks.write_all(bytemuck::cast_slice(buffer.data()))?;
        raster.write(&window, &mut buffer)?;
    }
    blocks.flush()?;

    raster.build_overviews(options.resampling)?;
    let tif_file = format!("{}_{}.tif", name, flint_tile::index(&job.tile));
    raster.copy_to(&folder.path(&tif_file), compression, &rasterizer.output)?;
    Ok(())
}
