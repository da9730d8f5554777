//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::pixel_type::PixelType;
use crate::transform::{self, GeoTransform};
use flint_core::{Error, LayerMetadata, Result};
use gdal::spatial_ref::SpatialRef;
use gdal::Dataset;
use std::path::{Path, PathBuf};

/// Properties of a source raster
#[derive(Clone, Debug, PartialEq)]
pub struct RasterInfo {
    pub pixel_type: PixelType,
    pub width: usize,
    pub height: usize,
    pub geo_transform: GeoTransform,
    /// west, south, east, north
    pub bounds: [f64; 4],
    /// `EPSG:<code>` or a PROJ string
    pub crs: Option<String>,
    pub band_count: usize,
    /// Nodata value of band 1
    pub nodata: Option<f64>,
}

impl RasterInfo {
    /// Absolute pixel width and height
    pub fn res(&self) -> (f64, f64) {
        (self.geo_transform[1].abs(), self.geo_transform[5].abs())
    }
    /// Layer descriptor of this raster, a stack descriptor when `n_layers` is given
    pub fn layer_metadata(&self, name: &str, n_layers: Option<usize>) -> LayerMetadata {
        LayerMetadata::new(
            name,
            self.pixel_type.name(),
            (self.geo_transform[1], self.geo_transform[5]),
            self.crs.clone(),
            self.bounds,
            (self.width, self.height),
            self.nodata,
            n_layers,
        )
    }
}

/// Bounds (west, south, east, north) covered by a raster
pub fn raster_bounds(gt: &GeoTransform, width: usize, height: usize) -> [f64; 4] {
    let (x0, y0) = transform::apply(gt, 0.0, 0.0);
    let (x1, y1) = transform::apply(gt, width as f64, height as f64);
    [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)]
}

/// Opened source raster
pub struct RasterSource {
    pub path: PathBuf,
    pub dataset: Dataset,
    pub info: RasterInfo,
}

impl RasterSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<RasterSource> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(Error::input(&path, "not a file"));
        }
        let dataset = Dataset::open(&path).map_err(|e| Error::input(&path, e))?;
        let info = Self::read_info(&dataset).map_err(|e| Error::input(&path, e))?;
        debug!("Opened {}: {:?}", path.display(), info);
        Ok(RasterSource {
            path,
            dataset,
            info,
        })
    }
    fn read_info(dataset: &Dataset) -> Result<RasterInfo> {
        let (width, height) = dataset.raster_size();
        let geo_transform = dataset.geo_transform()?;
        let band_count = dataset.raster_count();
        let band = dataset.rasterband(1)?;
        let pixel_type = PixelType::from_gdal(band.band_type())?;
        let crs = match dataset.spatial_ref() {
            Ok(srs) => crs_name(srs),
            Err(_) => None,
        };
        Ok(RasterInfo {
            pixel_type,
            width,
            height,
            geo_transform,
            bounds: raster_bounds(&geo_transform, width, height),
            crs,
            band_count,
            nodata: band.no_data_value(),
        })
    }
    /// Name of the raster file without extension
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }
    /// Coordinate system of the raster, the tile grid system if it has none
    pub fn spatial_ref(&self) -> Result<SpatialRef> {
        match self.dataset.spatial_ref() {
            Ok(srs) => Ok(srs),
            Err(_) => transform::target_srs(),
        }
    }
}

fn crs_name(mut srs: SpatialRef) -> Option<String> {
    let _ = srs.auto_identify_epsg();
    match (srs.auth_name(), srs.auth_code()) {
        (Ok(name), Ok(code)) if name == "EPSG" => Some(format!("EPSG:{}", code)),
        _ => srs.to_proj4().ok().map(|s| s.trim().to_string()),
    }
}
