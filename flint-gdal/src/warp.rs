//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::raster::RasterSource;
use crate::transform::{target_srs, GeoTransform};
use flint_core::{Error, Result};
use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use gdal_sys::{CPLErr, GDALResampleAlg};
use std::ffi::CStr;
use std::os::raw::{c_double, c_int};
use std::ptr;
use std::str::FromStr;

/// Pixel value estimation used for warping and overviews
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Resampling {
    Nearest,
    Bilinear,
    Cubic,
    Average,
}

impl Resampling {
    pub const NAMES: [&'static str; 4] = ["nearest", "bilinear", "cubic", "average"];

    pub fn name(&self) -> &'static str {
        match self {
            Resampling::Nearest => "nearest",
            Resampling::Bilinear => "bilinear",
            Resampling::Cubic => "cubic",
            Resampling::Average => "average",
        }
    }
    fn to_gdal(&self) -> GDALResampleAlg::Type {
        match self {
            Resampling::Nearest => GDALResampleAlg::GRA_NearestNeighbour,
            Resampling::Bilinear => GDALResampleAlg::GRA_Bilinear,
            Resampling::Cubic => GDALResampleAlg::GRA_Cubic,
            Resampling::Average => GDALResampleAlg::GRA_Average,
        }
    }
    /// Resampling name of GDALBuildOverviews
    pub fn overview_name(&self) -> &'static str {
        match self {
            Resampling::Nearest => "NEAREST",
            Resampling::Bilinear => "BILINEAR",
            Resampling::Cubic => "CUBIC",
            Resampling::Average => "AVERAGE",
        }
    }
}

impl Default for Resampling {
    fn default() -> Self {
        Resampling::Nearest
    }
}

impl FromStr for Resampling {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(Resampling::Nearest),
            "bilinear" => Ok(Resampling::Bilinear),
            "cubic" => Ok(Resampling::Cubic),
            "average" => Ok(Resampling::Average),
            _ => Err(format!("Unknown resampling method '{}'", s)),
        }
    }
}

/// Band 1 of a source raster warped into the tile grid coordinate system.
///
/// The pixels live in a MEM dataset with the requested transform and size,
/// areas without source data are set to the source nodata value (or 0).
pub struct WarpedView {
    dataset: Dataset,
    pub width: usize,
    pub height: usize,
}

impl WarpedView {
    pub fn new<T: GdalType + Copy>(
        src: &RasterSource,
        transform: &GeoTransform,
        width: usize,
        height: usize,
        resampling: Resampling,
    ) -> Result<WarpedView> {
        let driver = DriverManager::get_driver_by_name("MEM")?;
        let mut dataset = driver.create_with_band_type::<T, _>("", width, height, 1)?;
        dataset.set_geo_transform(transform)?;
        dataset.set_spatial_ref(&target_srs()?)?;
        let nodata = src.info.nodata;
        {
            let mut band = dataset.rasterband(1)?;
            if nodata.is_some() {
                band.set_no_data_value(nodata)?;
            }
            band.fill(nodata.unwrap_or(0.0), None)?;
        }
        reproject_band1(&src.dataset, &dataset, resampling, nodata)?;
        Ok(WarpedView {
            dataset,
            width,
            height,
        })
    }
    /// Read a pixel window as row-major samples
    pub fn read<T: GdalType + Copy>(
        &self,
        offset: (usize, usize),
        size: (usize, usize),
    ) -> Result<Buffer<T>> {
        let band = self.dataset.rasterband(1)?;
        let buffer = band.read_as::<T>(
            (offset.0 as isize, offset.1 as isize),
            size,
            size,
            None,
        )?;
        Ok(buffer)
    }
}

/// Warp band 1 of `src` into band 1 of `dst` using the georeferencing of both datasets
fn reproject_band1(
    src: &Dataset,
    dst: &Dataset,
    resampling: Resampling,
    nodata: Option<f64>,
) -> Result<()> {
    let rv = unsafe {
        let options = gdal_sys::GDALCreateWarpOptions();
        (*options).nBandCount = 1;
        (*options).panSrcBands = gdal_sys::CPLMalloc(std::mem::size_of::<c_int>()).cast::<c_int>();
        (*options).panSrcBands.write(1);
        (*options).panDstBands = gdal_sys::CPLMalloc(std::mem::size_of::<c_int>()).cast::<c_int>();
        (*options).panDstBands.write(1);
        if let Some(nodata) = nodata {
            // freed by GDALDestroyWarpOptions
            (*options).padfSrcNoDataReal =
                gdal_sys::CPLMalloc(std::mem::size_of::<c_double>()).cast::<c_double>();
            (*options).padfSrcNoDataReal.write(nodata);
            (*options).padfDstNoDataReal =
                gdal_sys::CPLMalloc(std::mem::size_of::<c_double>()).cast::<c_double>();
            (*options).padfDstNoDataReal.write(nodata);
        }
        gdal_sys::CPLErrorReset();
        let rv = gdal_sys::GDALReprojectImage(
            src.c_dataset(),
            ptr::null(),
            dst.c_dataset(),
            ptr::null(),
            resampling.to_gdal(),
            0.0,
            0.125,
            None,
            ptr::null_mut(),
            options,
        );
        gdal_sys::GDALDestroyWarpOptions(options);
        rv
    };
    if rv != CPLErr::CE_None {
        return Err(Error::Warp(last_error_msg()));
    }
    Ok(())
}

fn last_error_msg() -> String {
    unsafe {
        let msg = gdal_sys::CPLGetLastErrorMsg();
        if msg.is_null() {
            "unknown GDAL error".to_string()
        } else {
            CStr::from_ptr(msg).to_string_lossy().into_owned()
        }
    }
}
