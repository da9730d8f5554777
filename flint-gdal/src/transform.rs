//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_core::{Error, Result};
use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

/// GDAL affine geotransform
/// `[x origin, pixel width, row rotation, y origin, column rotation, pixel height]`
pub type GeoTransform = [f64; 6];

/// EPSG code of the tile grid
pub const TARGET_EPSG: u32 = 4326;

/// Densification points for bounds reprojection
const DENSIFY_PTS: i32 = 21;

/// Tile grid coordinate system with lon/lat axis order
pub fn target_srs() -> Result<SpatialRef> {
    let mut srs = SpatialRef::from_epsg(TARGET_EPSG)?;
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    Ok(srs)
}

/// North-up transform mapping `width` x `height` pixels onto the given bounds
pub fn from_bounds(
    west: f64,
    south: f64,
    east: f64,
    north: f64,
    width: usize,
    height: usize,
) -> GeoTransform {
    [
        west,
        (east - west) / width as f64,
        0.0,
        north,
        0.0,
        (south - north) / height as f64,
    ]
}

/// Move the origin of a transform by a number of pixel columns and rows
pub fn translate(gt: &GeoTransform, cols: f64, rows: f64) -> GeoTransform {
    [
        gt[0] + cols * gt[1] + rows * gt[2],
        gt[1],
        gt[2],
        gt[3] + cols * gt[4] + rows * gt[5],
        gt[4],
        gt[5],
    ]
}

/// Apply a transform to pixel coordinates
pub fn apply(gt: &GeoTransform, col: f64, row: f64) -> (f64, f64) {
    (
        gt[0] + col * gt[1] + row * gt[2],
        gt[3] + col * gt[4] + row * gt[5],
    )
}

/// Projected image corners in the order south-west, north-west, south-east, north-east
pub type Corners = [(f64, f64); 4];

/// Longitude extent from `west` to `east`, wrapping the antimeridian when `east < west`
pub fn lon_span(west: f64, east: f64) -> f64 {
    if east < west {
        east + 360.0 - west
    } else {
        east - west
    }
}

/// Target transform from already projected corners and bounds.
///
/// The resolution is taken from the inner box of the projected corners at
/// `width` x `height` pixels and then applied to the full projected bounds.
/// Boxes with `west > east` cross the antimeridian; the returned transform
/// then starts at `west` and extends eastwards past 180°.
pub fn solve_from_corners(
    corners: &Corners,
    dst_bounds: &[f64; 4],
    width: usize,
    height: usize,
) -> (GeoTransform, usize, usize) {
    let [sw, nw, se, ne] = *corners;
    let inner = [
        sw.0.max(nw.0),
        sw.1.max(se.1),
        se.0.min(ne.0),
        nw.1.min(ne.1),
    ];
    let inner_transform = from_bounds(
        inner[0],
        inner[1],
        inner[0] + lon_span(inner[0], inner[2]),
        inner[3],
        width,
        height,
    );
    let res = (inner_transform[1], inner_transform[5]);

    let dst_span = lon_span(dst_bounds[0], dst_bounds[2]);
    let dst_width = (dst_span / res.0).ceil().max(1.0) as usize;
    let dst_height = ((dst_bounds[1] - dst_bounds[3]) / res.1).ceil().max(1.0) as usize;
    let transform = from_bounds(
        dst_bounds[0],
        dst_bounds[1],
        dst_bounds[0] + dst_span,
        dst_bounds[3],
        dst_width,
        dst_height,
    );
    (transform, dst_width, dst_height)
}

fn traditional_order(srs: &SpatialRef) -> SpatialRef {
    let mut srs = srs.clone();
    srs.set_axis_mapping_strategy(AxisMappingStrategy::TraditionalGisOrder);
    srs
}

/// Reproject bounds (west, south, east, north) including densified edge points
pub fn transform_bounds(
    src_srs: &SpatialRef,
    dst_srs: &SpatialRef,
    bounds: &[f64; 4],
) -> Result<[f64; 4]> {
    let transform = CoordTransform::new(&traditional_order(src_srs), &traditional_order(dst_srs))?;
    Ok(transform.transform_bounds(bounds, DENSIFY_PTS)?)
}

/// A more stable version of GDAL's default transform.
///
/// Keeps the number of pixels along the image's shortest diagonal in both
/// coordinate systems without enforcing square pixels.
/// `bounds` are west, south, east, north in the source coordinate system.
pub fn calculate_default_transform(
    src_srs: &SpatialRef,
    dst_srs: &SpatialRef,
    width: usize,
    height: usize,
    bounds: &[f64],
) -> Result<(GeoTransform, usize, usize)> {
    if bounds.len() != 4 {
        return Err(Error::InvalidBounds(bounds.len()));
    }
    let transform = CoordTransform::new(&traditional_order(src_srs), &traditional_order(dst_srs))?;

    let mut xs = [bounds[0], bounds[0], bounds[2], bounds[2]];
    let mut ys = [bounds[1], bounds[3], bounds[1], bounds[3]];
    transform.transform_coords(&mut xs, &mut ys, &mut [])?;
    let corners = [
        (xs[0], ys[0]),
        (xs[1], ys[1]),
        (xs[2], ys[2]),
        (xs[3], ys[3]),
    ];

    let dst_bounds =
        transform.transform_bounds(&[bounds[0], bounds[1], bounds[2], bounds[3]], DENSIFY_PTS)?;
    debug!(
        "projected corners {:?}, projected bounds {:?}",
        corners, dst_bounds
    );
    Ok(solve_from_corners(&corners, &dst_bounds, width, height))
}
