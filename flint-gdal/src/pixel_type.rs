//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_core::{Error, Result};
use gdal::raster::GdalDataType;
use std::fmt;

/// Sample types supported in block files
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PixelType {
    UInt8,
    UInt16,
    UInt32,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl PixelType {
    pub fn from_gdal(data_type: GdalDataType) -> Result<PixelType> {
        match data_type {
            GdalDataType::UInt8 => Ok(PixelType::UInt8),
            GdalDataType::UInt16 => Ok(PixelType::UInt16),
            GdalDataType::UInt32 => Ok(PixelType::UInt32),
            GdalDataType::Int16 => Ok(PixelType::Int16),
            GdalDataType::Int32 => Ok(PixelType::Int32),
            GdalDataType::Float32 => Ok(PixelType::Float32),
            GdalDataType::Float64 => Ok(PixelType::Float64),
            other => Err(Error::UnsupportedDataType(other.name())),
        }
    }
    /// Name used in layer descriptors
    pub fn name(&self) -> &'static str {
        match self {
            PixelType::UInt8 => "UInt8",
            PixelType::UInt16 => "UInt16",
            PixelType::UInt32 => "UInt32",
            PixelType::Int16 => "Int16",
            PixelType::Int32 => "Int32",
            PixelType::Float32 => "Float32",
            PixelType::Float64 => "Float64",
        }
    }
    /// Bytes per sample
    pub fn size(&self) -> usize {
        match self {
            PixelType::UInt8 => 1,
            PixelType::UInt16 | PixelType::Int16 => 2,
            PixelType::UInt32 | PixelType::Int32 | PixelType::Float32 => 4,
            PixelType::Float64 => 8,
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Call a function generic over the sample type with the concrete Rust type
/// of a `PixelType`.
///
/// ```ignore
/// with_pixel_type!(info.pixel_type, process_tile, &job, &folder)
/// ```
#[macro_export]
macro_rules! with_pixel_type {
    ($pixel_type:expr, $func:ident, $($arg:expr),*) => {
        match $pixel_type {
            $crate::PixelType::UInt8 => $func::<u8>($($arg),*),
            $crate::PixelType::UInt16 => $func::<u16>($($arg),*),
            $crate::PixelType::UInt32 => $func::<u32>($($arg),*),
            $crate::PixelType::Int16 => $func::<i16>($($arg),*),
            $crate::PixelType::Int32 => $func::<i32>($($arg),*),
            $crate::PixelType::Float32 => $func::<f32>($($arg),*),
            $crate::PixelType::Float64 => $func::<f64>($($arg),*),
        }
    };
}
