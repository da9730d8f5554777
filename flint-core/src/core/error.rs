//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors aborting an optimizer run
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unreadable source raster
    #[error("error while reading file {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Output file exists and overwriting was not requested
    #[error("Output file {0} exists (use --overwrite to ignore)")]
    OutputConflict(PathBuf),

    #[error("Output folder {path} is not writable: {source}")]
    OutputFolder { path: PathBuf, source: io::Error },

    #[error("Bounds must contain 4 values, got {0}")]
    InvalidBounds(usize),

    #[error("Unsupported raster data type {0}")]
    UnsupportedDataType(String),

    #[error("Warp failed: {0}")]
    Warp(String),

    #[error("Invalid raster pattern: {0}")]
    Pattern(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Gdal(#[from] gdal::errors::GdalError),
}

impl Error {
    pub fn input<P: Into<PathBuf>, S: ToString>(path: P, reason: S) -> Error {
        Error::Input {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
