//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination directory of block files, tile rasters and layer descriptors
#[derive(Clone, Debug)]
pub struct OutputFolder {
    pub basepath: PathBuf,
}

impl OutputFolder {
    pub fn new<P: AsRef<Path>>(basepath: P) -> OutputFolder {
        OutputFolder {
            basepath: basepath.as_ref().to_path_buf(),
        }
    }
    pub fn info(&self) -> String {
        format!("Output directory: {}", self.basepath.display())
    }
    /// Create the directory including missing parents
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.basepath).map_err(|e| Error::OutputFolder {
            path: self.basepath.clone(),
            source: e,
        })
    }
    pub fn subfolder(&self, name: &str) -> OutputFolder {
        OutputFolder::new(self.basepath.join(name))
    }
    pub fn path(&self, file: &str) -> PathBuf {
        self.basepath.join(file)
    }
    pub fn exists(&self, file: &str) -> bool {
        self.path(file).exists()
    }
    /// Fails with `OutputConflict` if the file exists and `overwrite` is false
    pub fn check_conflict(&self, file: &str, overwrite: bool) -> Result<()> {
        let path = self.path(file);
        if !overwrite && path.exists() {
            return Err(Error::OutputConflict(path));
        }
        Ok(())
    }
    /// Create (or truncate) a file for buffered writing
    pub fn create_file(&self, file: &str, overwrite: bool) -> Result<BufWriter<File>> {
        self.check_conflict(file, overwrite)?;
        let path = self.path(file);
        debug!("OutputFolder.create_file {}", path.display());
        let f = File::create(&path).map_err(|e| Error::OutputFolder {
            path: path.clone(),
            source: e,
        })?;
        Ok(BufWriter::new(f))
    }
    pub fn write(&self, file: &str, obj: &[u8], overwrite: bool) -> Result<()> {
        let mut f = self.create_file(file, overwrite)?;
        f.write_all(obj)?;
        f.flush()?;
        Ok(())
    }
}
