//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::error::Error as StdError;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ApplicationCfg {
    #[serde(default)]
    pub gdal: GdalCfg,
    #[serde(default)]
    pub output: OutputCfg,
}

/// GDAL tuning options set for the duration of a run
#[derive(Deserialize, Clone, Debug)]
pub struct GdalCfg {
    /// GDAL_TIFF_INTERNAL_MASK
    #[serde(default = "default_true")]
    pub tiff_internal_mask: bool,
    /// GDAL_TIFF_OVR_BLOCKSIZE
    #[serde(default = "default_ovr_blocksize")]
    pub tiff_ovr_blocksize: u32,
    /// GDAL_CACHEMAX in bytes
    #[serde(default = "default_cachemax")]
    pub cachemax: u64,
    /// GDAL_SWATH_SIZE in bytes (Default: 2 * cachemax)
    pub swath_size: Option<u64>,
    /// GDAL_DISABLE_READDIR_ON_OPEN
    #[serde(default = "default_disable_readdir")]
    pub disable_readdir_on_open: String,
}

impl GdalCfg {
    pub fn swath_size(&self) -> u64 {
        self.swath_size.unwrap_or(2 * self.cachemax)
    }
    /// Config options as (GDAL key, value)
    pub fn options(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "GDAL_TIFF_INTERNAL_MASK",
                if self.tiff_internal_mask { "YES" } else { "NO" }.to_string(),
            ),
            (
                "GDAL_TIFF_OVR_BLOCKSIZE",
                self.tiff_ovr_blocksize.to_string(),
            ),
            ("GDAL_CACHEMAX", self.cachemax.to_string()),
            ("GDAL_SWATH_SIZE", self.swath_size().to_string()),
            (
                "GDAL_DISABLE_READDIR_ON_OPEN",
                self.disable_readdir_on_open.clone(),
            ),
        ]
    }
}

impl Default for GdalCfg {
    fn default() -> Self {
        GdalCfg {
            tiff_internal_mask: default_true(),
            tiff_ovr_blocksize: default_ovr_blocksize(),
            cachemax: default_cachemax(),
            swath_size: None,
            disable_readdir_on_open: default_disable_readdir(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// Destination rasters with fewer pixels are processed in memory
    #[serde(default = "default_in_memory_threshold")]
    pub in_memory_threshold: u64,
    /// DEFLATE compression level of tile rasters
    #[serde(default = "default_zlevel")]
    pub zlevel: u8,
    /// ZSTD compression level of tile rasters
    #[serde(default = "default_zstd_level")]
    pub zstd_level: u8,
}

impl Default for OutputCfg {
    fn default() -> Self {
        OutputCfg {
            in_memory_threshold: default_in_memory_threshold(),
            zlevel: default_zlevel(),
            zstd_level: default_zstd_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ovr_blocksize() -> u32 {
    400
}

pub const DEFAULT_CACHEMAX: u64 = 1024 * 1024 * 512;

fn default_cachemax() -> u64 {
    DEFAULT_CACHEMAX
}

fn default_disable_readdir() -> String {
    "EMPTY_DIR".to_string()
}

pub const DEFAULT_IN_MEMORY_THRESHOLD: u64 = 16000 * 16000;

fn default_in_memory_threshold() -> u64 {
    DEFAULT_IN_MEMORY_THRESHOLD
}

fn default_zlevel() -> u8 {
    1
}

fn default_zstd_level() -> u8 {
    9
}

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err(Error::Config("Could not find config file!".to_string()));
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(Error::Config(format!(
            "Error while reading config: [{}]",
            err
        )));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]_]+)\}").map_err(|e| Error::Config(e.to_string()))?;
    if re.is_match(&config_toml) {
        return Err(Error::Config(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`"
                .to_string(),
        ));
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| Error::Config(format!("Template error: {}", e)))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| {
        let cause = e.source().map(|s| s.to_string()).unwrap_or(e.to_string());
        Error::Config(format!("Template error: {}", cause))
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| Error::Config(format!("{} - {}", path, err)))
}

const TOML_GDAL: &'static str = r#"
[gdal]
tiff_internal_mask = true
tiff_ovr_blocksize = 400
cachemax = 536870912 # 512 MB
#swath_size = 1073741824 # Default: 2 * cachemax
disable_readdir_on_open = "EMPTY_DIR"
"#;

const TOML_OUTPUT: &'static str = r#"
[output]
in_memory_threshold = 256000000 # pixels (16000 x 16000)
zlevel = 1
zstd_level = 9
"#;

impl<'a> Config<'a, ApplicationCfg> for GdalCfg {
    fn from_config(config: &ApplicationCfg) -> Result<Self> {
        Ok(config.gdal.clone())
    }
    fn gen_config() -> String {
        TOML_GDAL.to_string()
    }
}

impl<'a> Config<'a, ApplicationCfg> for OutputCfg {
    fn from_config(config: &ApplicationCfg) -> Result<Self> {
        if config.output.in_memory_threshold == 0 {
            warn!("in_memory_threshold = 0: all tile rasters are written to temporary files");
        }
        Ok(config.output.clone())
    }
    fn gen_config() -> String {
        TOML_OUTPUT.to_string()
    }
}

/// Configuration template with all defaults
pub fn default_config() -> String {
    let mut config = String::new();
    config.push_str(&GdalCfg::gen_config());
    config.push_str(&OutputCfg::gen_config());
    config
}

impl ApplicationCfg {
    pub fn from_file(path: Option<&str>) -> Result<ApplicationCfg> {
        match path {
            Some(path) => {
                info!("Reading configuration from '{}'", path);
                read_config(path)
            }
            None => parse_config(default_config(), ""),
        }
    }
}
