//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_core::Result;
use gdal::cpl::CslStringList;
use gdal::DriverManager;
use std::fmt;
use std::str::FromStr;

/// Codec of the final tile rasters
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Compression {
    /// ZSTD if the GDAL runtime supports it, DEFLATE otherwise
    Auto,
    Deflate,
    Lzw,
    Zstd,
    None,
}

impl Compression {
    pub const NAMES: [&'static str; 5] = ["auto", "deflate", "lzw", "zstd", "none"];

    /// Value of the GTiff COMPRESS creation option
    pub fn creation_option(&self) -> &'static str {
        match self {
            Compression::Auto | Compression::Deflate => "DEFLATE",
            Compression::Lzw => "LZW",
            Compression::Zstd => "ZSTD",
            Compression::None => "NONE",
        }
    }
    /// Replace `Auto` with the preferred codec of the GDAL runtime
    pub fn resolve(self) -> Result<Compression> {
        match self {
            Compression::Auto => preferred_compression(),
            other => Ok(other),
        }
    }
}

impl Default for Compression {
    fn default() -> Self {
        Compression::Auto
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Compression::Auto),
            "deflate" => Ok(Compression::Deflate),
            "lzw" => Ok(Compression::Lzw),
            "zstd" => Ok(Compression::Zstd),
            "none" => Ok(Compression::None),
            _ => Err(format!("Unknown compression '{}'", s)),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Compression::Auto => write!(f, "auto"),
            other => write!(f, "{}", other.creation_option()),
        }
    }
}

/// GDAL runtime version as (major, minor)
pub fn gdal_version() -> (u32, u32) {
    parse_version_num(&gdal::version::version_info("VERSION_NUM"))
}

/// Split a GDAL VERSION_NUM like `3040100` into (major, minor)
pub fn parse_version_num(version_num: &str) -> (u32, u32) {
    let num: u32 = version_num.trim().parse().unwrap_or(0);
    (num / 1_000_000, (num / 10_000) % 100)
}

/// ZSTD when it is available in the GDAL runtime, DEFLATE otherwise
pub fn preferred_compression() -> Result<Compression> {
    if gdal_version() < (2, 3) {
        return Ok(Compression::Deflate);
    }
    let path = "/vsimem/flint_zstd_probe.tif";
    let mut options = CslStringList::new();
    options.set_name_value("COMPRESS", "ZSTD")?;
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let probe = driver.create_with_band_type_with_options::<u8, _>(path, 1, 1, 1, &options);
    let compression = match probe {
        Ok(dataset) => {
            drop(dataset);
            Compression::Zstd
        }
        Err(e) if e.to_string().contains("missing codec") => Compression::Deflate,
        Err(e) => return Err(e.into()),
    };
    let _ = gdal::vsi::unlink_mem_file(path);
    debug!("Preferred compression: {}", compression);
    Ok(compression)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("zstd".parse::<Compression>(), Ok(Compression::Zstd));
        assert_eq!("none".parse::<Compression>().unwrap().creation_option(), "NONE");
        assert!("brotli".parse::<Compression>().is_err());
        for name in Compression::NAMES.iter() {
            assert!(name.parse::<Compression>().is_ok());
        }
    }

    #[test]
    fn test_version_num() {
        assert_eq!(parse_version_num("3040100"), (3, 4));
        assert_eq!(parse_version_num("2030000\n"), (2, 3));
        assert_eq!(parse_version_num("2020400"), (2, 2));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Compression::Lzw.resolve().unwrap(), Compression::Lzw);
        let auto = Compression::Auto.resolve().unwrap();
        assert!(auto == Compression::Zstd || auto == Compression::Deflate);
    }
}
