//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{
    default_config, parse_config, read_config, ApplicationCfg, Config, GdalCfg, OutputCfg,
    DEFAULT_CACHEMAX, DEFAULT_IN_MEMORY_THRESHOLD,
};
use crate::Error;
use std::env;

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(default_config(), "").unwrap();
    assert!(config.gdal.tiff_internal_mask);
    assert_eq!(config.gdal.tiff_ovr_blocksize, 400);
    assert_eq!(config.gdal.cachemax, DEFAULT_CACHEMAX);
    assert_eq!(config.gdal.swath_size(), 2 * DEFAULT_CACHEMAX);
    assert_eq!(config.gdal.disable_readdir_on_open, "EMPTY_DIR");
    assert_eq!(config.output.in_memory_threshold, DEFAULT_IN_MEMORY_THRESHOLD);
    assert_eq!(config.output.zlevel, 1);
    assert_eq!(config.output.zstd_level, 9);

    let config = ApplicationCfg::from_file(None).unwrap();
    assert_eq!(config.output.in_memory_threshold, 256000000);
}

#[test]
fn test_partial_config() {
    let toml = r#"
        [output]
        in_memory_threshold = 100
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "partial.toml").unwrap();
    assert_eq!(config.output.in_memory_threshold, 100);
    assert_eq!(config.output.zstd_level, 9);
    assert_eq!(config.gdal.cachemax, DEFAULT_CACHEMAX);

    let config: ApplicationCfg = parse_config("".to_string(), "empty.toml").unwrap();
    assert_eq!(config.gdal.tiff_ovr_blocksize, 400);
}

#[test]
fn test_gdal_options() {
    let toml = r#"
        [gdal]
        tiff_internal_mask = false
        cachemax = 1000
        swath_size = 5000
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(
        config.gdal.options(),
        vec![
            ("GDAL_TIFF_INTERNAL_MASK", "NO".to_string()),
            ("GDAL_TIFF_OVR_BLOCKSIZE", "400".to_string()),
            ("GDAL_CACHEMAX", "1000".to_string()),
            ("GDAL_SWATH_SIZE", "5000".to_string()),
            ("GDAL_DISABLE_READDIR_ON_OPEN", "EMPTY_DIR".to_string()),
        ]
    );
}

#[test]
fn test_env_template() {
    env::set_var("FLINT_TEST_THRESHOLD", "4096");
    let toml = r#"
        [output]
        in_memory_threshold = {{ env.FLINT_TEST_THRESHOLD }}
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "env.toml").unwrap();
    assert_eq!(config.output.in_memory_threshold, 4096);
}

#[test]
fn test_parse_error() {
    let toml = r#"
        [output]
        in_memory_threshold = ${THRESHOLD}
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert_eq!(
        config.err().unwrap().to_string(),
        "Configuration error: Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`"
    );

    let config: Result<ApplicationCfg, _> = parse_config("[output]\nzlevel = \"x\"".to_string(), "bad.toml");
    match config {
        Err(Error::Config(msg)) => assert!(msg.starts_with("bad.toml - ")),
        _ => panic!("Expected configuration error"),
    }

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!(
        config.err().unwrap().to_string(),
        "Configuration error: Could not find config file!"
    );
}

#[test]
fn test_gen_config() {
    let template = default_config();
    assert!(template.starts_with("\n[gdal]\n"));
    assert!(template.contains("\n[output]\n"));
    assert_eq!(GdalCfg::gen_config().lines().nth(1), Some("[gdal]"));

    let config = ApplicationCfg::from_file(None).unwrap();
    let output = OutputCfg::from_config(&config).unwrap();
    assert_eq!(output.zlevel, 1);
    let gdal = GdalCfg::from_config(&config).unwrap();
    assert_eq!(gdal.tiff_ovr_blocksize, 400);
}
