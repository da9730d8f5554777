//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use flint_core::core::{ApplicationCfg, Config};
use flint_core::{Error, Result};
use flint_gdal::compression::gdal_version;
use flint_service::{
    expand_inputs, OptimizeOptions, RasterPattern, StackRasterizer, TileRasterizer,
};
use log::Record;
use std::env;
use std::io::Write;
use std::path::Path;
use std::process;
use std::str::FromStr;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let ts = time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            ts,
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => loglevel.unwrap_or("info").to_string(),
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn parse_arg<T: FromStr<Err = String> + Default>(args: &ArgMatches<'_>, name: &str) -> Result<T> {
    args.value_of(name)
        .map_or(Ok(T::default()), |s| s.parse::<T>().map_err(Error::Config))
}

fn options_from_args(args: &ArgMatches<'_>) -> Result<OptimizeOptions> {
    let in_memory = if args.is_present("in-memory") {
        Some(true)
    } else if args.is_present("no-in-memory") {
        Some(false)
    } else {
        None
    };
    Ok(OptimizeOptions {
        overwrite: args.is_present("overwrite"),
        resampling: parse_arg(args, "resampling-method")?,
        compression: parse_arg(args, "compression")?,
        in_memory,
        quiet: args.is_present("quiet"),
    })
}

fn config_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg> {
    ApplicationCfg::from_file(args.value_of("config"))
}

fn optimize_rasters(args: &ArgMatches<'_>) -> Result<u64> {
    let config = config_from_args(args)?;
    let rasterizer = TileRasterizer::from_config(&config)?.with_options(options_from_args(args)?);
    let inputs = args.values_of("INPUT").map_or(Vec::new(), |v| v.collect());
    let raster_files = expand_inputs(&inputs[..])?;
    let output_folder = Path::new(args.value_of("output").unwrap_or("."));
    rasterizer.optimize(&raster_files, output_folder)
}

fn optimize_rasterstack(args: &ArgMatches<'_>) -> Result<u64> {
    let config = config_from_args(args)?;
    let rasterizer = StackRasterizer::from_config(&config)?.with_options(options_from_args(args)?);
    let pattern = RasterPattern::find(args.value_of("PATTERN").unwrap_or_default())?;
    let name = args.value_of("name").unwrap_or_default();
    let output_folder = Path::new(args.value_of("output").unwrap_or("."));
    rasterizer.optimize(&pattern.sorted_files(), name, output_folder)
}

fn version_info() -> String {
    let (major, minor) = gdal_version();
    format!("{} (GDAL version {}.{})", crate_version!(), major, minor)
}

fn app<'a, 'b>(version_info: &'b str) -> App<'a, 'b> {
    // http://kbknapp.github.io/clap-rs/clap/
    App::new("flintdata")
        .version(version_info)
        .author("Mal Francis <info@mulliongroup.com>")
        .about("Reprojects rasters into the FLINT 1x1 degree tile and block layout")
        .subcommand(SubCommand::with_name("optimize-rasters")
                        .args_from_usage("<INPUT>... 'Input raster files or glob patterns'
                                              -o, --output=[DIR] 'Output directory (Default: .)'
                                              --overwrite 'Overwrite existing block files'
                                              --resampling-method=[nearest|bilinear|cubic|average] 'Resampling method (Default: nearest)'
                                              --compression=[auto|deflate|lzw|zstd|none] 'Compression of tile rasters (Default: auto)'
                                              --in-memory 'Keep tile rasters in memory'
                                              --no-in-memory 'Write tile rasters to temporary files'
                                              -q, --quiet 'Suppress progress output'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Reproject rasters into tile rasters and block files"))
        .subcommand(SubCommand::with_name("optimize-rasterstack")
                        .args_from_usage("<PATTERN> 'Raster pattern with placeholders, e.g. rasters/forest_{year}.tif'
                                              -n, --name=<NAME> 'Stack name'
                                              -o, --output=[DIR] 'Output directory (Default: .)'
                                              --overwrite 'Overwrite existing block files'
                                              --resampling-method=[nearest|bilinear|cubic|average] 'Resampling method (Default: nearest)'
                                              -q, --quiet 'Suppress progress output'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Reproject a raster stack into multi-layer block files"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
}

fn main() {
    dotenv().ok();
    let version_info = version_info();
    let mut app = app(&version_info);

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        // exit status 0 for --help and --version, 1 for usage errors
        Err(e) => e.exit(),
        Ok(matches) => {
            let result = match matches.subcommand() {
                ("optimize-rasters", Some(sub_m)) => {
                    init_logger(sub_m);
                    optimize_rasters(sub_m)
                }
                ("optimize-rasterstack", Some(sub_m)) => {
                    init_logger(sub_m);
                    optimize_rasterstack(sub_m)
                }
                ("genconfig", Some(sub_m)) => {
                    init_logger(sub_m);
                    println!("{}", TileRasterizer::gen_config());
                    Ok(0)
                }
                _ => {
                    let _ = app.print_help();
                    println!("");
                    Ok(0)
                }
            };
            match result {
                Ok(tiles) => debug!("{} tiles written", tiles),
                Err(e) => {
                    error!("{}", e);
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod cli_test;
