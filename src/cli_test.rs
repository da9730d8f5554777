//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use super::app;
use clap::ErrorKind;

#[test]
fn test_optimize_rasters_args() {
    let matches = app("1.0.0")
        .get_matches_from_safe(vec!["flintdata", "optimize-rasters", "a.tif", "b*.tif", "-q"])
        .unwrap();
    let sub_m = matches.subcommand_matches("optimize-rasters").unwrap();
    let inputs = sub_m.values_of("INPUT").unwrap().collect::<Vec<_>>();
    assert_eq!(inputs, vec!["a.tif", "b*.tif"]);
    assert!(sub_m.is_present("quiet"));
    assert!(!sub_m.is_present("overwrite"));
}

#[test]
fn test_missing_input() {
    let err = app("1.0.0")
        .get_matches_from_safe(vec!["flintdata", "optimize-rasters", "-o", "out"])
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::MissingRequiredArgument);
    // exits with status 1
    assert!(err.use_stderr());

    let err = app("1.0.0")
        .get_matches_from_safe(vec!["flintdata", "optimize-rasters", "--help"])
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::HelpDisplayed);
    assert!(!err.use_stderr());
}

#[test]
fn test_stack_name_required() {
    let err = app("1.0.0")
        .get_matches_from_safe(vec!["flintdata", "optimize-rasterstack", "forest_{year}.tif"])
        .err()
        .unwrap();
    assert_eq!(err.kind, ErrorKind::MissingRequiredArgument);

    let matches = app("1.0.0")
        .get_matches_from_safe(vec![
            "flintdata",
            "optimize-rasterstack",
            "forest_{year}.tif",
            "-n",
            "forest",
        ])
        .unwrap();
    let sub_m = matches.subcommand_matches("optimize-rasterstack").unwrap();
    assert_eq!(sub_m.value_of("PATTERN"), Some("forest_{year}.tif"));
    assert_eq!(sub_m.value_of("name"), Some("forest"));
}
