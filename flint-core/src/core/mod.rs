//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod error;
pub mod layer_info;

pub use self::config::{
    default_config, parse_config, read_config, ApplicationCfg, Config, GdalCfg, OutputCfg,
};
pub use self::layer_info::{LayerMetadata, LayerType};

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod layer_info_test;
