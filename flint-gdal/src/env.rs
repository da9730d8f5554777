//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use flint_core::core::GdalCfg;
use flint_core::Result;
use gdal::config;
use gdal::errors::CplErrType;

/// GDAL config options set for the lifetime of the guard.
/// Previous values are restored on drop.
pub struct GdalEnv {
    previous: Vec<(&'static str, Option<String>)>,
}

impl GdalEnv {
    pub fn new(cfg: &GdalCfg) -> Result<GdalEnv> {
        Self::with_options(&cfg.options())
    }
    pub fn with_options(options: &[(&'static str, String)]) -> Result<GdalEnv> {
        let mut env = GdalEnv {
            previous: Vec::with_capacity(options.len()),
        };
        for (key, value) in options {
            let previous = config::get_config_option(key, "")?;
            env.previous
                .push((*key, if previous.is_empty() { None } else { Some(previous) }));
            debug!("GDAL config {}={}", key, value);
            config::set_config_option(key, value)?;
        }
        Ok(env)
    }
}

impl Drop for GdalEnv {
    fn drop(&mut self) {
        for (key, previous) in self.previous.iter().rev() {
            let res = match previous {
                Some(value) => config::set_config_option(key, value),
                None => config::clear_config_option(key),
            };
            if let Err(e) = res {
                warn!("Couldn't restore GDAL config {}: {}", key, e);
            }
        }
    }
}

/// Routes GDAL messages to the log while alive.
/// Warnings emitted during resampling of nodata areas are expected and logged at debug level.
pub struct WarningFilter;

impl WarningFilter {
    pub fn new() -> WarningFilter {
        config::set_error_handler(|class, number, msg| match class {
            CplErrType::Failure | CplErrType::Fatal => {
                error!("GDAL error {}: {}", number, msg)
            }
            CplErrType::Warning => debug!("GDAL warning {}: {}", number, msg),
            _ => trace!("GDAL {}: {}", number, msg),
        });
        WarningFilter
    }
}

impl Default for WarningFilter {
    fn default() -> Self {
        WarningFilter::new()
    }
}

impl Drop for WarningFilter {
    fn drop(&mut self) {
        config::remove_error_handler();
    }
}
