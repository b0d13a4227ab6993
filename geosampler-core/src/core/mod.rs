//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod config;
pub mod error;
pub mod feature;
pub mod geom;

pub use self::config::{parse_config, read_config, ApplicationCfg, Config};
pub use self::error::{SamplerError, SamplerResult};

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod feature_test;
#[cfg(test)]
mod geom_test;
