//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use thiserror::Error;
use tile_grid::GridError;

/// Errors raised while setting up or running a sampling
///
/// Only misconfiguration and I/O failures are errors. Misses inside a
/// sampling loop, exhausted iterators and oversized sample requests are
/// reported through the log and the returned output.
#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid GeoJSON: {0}")]
    Format(String),
    #[error("unsupported output driver '{0}'")]
    UnsupportedDriver(String),
}

pub type SamplerResult<T> = Result<T, SamplerError>;

impl SamplerError {
    pub fn config<S: Into<String>>(msg: S) -> SamplerError {
        SamplerError::Configuration(msg.into())
    }
}
