//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod datasource;
pub mod geojson;

pub use self::datasource::{DatasourceInput, DatasourceOutput};
pub use self::geojson::{GeoJsonDatasource, GeoJsonWriter};

use crate::core::error::{SamplerError, SamplerResult};
use crate::core::feature::FeatureLayer;
use std::path::Path;

/// Datasource for a vector file, selected by file extension
pub fn input(path: &str) -> SamplerResult<Box<dyn DatasourceInput>> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_ref().map(|e| e.as_str()) {
        Some("geojson") | Some("json") => Ok(Box::new(GeoJsonDatasource::new(path))),
        _ => Err(SamplerError::config(format!(
            "Unsupported vector datasource '{}'",
            path
        ))),
    }
}

/// Writer for a named output format
pub fn output(driver: &str) -> SamplerResult<Box<dyn DatasourceOutput>> {
    match driver.to_lowercase().as_str() {
        "geojson" => Ok(Box::new(GeoJsonWriter)),
        _ => Err(SamplerError::UnsupportedDriver(driver.to_string())),
    }
}

pub fn read_layer(path: &str) -> SamplerResult<FeatureLayer> {
    let layer = input(path)?.read_layer()?;
    info!(
        "Read {} features from '{}' (SRID {:?})",
        layer.len(),
        path,
        layer.srid
    );
    Ok(layer)
}

/// Write `layer` to `path`, with the driver derived from the extension if not given
pub fn write_layer(layer: &FeatureLayer, path: &str, driver: Option<&str>) -> SamplerResult<()> {
    let writer = match driver {
        Some(driver) => output(driver)?,
        None => match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json") => {
                output("GeoJSON")?
            }
            ext => return Err(SamplerError::UnsupportedDriver(ext.unwrap_or("").to_string())),
        },
    };
    writer.write_layer(layer, path)
}
