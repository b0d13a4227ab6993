//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::SamplerResult;
use crate::core::feature::FeatureLayer;

pub trait DatasourceInput {
    /// Read all features of the datasource
    fn read_layer(&self) -> SamplerResult<FeatureLayer>;
}

pub trait DatasourceOutput {
    /// Driver name, e.g. "GeoJSON"
    fn driver(&self) -> &'static str;
    /// Default file extension
    fn extension(&self) -> &'static str;
    fn write_layer(&self, layer: &FeatureLayer, path: &str) -> SamplerResult<()>;
}
