//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::SamplerResult;
use crate::core::feature::FeatureLayer;
use crate::datasource;
use crate::tiler::area::{Predicate, TilingArea};
use tile_grid::{TileSpec, TiledLayer};

/// Regular grid tiler
#[derive(Clone, Debug)]
pub struct SimpleTiler {
    spec: TileSpec,
    area: TilingArea,
    predicate: Predicate,
}

impl SimpleTiler {
    pub fn new(spec: TileSpec, area: TilingArea, predicate: Predicate) -> SimpleTiler {
        SimpleTiler {
            spec,
            area,
            predicate,
        }
    }
    pub fn spec(&self) -> &TileSpec {
        &self.spec
    }
    pub fn area(&self) -> &TilingArea {
        &self.area
    }
    pub fn tile(&self) -> TiledLayer {
        let tiles = self
            .spec
            .tiles(&self.area.bounds)
            .filter(|tile| self.area.keeps(tile, self.predicate))
            .collect::<Vec<_>>();
        debug!(
            "{} tiles of size {:?} in {:?}",
            tiles.len(),
            self.spec.size(),
            self.area.bounds
        );
        TiledLayer::new(self.area.srid, tiles)
    }
    pub fn write(&self, path: &str, driver: Option<&str>) -> SamplerResult<()> {
        let layer = FeatureLayer::from_tiles("tiles", &self.tile());
        datasource::write_layer(&layer, path, driver)
    }
}
