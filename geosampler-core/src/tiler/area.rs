//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{SamplerError, SamplerResult};
use crate::core::feature::FeatureLayer;
use crate::core::geom::{extent_polygon, Polygon};
use tile_grid::{Extent, Tile};

/// Spatial predicate between a tile and the extent hull
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Predicate {
    Intersects,
    Within,
}

impl Predicate {
    pub fn parse(name: &str) -> SamplerResult<Predicate> {
        match name {
            "intersects" => Ok(Predicate::Intersects),
            "within" => Ok(Predicate::Within),
            _ => Err(SamplerError::config(format!(
                "unknown predicate '{}', expected intersects or within",
                name
            ))),
        }
    }
    pub fn matches(&self, tile: &Tile, hull: &Polygon) -> bool {
        use geo::{Intersects, Within};
        let bbox = extent_polygon(&tile.extent);
        match self {
            Predicate::Intersects => bbox.intersects(hull),
            Predicate::Within => bbox.is_within(hull),
        }
    }
}

/// Bounds, SRID and optional convex hull restriction of a tiling
#[derive(Clone, Debug)]
pub struct TilingArea {
    pub bounds: Extent,
    /// Spatial reference system (EPSG code)
    pub srid: i32,
    /// Convex hull of the extent layer
    pub hull: Option<Polygon>,
}

impl TilingArea {
    pub fn new(bounds: Extent, srid: i32) -> TilingArea {
        TilingArea {
            bounds,
            srid,
            hull: None,
        }
    }
    /// Explicit bounds win over the extent layer bounds, the extent layer
    /// SRID wins over the explicit one.
    pub fn resolve(
        bounds: Option<Extent>,
        srid: Option<i32>,
        extent_layer: Option<&FeatureLayer>,
    ) -> SamplerResult<TilingArea> {
        let layer = match extent_layer {
            None => {
                let bounds = bounds.ok_or_else(|| {
                    SamplerError::config("bounds or an extent layer are required")
                })?;
                let srid = srid.ok_or_else(|| {
                    SamplerError::config("srid has not been initialized, set srid or an extent layer")
                })?;
                return Ok(TilingArea::new(bounds, srid));
            }
            Some(layer) => layer,
        };
        let hull = layer.convex_hull().ok_or_else(|| {
            SamplerError::config(format!("extent layer '{}' has no polygons", layer.name))
        })?;
        let bounds = match bounds {
            Some(bounds) => bounds,
            None => layer.extent().ok_or_else(|| {
                SamplerError::config(format!("extent layer '{}' is empty", layer.name))
            })?,
        };
        let srid = match (layer.srid, srid) {
            (Some(layer_srid), Some(srid)) if layer_srid != srid => {
                warn!(
                    "SRID {} of extent layer '{}' overrides configured SRID {}",
                    layer_srid, layer.name, srid
                );
                layer_srid
            }
            (Some(layer_srid), _) => layer_srid,
            (None, Some(srid)) => srid,
            (None, None) => {
                return Err(SamplerError::config(
                    "srid has not been initialized, set srid or an extent layer",
                ))
            }
        };
        Ok(TilingArea {
            bounds,
            srid,
            hull: Some(hull),
        })
    }
    /// True if `tile` is kept under `predicate`
    pub fn keeps(&self, tile: &Tile, predicate: Predicate) -> bool {
        match self.hull {
            Some(ref hull) => predicate.matches(tile, hull),
            None => true,
        }
    }
}
