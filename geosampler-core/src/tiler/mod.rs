//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tilers turning a configured area into tiled layers

mod area;
mod quadtree;
mod simple;

pub use self::area::{Predicate, TilingArea};
pub use self::quadtree::QuadTreeTiler;
pub use self::simple::SimpleTiler;

use crate::core::config::{BoundsCfg, CriterionValueCfg, TilerCfg};
use crate::core::error::{SamplerError, SamplerResult};
use crate::core::geom::wkt_bounds;
use crate::core::Config;
use crate::datasource;
use tile_grid::{Criterion, CriterionValue, Extent, TileSpec, TiledLayer};

/// Tiling used by a sampling
#[derive(Clone, Debug)]
pub enum TilingSource {
    Grid(SimpleTiler),
    /// Quad tree sampled at `level`, the deepest level if unset
    QuadTree {
        tiler: QuadTreeTiler,
        level: Option<usize>,
    },
}

impl TilingSource {
    pub fn srid(&self) -> i32 {
        match self {
            TilingSource::Grid(tiler) => tiler.area().srid,
            TilingSource::QuadTree { tiler, .. } => tiler.area().srid,
        }
    }
    /// Tiles to sample from
    pub fn layer(&self) -> SamplerResult<TiledLayer> {
        match self {
            TilingSource::Grid(tiler) => Ok(tiler.tile()),
            TilingSource::QuadTree { tiler, level } => {
                let tree = tiler.tile();
                let level = level.unwrap_or_else(|| tree.last_level());
                tree.level(level).cloned().ok_or_else(|| {
                    SamplerError::config(format!(
                        "quad tree level {} requested, last level is {}",
                        level,
                        tree.last_level()
                    ))
                })
            }
        }
    }
    /// Write the tiling, one file per level for quad trees
    pub fn write(&self, path: &str, driver: Option<&str>) -> SamplerResult<()> {
        match self {
            TilingSource::Grid(tiler) => tiler.write(path, driver),
            TilingSource::QuadTree { tiler, .. } => tiler.write(path, driver),
        }
    }
}

pub fn bounds_from_config(bounds: &BoundsCfg) -> SamplerResult<Extent> {
    match bounds {
        BoundsCfg::Values(values) => match values.as_slice() {
            [minx, miny, maxx, maxy] => Ok(Extent::new(*minx, *miny, *maxx, *maxy)),
            _ => Err(SamplerError::config(format!(
                "bounds must be [minx, miny, maxx, maxy], got {:?}",
                values
            ))),
        },
        BoundsCfg::Wkt(wkt) => wkt_bounds(wkt),
        BoundsCfg::Extent(ext) => Ok(Extent::new(ext.minx, ext.miny, ext.maxx, ext.maxy)),
    }
}

impl<'a> Config<'a, TilerCfg> for TilingSource {
    fn from_config(tiler_cfg: &TilerCfg) -> SamplerResult<Self> {
        let bounds = tiler_cfg
            .bounds
            .as_ref()
            .map(bounds_from_config)
            .transpose()?;
        let extent_layer = match tiler_cfg.extent {
            Some(ref path) => Some(datasource::read_layer(path)?),
            None => None,
        };
        let area = TilingArea::resolve(bounds, tiler_cfg.srid, extent_layer.as_ref())?;
        let predicate = Predicate::parse(&tiler_cfg.predicate)?;
        match tiler_cfg.tiler_type.as_str() {
            "grid" => {
                let (size_x, size_y) = tiler_cfg
                    .tile_size
                    .as_ref()
                    .ok_or_else(|| SamplerError::config("grid tiler requires tile_size"))?
                    .xy();
                let (overlap_x, overlap_y) =
                    tiler_cfg.overlap.as_ref().map_or((0.0, 0.0), |o| o.xy());
                let spec = TileSpec::new(
                    size_x,
                    size_y,
                    overlap_x,
                    overlap_y,
                    tiler_cfg.strict_inclusion,
                )?;
                Ok(TilingSource::Grid(SimpleTiler::new(spec, area, predicate)))
            }
            "quadtree" => {
                let name = tiler_cfg.criterion.as_deref().unwrap_or(Criterion::NAMES[0]);
                let value = match tiler_cfg.criterion_value {
                    Some(CriterionValueCfg::Int(v)) => CriterionValue::Int(v),
                    Some(CriterionValueCfg::Float(v)) => CriterionValue::Float(v),
                    None => {
                        return Err(SamplerError::config(
                            "quadtree tiler requires criterion_value",
                        ))
                    }
                };
                let criterion = Criterion::parse(name, value)?;
                Ok(TilingSource::QuadTree {
                    tiler: QuadTreeTiler::new(criterion, area, predicate),
                    level: tiler_cfg.level,
                })
            }
            other => Err(SamplerError::config(format!(
                "unknown tiler type '{}', expected grid or quadtree",
                other
            ))),
        }
    }

    fn gen_config() -> String {
        let toml = r#"
[tiler]
# grid or quadtree
type = "grid"
# Tile size and overlap in ground units, a number or [x, y] (grid)
tile_size = 256
overlap = 0
strict_inclusion = true
# Stopping criterion max_sample or min_sample_area (quadtree)
#criterion = "max_sample"
#criterion_value = 64
#level = 3
# [minx, miny, maxx, maxy] or WKT polygon
bounds = [0.0, 0.0, 4096.0, 4096.0]
srid = 3857
# Restrict tiles to the convex hull of a vector file
#extent = "extent.geojson"
#predicate = "intersects"
"#;
        toml.to_string()
    }
}
