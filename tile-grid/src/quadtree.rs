//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Quad tree tilings

use crate::grid::{Extent, GridError, Tile, TiledLayer};
use std::fmt;

/// Raw criterion value as found in a configuration
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum CriterionValue {
    Int(i64),
    Float(f64),
}

/// Stopping criterion of the quad tree subdivision
#[derive(PartialEq, Clone, Debug)]
pub enum Criterion {
    /// Split while the tile count of the current level is <= value
    MaxSample(u64),
    /// Split while the tile area of the current level is >= value
    MinSampleArea(f64),
}

impl Criterion {
    pub const NAMES: [&'static str; 2] = ["max_sample", "min_sample_area"];

    pub fn parse(name: &str, value: CriterionValue) -> Result<Criterion, GridError> {
        match (name, value) {
            ("max_sample", CriterionValue::Int(v)) if v >= 0 => Ok(Criterion::MaxSample(v as u64)),
            ("max_sample", CriterionValue::Int(v)) => Err(GridError::InvalidCriterion(format!(
                "max_sample must not be negative, got {}",
                v
            ))),
            ("max_sample", CriterionValue::Float(v)) => Err(GridError::InvalidCriterion(format!(
                "an integer value is expected for max_sample, got {}",
                v
            ))),
            ("min_sample_area", value) => {
                let area = match value {
                    CriterionValue::Int(v) => v as f64,
                    CriterionValue::Float(v) => v,
                };
                if area.is_finite() && area > 0.0 {
                    Ok(Criterion::MinSampleArea(area))
                } else {
                    Err(GridError::InvalidCriterion(format!(
                        "min_sample_area must be a positive area, got {}",
                        area
                    )))
                }
            }
            (name, _) => Err(GridError::InvalidCriterion(format!(
                "unknown criterion '{}', expected one of {:?}",
                name,
                Criterion::NAMES
            ))),
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Criterion::MaxSample(_) => Criterion::NAMES[0],
            Criterion::MinSampleArea(_) => Criterion::NAMES[1],
        }
    }
    fn keep_splitting(&self, level: &TiledLayer) -> bool {
        match *self {
            Criterion::MaxSample(max) => level.len() as u64 <= max,
            // all tiles of a level share the same area
            Criterion::MinSampleArea(min_area) => level
                .tiles
                .first()
                .map_or(false, |tile| tile.area() >= min_area),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::MaxSample(v) => write!(f, "{}={}", self.name(), v),
            Criterion::MinSampleArea(v) => write!(f, "{}={}", self.name(), v),
        }
    }
}

/// Child quadrants of `tile`: south-east, north-east, south-west, north-west
pub fn quadrants(tile: &Tile) -> [Tile; 4] {
    let ext = &tile.extent;
    let (midx, midy) = ext.center();
    let child = |suffix: u8, extent: Extent| Tile::with_id(&format!("{}{}", tile.id, suffix), extent);
    [
        child(0, Extent::new(midx, ext.miny, ext.maxx, midy)),
        child(1, Extent::new(midx, midy, ext.maxx, ext.maxy)),
        child(2, Extent::new(ext.minx, ext.miny, midx, midy)),
        child(3, Extent::new(ext.minx, midy, midx, ext.maxy)),
    ]
}

/// Tiled layers of all levels of a quad tree
#[derive(Clone, Debug)]
pub struct QuadTree {
    pub srid: i32,
    levels: Vec<TiledLayer>,
}

pub const ROOT_TILE_ID: &str = "0";

impl QuadTree {
    /// Subdivide `bounds` level by level until `criterion` stops
    pub fn build(bounds: &Extent, criterion: &Criterion, srid: i32) -> QuadTree {
        let root = Tile::with_id(ROOT_TILE_ID, bounds.clone());
        let mut levels = vec![TiledLayer::new(srid, vec![root])];
        loop {
            let current = &levels[levels.len() - 1];
            if !criterion.keep_splitting(current) {
                break;
            }
            let tiles = current.iter().flat_map(|tile| quadrants(tile).to_vec()).collect();
            levels.push(TiledLayer::new(srid, tiles));
        }
        QuadTree { srid, levels }
    }
    /// Tree with the given levels
    pub fn from_levels(srid: i32, levels: Vec<TiledLayer>) -> QuadTree {
        QuadTree { srid, levels }
    }
    /// Index of the deepest level
    pub fn last_level(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }
    pub fn level(&self, level: usize) -> Option<&TiledLayer> {
        self.levels.get(level)
    }
    pub fn levels(&self) -> &[TiledLayer] {
        &self.levels
    }
    /// Tree keeping only the tiles matching `keep` on every level
    pub fn filtered<F>(&self, mut keep: F) -> QuadTree
    where
        F: FnMut(&Tile) -> bool,
    {
        let levels = self.levels.iter().map(|l| l.filtered(&mut keep)).collect();
        QuadTree::from_levels(self.srid, levels)
    }
}
