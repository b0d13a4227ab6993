//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Extents, tile specifications and tiled layers

use crate::grid_iterator::TileIterator;
use thiserror::Error;

/// Tiling configuration errors
#[derive(Error, PartialEq, Clone, Debug)]
pub enum GridError {
    #[error("invalid tile specification: {0}")]
    InvalidTileSpec(String),
    #[error("invalid quad tree criterion: {0}")]
    InvalidCriterion(String),
}

/// Geographic extent
#[derive(PartialEq, Clone, Debug)]
pub struct Extent {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl Extent {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Extent {
        Extent {
            minx,
            miny,
            maxx,
            maxy,
        }
    }
    pub fn width(&self) -> f64 {
        self.maxx - self.minx
    }
    pub fn height(&self) -> f64 {
        self.maxy - self.miny
    }
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
    /// True if the extent has no interior on at least one axis
    pub fn is_degenerate(&self) -> bool {
        !(self.maxx > self.minx && self.maxy > self.miny)
    }
    /// Extent grown by `dx` horizontally and `dy` vertically on each side
    pub fn buffered(&self, dx: f64, dy: f64) -> Extent {
        Extent {
            minx: self.minx - dx,
            miny: self.miny - dy,
            maxx: self.maxx + dx,
            maxy: self.maxy + dy,
        }
    }
    /// Containment test with an absolute tolerance
    pub fn contains(&self, other: &Extent, tolerance: f64) -> bool {
        other.minx >= self.minx - tolerance
            && other.miny >= self.miny - tolerance
            && other.maxx <= self.maxx + tolerance
            && other.maxy <= self.maxy + tolerance
    }
    pub fn center(&self) -> (f64, f64) {
        (
            self.minx + self.width() / 2.0,
            self.miny + self.height() / 2.0,
        )
    }
}

/// Tile size and overlap per axis
#[derive(PartialEq, Clone, Debug)]
pub struct TileSpec {
    size_x: f64,
    size_y: f64,
    overlap_x: f64,
    overlap_y: f64,
    /// Drop tiles reaching past the (overlap buffered) extent
    strict_inclusion: bool,
}

impl TileSpec {
    pub fn new(
        size_x: f64,
        size_y: f64,
        overlap_x: f64,
        overlap_y: f64,
        strict_inclusion: bool,
    ) -> Result<TileSpec, GridError> {
        for (axis, size, overlap) in &[("x", size_x, overlap_x), ("y", size_y, overlap_y)] {
            if !(size.is_finite() && *size > 0.0) {
                return Err(GridError::InvalidTileSpec(format!(
                    "tile size {} on axis {} must be positive",
                    size, axis
                )));
            }
            if !(overlap.is_finite() && *overlap >= 0.0) {
                return Err(GridError::InvalidTileSpec(format!(
                    "overlap {} on axis {} must not be negative",
                    overlap, axis
                )));
            }
            if 2.0 * overlap >= *size {
                return Err(GridError::InvalidTileSpec(format!(
                    "overlap {} on axis {} must be smaller than half the tile size {}",
                    overlap, axis, size
                )));
            }
        }
        Ok(TileSpec {
            size_x,
            size_y,
            overlap_x,
            overlap_y,
            strict_inclusion,
        })
    }
    /// Same size and overlap on both axes
    pub fn square(size: f64, overlap: f64, strict_inclusion: bool) -> Result<TileSpec, GridError> {
        TileSpec::new(size, size, overlap, overlap, strict_inclusion)
    }
    pub fn size(&self) -> (f64, f64) {
        (self.size_x, self.size_y)
    }
    pub fn overlap(&self) -> (f64, f64) {
        (self.overlap_x, self.overlap_y)
    }
    pub fn strict_inclusion(&self) -> bool {
        self.strict_inclusion
    }
    /// Distance between the left (bottom) edges of neighbouring tiles
    pub fn step(&self) -> (f64, f64) {
        (
            self.size_x - 2.0 * self.overlap_x,
            self.size_y - 2.0 * self.overlap_y,
        )
    }
    /// Lazy tiling of `extent`
    pub fn tiles(&self, extent: &Extent) -> TileIterator {
        TileIterator::new(extent.clone(), self.clone())
    }
}

/// Tile with an id derived from its corner coordinates
#[derive(PartialEq, Clone, Debug)]
pub struct Tile {
    pub id: String,
    pub extent: Extent,
}

impl Tile {
    /// Tile with id `"{left}-{bottom}-{right}-{top}"`
    pub fn new(extent: Extent) -> Tile {
        let id = format!(
            "{:?}-{:?}-{:?}-{:?}",
            extent.minx, extent.miny, extent.maxx, extent.maxy
        );
        Tile { id, extent }
    }
    pub fn with_id(id: &str, extent: Extent) -> Tile {
        Tile {
            id: id.to_string(),
            extent,
        }
    }
    pub fn area(&self) -> f64 {
        self.extent.area()
    }
}

/// Tiles sharing one spatial reference system
#[derive(PartialEq, Clone, Debug)]
pub struct TiledLayer {
    /// Spatial reference system (EPSG code)
    pub srid: i32,
    pub tiles: Vec<Tile>,
}

impl TiledLayer {
    pub fn new(srid: i32, tiles: Vec<Tile>) -> TiledLayer {
        TiledLayer { srid, tiles }
    }
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    pub fn get(&self, idx: usize) -> Option<&Tile> {
        self.tiles.get(idx)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }
    pub fn ids(&self) -> Vec<&str> {
        self.tiles.iter().map(|t| t.id.as_str()).collect()
    }
    pub fn total_area(&self) -> f64 {
        self.tiles.iter().map(|t| t.area()).sum()
    }
    /// Layer with the tiles matching `keep`
    pub fn filtered<F>(&self, mut keep: F) -> TiledLayer
    where
        F: FnMut(&Tile) -> bool,
    {
        TiledLayer {
            srid: self.srid,
            tiles: self.tiles.iter().filter(|t| keep(t)).cloned().collect(),
        }
    }
    /// Layer with the tiles at the given positions, in that order
    pub fn select(&self, indices: &[usize]) -> TiledLayer {
        TiledLayer {
            srid: self.srid,
            tiles: indices
                .iter()
                .filter_map(|idx| self.tiles.get(*idx))
                .cloned()
                .collect(),
        }
    }
}
