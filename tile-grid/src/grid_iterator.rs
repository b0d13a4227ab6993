//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::{Extent, Tile, TileSpec};

/// Column-by-column iterator over the tiles of a regular grid
///
/// Left edges run from `minx - overlap_x` towards `maxx + overlap_x` (exclusive),
/// bottom edges likewise on the y axis. With strict inclusion, tiles whose far
/// edge passes the buffered extent are dropped.
#[derive(Clone, Debug)]
pub struct TileIterator {
    spec: TileSpec,
    start: (f64, f64),
    limit: (f64, f64),
    eps: (f64, f64),
    nx: usize,
    ny: usize,
    kx: usize,
    ky: usize,
    finished: bool,
}

/// Number of positions `start + k * step` lower than `stop`
fn positions(start: f64, stop: f64, step: f64) -> usize {
    if stop > start {
        let n = (stop - start) / step;
        (n - 4.0 * f64::EPSILON * n.max(1.0)).ceil() as usize
    } else {
        0
    }
}

/// Rounding slack of a far edge compared against `limit`
fn tolerance(limit: f64, size: f64) -> f64 {
    f64::EPSILON * limit.abs().max(size).max(1.0) * 4.0
}

impl TileIterator {
    pub fn new(extent: Extent, spec: TileSpec) -> TileIterator {
        let (overlap_x, overlap_y) = spec.overlap();
        let (step_x, step_y) = spec.step();
        let (size_x, size_y) = spec.size();
        let buffered = extent.buffered(overlap_x, overlap_y);
        let (nx, ny) = if extent.is_degenerate() {
            // Return "empty" iterator for degenerate extents
            (0, 0)
        } else {
            (
                positions(buffered.minx, buffered.maxx, step_x),
                positions(buffered.miny, buffered.maxy, step_y),
            )
        };
        TileIterator {
            spec,
            start: (buffered.minx, buffered.miny),
            limit: (buffered.maxx, buffered.maxy),
            eps: (
                tolerance(buffered.maxx, size_x),
                tolerance(buffered.maxy, size_y),
            ),
            nx,
            ny,
            kx: 0,
            ky: 0,
            finished: nx == 0 || ny == 0,
        }
    }
    /// Rewind to the first tile
    pub fn restart(&mut self) {
        self.kx = 0;
        self.ky = 0;
        self.finished = self.nx == 0 || self.ny == 0;
    }
    /// Number of grid positions visited, including dropped ones
    pub fn positions(&self) -> usize {
        self.nx * self.ny
    }
}

impl Iterator for TileIterator {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        let (size_x, size_y) = self.spec.size();
        let (step_x, step_y) = self.spec.step();
        let strict = self.spec.strict_inclusion();
        loop {
            if self.finished {
                return None;
            }
            if self.kx >= self.nx {
                self.finished = true;
                continue;
            }
            let left = self.start.0 + self.kx as f64 * step_x;
            if strict && left + size_x > self.limit.0 + self.eps.0 {
                // all remaining columns reach even further
                self.finished = true;
                continue;
            }
            if self.ky >= self.ny {
                self.kx += 1;
                self.ky = 0;
                continue;
            }
            let bottom = self.start.1 + self.ky as f64 * step_y;
            self.ky += 1;
            if strict && bottom + size_y > self.limit.1 + self.eps.1 {
                self.ky = self.ny;
                continue;
            }
            return Some(Tile::new(Extent {
                minx: left,
                miny: bottom,
                maxx: left + size_x,
                maxy: bottom + size_y,
            }));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            let visited = self.kx * self.ny + self.ky;
            (0, Some(self.positions().saturating_sub(visited)))
        }
    }
}
