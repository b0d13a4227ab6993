//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::sampling::criteria::{Accumulator, Quota};
use crate::sampling::weighted::{Step, WeightedCyclicIterator};
use std::collections::HashSet;

/// Outcome of pulling the next tile of a session
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Pull {
    Index(usize),
    /// Tile already visited, oversampling disabled
    Skip,
    Exhausted,
}

/// State of one systematic sampling run
pub struct SamplingSession {
    iterator: WeightedCyclicIterator,
    oversampling: bool,
    quota: Quota,
    accumulator: Accumulator,
    visited: HashSet<usize>,
    picked_features: HashSet<usize>,
    tiles: Vec<usize>,
    features: Vec<usize>,
    skipped: u64,
}

impl SamplingSession {
    pub fn new(iterator: WeightedCyclicIterator, oversampling: bool, quota: Quota) -> SamplingSession {
        let accumulator = quota.accumulator();
        SamplingSession {
            iterator,
            oversampling,
            quota,
            accumulator,
            visited: HashSet::new(),
            picked_features: HashSet::new(),
            tiles: Vec::new(),
            features: Vec::new(),
            skipped: 0,
        }
    }
    pub fn pull(&mut self) -> Pull {
        match self.iterator.next_step() {
            Step::Exhausted => Pull::Exhausted,
            Step::Value(idx) => {
                if self.visited.insert(idx) || self.oversampling {
                    Pull::Index(idx)
                } else {
                    self.skipped += 1;
                    Pull::Skip
                }
            }
        }
    }
    pub fn oversampling(&self) -> bool {
        self.oversampling
    }
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
    pub fn picked_features(&self) -> &HashSet<usize> {
        &self.picked_features
    }
    pub fn target_reached(&self) -> bool {
        self.quota.reached(&self.accumulator)
    }
    /// Record an accepted tile
    pub fn record_tile(&mut self, tile: usize) {
        self.accumulator.credit(None);
        self.tiles.push(tile);
    }
    /// Record an accepted tile with the mask feature picked in it
    pub fn record_feature(&mut self, tile: usize, feature: usize, category: Option<&str>) {
        self.accumulator.credit(category);
        self.tiles.push(tile);
        self.features.push(feature);
        self.picked_features.insert(feature);
    }
    /// Accepted tiles and features in acceptance order
    pub fn finish(self) -> (Vec<usize>, Vec<usize>) {
        debug!(
            "session finished: {} tiles, {} features, {} skipped",
            self.tiles.len(),
            self.features.len(),
            self.skipped
        );
        (self.tiles, self.features)
    }
}
