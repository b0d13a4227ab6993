//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Weighted cyclic walk over tile indices
//!
//! Every index owns a segment of a circular number line proportional to its
//! weight. The walk advances a fixed interval per step and yields the index
//! owning the pointer.

use crate::core::error::{SamplerError, SamplerResult};

/// Per-tile weights with their cumulative sums
#[derive(PartialEq, Clone, Debug)]
pub struct WeightedFrame {
    weights: Vec<f64>,
    cumsum: Vec<f64>,
}

impl WeightedFrame {
    pub fn new(weights: Vec<f64>) -> SamplerResult<WeightedFrame> {
        if weights.is_empty() {
            return Err(SamplerError::config("weights must not be empty"));
        }
        if let Some((idx, w)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w > 0.0))
        {
            return Err(SamplerError::config(format!(
                "weight {} of tile {} must be positive",
                w, idx
            )));
        }
        let cumsum = weights
            .iter()
            .scan(0.0, |sum, w| {
                *sum += w;
                Some(*sum)
            })
            .collect();
        Ok(WeightedFrame { weights, cumsum })
    }
    pub fn uniform(len: usize) -> SamplerResult<WeightedFrame> {
        WeightedFrame::new(vec![1.0; len])
    }
    pub fn len(&self) -> usize {
        self.weights.len()
    }
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
    pub fn cumsum(&self) -> &[f64] {
        &self.cumsum
    }
    /// Length of the number line
    pub fn total(&self) -> f64 {
        self.cumsum[self.cumsum.len() - 1]
    }
    /// Start of the segment `[c[i] - w[i], c[i])` owned by `idx`
    pub fn left_edge(&self, idx: usize) -> f64 {
        self.cumsum[idx] - self.weights[idx]
    }
    /// Index owning `pointer`, scanning forward from `from`
    fn locate(&self, pointer: f64, from: usize) -> usize {
        let last = self.len() - 1;
        let mut idx = from.min(last);
        while idx < last && pointer >= self.cumsum[idx] {
            idx += 1;
        }
        idx
    }
}

/// Result of pulling the next index
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Step {
    Value(usize),
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct WeightedCyclicIterator {
    frame: WeightedFrame,
    interval: f64,
    max_cycle: u32,
    start_pointer: f64,
    pointer: f64,
    index: usize,
    /// Number of advances since the start
    steps: u64,
    started: bool,
    exhausted: bool,
}

impl WeightedCyclicIterator {
    pub fn new(
        weights: Vec<f64>,
        interval: f64,
        started_point: usize,
        max_cycle: u32,
    ) -> SamplerResult<WeightedCyclicIterator> {
        WeightedCyclicIterator::from_frame(WeightedFrame::new(weights)?, interval, started_point, max_cycle)
    }

    pub fn from_frame(
        frame: WeightedFrame,
        interval: f64,
        started_point: usize,
        max_cycle: u32,
    ) -> SamplerResult<WeightedCyclicIterator> {
        if !(interval.is_finite() && interval > 0.0) {
            return Err(SamplerError::config(format!(
                "interval must be positive, got {}",
                interval
            )));
        }
        if max_cycle < 1 {
            return Err(SamplerError::config("max_cycle must be at least 1"));
        }
        if started_point >= frame.len() {
            return Err(SamplerError::config(format!(
                "starting point {} out of range for {} tiles",
                started_point,
                frame.len()
            )));
        }
        let start_pointer = frame.left_edge(started_point);
        debug!(
            "weighted walk over {} tiles, total weight {}, start pointer {}",
            frame.len(),
            frame.total(),
            start_pointer
        );
        Ok(WeightedCyclicIterator {
            frame,
            interval,
            max_cycle,
            start_pointer,
            pointer: start_pointer,
            index: started_point,
            steps: 0,
            started: false,
            exhausted: false,
        })
    }

    pub fn frame(&self) -> &WeightedFrame {
        &self.frame
    }

    /// Completed turns around the number line
    pub fn cycles(&self) -> u64 {
        (self.steps as f64 * self.interval / self.frame.total()).floor() as u64
    }

    pub fn next_step(&mut self) -> Step {
        if self.exhausted {
            return Step::Exhausted;
        }
        if !self.started {
            self.started = true;
            return Step::Value(self.index);
        }
        self.steps += 1;
        // The pointer passes the start pointer once per turn on the unwrapped line
        if self.cycles() >= u64::from(self.max_cycle) {
            debug!("weighted walk exhausted after {} cycles", self.max_cycle);
            self.exhausted = true;
            return Step::Exhausted;
        }
        let total = self.frame.total();
        let pointer = (self.start_pointer + self.steps as f64 * self.interval) % total;
        let from = if pointer < self.pointer { 0 } else { self.index };
        self.pointer = pointer;
        self.index = self.frame.locate(pointer, from);
        Step::Value(self.index)
    }
}

impl Iterator for WeightedCyclicIterator {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.next_step() {
            Step::Value(idx) => Some(idx),
            Step::Exhausted => None,
        }
    }
}
