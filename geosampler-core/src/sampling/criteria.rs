//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Mask driven acceptance of tiles and polygons

use crate::core::error::{SamplerError, SamplerResult};
use crate::core::feature::{FeatureLayer, PolygonIndex};
use crate::core::geom::{self, extent_polygon};
use std::collections::{BTreeMap, HashSet};
use tile_grid::Tile;

/// Number of samples to collect, in total or per category
#[derive(PartialEq, Clone, Debug)]
pub enum Quota {
    Count(u64),
    PerCategory(BTreeMap<String, u64>),
}

/// Samples collected so far
#[derive(PartialEq, Clone, Debug)]
pub enum Accumulator {
    Count(u64),
    PerCategory(BTreeMap<String, u64>),
}

impl Quota {
    /// Empty accumulator matching this quota
    pub fn accumulator(&self) -> Accumulator {
        match self {
            Quota::Count(_) => Accumulator::Count(0),
            Quota::PerCategory(targets) => {
                Accumulator::PerCategory(targets.keys().map(|k| (k.clone(), 0)).collect())
            }
        }
    }
    pub fn reached(&self, acc: &Accumulator) -> bool {
        match (self, acc) {
            (Quota::Count(target), Accumulator::Count(count)) => count >= target,
            (Quota::PerCategory(targets), Accumulator::PerCategory(counts)) => targets
                .iter()
                .all(|(category, target)| counts.get(category).copied().unwrap_or(0) >= *target),
            _ => false,
        }
    }
    /// True if more samples of `category` are wanted
    pub fn wants(&self, category: &str, acc: &Accumulator) -> bool {
        match (self, acc) {
            (Quota::Count(_), _) => true,
            (Quota::PerCategory(targets), Accumulator::PerCategory(counts)) => {
                match targets.get(category) {
                    Some(target) => counts.get(category).copied().unwrap_or(0) < *target,
                    None => false,
                }
            }
            (Quota::PerCategory(_), Accumulator::Count(_)) => false,
        }
    }
}

impl Accumulator {
    /// Count one sample, of `category` for per category quotas
    pub fn credit(&mut self, category: Option<&str>) {
        match self {
            Accumulator::Count(count) => *count += 1,
            Accumulator::PerCategory(counts) => {
                if let Some(category) = category {
                    *counts.entry(category.to_string()).or_insert(0) += 1;
                }
            }
        }
    }
    pub fn total(&self) -> u64 {
        match self {
            Accumulator::Count(count) => *count,
            Accumulator::PerCategory(counts) => counts.values().sum(),
        }
    }
}

/// Inclusive bounds of the fraction of a tile covered by the mask
#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Thresholds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Thresholds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> SamplerResult<Thresholds> {
        for value in min.iter().chain(max.iter()) {
            if !(0.0..=1.0).contains(value) {
                return Err(SamplerError::config(format!(
                    "mask threshold {} must be a fraction between 0 and 1",
                    value
                )));
            }
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(SamplerError::config(format!(
                    "min_threshold {} is greater than max_threshold {}",
                    min, max
                )));
            }
        }
        Ok(Thresholds { min, max })
    }
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
    pub fn accepts(&self, fraction: f64) -> bool {
        match (self.min, self.max) {
            (None, None) => fraction > 0.0,
            (Some(min), None) => fraction >= min,
            (None, Some(max)) => fraction <= max,
            (Some(min), Some(max)) => fraction >= min && fraction <= max,
        }
    }
}

/// Mask layer with its spatial index
pub struct Mask {
    layer: FeatureLayer,
    index: PolygonIndex,
}

impl Mask {
    pub fn new(layer: FeatureLayer) -> Mask {
        let index = PolygonIndex::new(&layer);
        Mask { layer, index }
    }
    pub fn layer(&self) -> &FeatureLayer {
        &self.layer
    }
    /// Positions of the mask features intersecting `tile`
    pub fn intersecting(&self, tile: &Tile) -> Vec<usize> {
        self.index.intersecting(&extent_polygon(&tile.extent))
    }
    /// Fraction of `tile` covered by the mask
    pub fn coverage(&self, tile: &Tile) -> f64 {
        let area = tile.area();
        if area <= 0.0 {
            return 0.0;
        }
        let bbox = extent_polygon(&tile.extent);
        let hits = self.index.intersecting(&bbox);
        if hits.is_empty() {
            return 0.0;
        }
        let covering = geom::union_all(
            hits.iter()
                .filter_map(|idx| self.index.polygons(*idx))
                .cloned(),
        );
        (geom::intersection_area(&bbox, &covering) / area).min(1.0)
    }
}

/// Acceptance rules of a systematic sampling
pub struct MaskCriteria {
    mask: Option<Mask>,
    thresholds: Thresholds,
    category_field: Option<String>,
    quota: Quota,
}

impl MaskCriteria {
    pub fn new(
        mask: Option<FeatureLayer>,
        thresholds: Thresholds,
        category_field: Option<String>,
        quota: Quota,
    ) -> SamplerResult<MaskCriteria> {
        if mask.is_none() {
            if category_field.is_some() {
                return Err(SamplerError::config("category_field requires a mask"));
            }
            if !thresholds.is_empty() {
                return Err(SamplerError::config("mask thresholds require a mask"));
            }
        }
        if let Quota::PerCategory(ref targets) = quota {
            if category_field.is_none() {
                return Err(SamplerError::config(
                    "a quota per category requires category_field",
                ));
            }
            if targets.is_empty() {
                return Err(SamplerError::config("quota per category is empty"));
            }
        }
        if let Some(ref layer) = mask {
            if category_field.is_some() && !thresholds.is_empty() {
                warn!(
                    "min_threshold and max_threshold are not used when sampling polygons of mask '{}'",
                    layer.name
                );
            }
            if layer.features.iter().all(|f| geom::polygons(&f.geometry).0.is_empty()) {
                warn!("mask '{}' contains no polygons", layer.name);
            }
        }
        Ok(MaskCriteria {
            mask: mask.map(Mask::new),
            thresholds,
            category_field,
            quota,
        })
    }
    /// Accept every tile until `quota` is reached
    pub fn unmasked(quota: Quota) -> SamplerResult<MaskCriteria> {
        MaskCriteria::new(None, Thresholds::default(), None, quota)
    }
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }
    pub fn quota(&self) -> &Quota {
        &self.quota
    }
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }
    /// Sampling picks mask polygons, not only tiles
    pub fn is_polygon_mode(&self) -> bool {
        self.mask.is_some() && self.category_field.is_some()
    }
    /// Category of mask feature `idx`
    pub fn category(&self, idx: usize) -> Option<String> {
        let field = self.category_field.as_ref()?;
        let mask = self.mask.as_ref()?;
        mask.layer
            .features
            .get(idx)?
            .attribute(field)
            .map(|value| value.label())
    }
    /// Fraction of `tile` covered by the mask, 0 without mask
    pub fn coverage(&self, tile: &Tile) -> f64 {
        self.mask.as_ref().map_or(0.0, |mask| mask.coverage(tile))
    }
    /// Box sampling acceptance of `tile`
    pub fn box_reach_criteria(&self, tile: &Tile) -> bool {
        match self.mask {
            None => true,
            Some(ref mask) => self.thresholds.accepts(mask.coverage(tile)),
        }
    }
    /// Mask features intersecting `tile` which may still be picked
    pub fn candidates(
        &self,
        tile: &Tile,
        picked: &HashSet<usize>,
        oversampling: bool,
        acc: &Accumulator,
    ) -> Vec<usize> {
        let mask = match self.mask {
            Some(ref mask) => mask,
            None => return Vec::new(),
        };
        mask.intersecting(tile)
            .into_iter()
            .filter(|idx| oversampling || !picked.contains(idx))
            .filter(|idx| match self.quota {
                Quota::Count(_) => true,
                Quota::PerCategory(_) => self
                    .category(*idx)
                    .map_or(false, |category| self.quota.wants(&category, acc)),
            })
            .collect()
    }
    pub fn target_reached(&self, acc: &Accumulator) -> bool {
        self.quota.reached(acc)
    }
}
