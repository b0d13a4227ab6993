//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{SamplerError, SamplerResult};
use crate::core::feature::FeatureLayer;
use crate::sampling::criteria::MaskCriteria;
use crate::sampling::session::{Pull, SamplingSession};
use crate::sampling::weighted::{WeightedCyclicIterator, WeightedFrame};
use crate::tiler::TilingSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tile_grid::TiledLayer;

/// Added to the mask coverage of every tile to keep weights positive
pub const COVERAGE_WEIGHT_FLOOR: f64 = 0.01;

/// Named layers of a systematic sampling
#[derive(Clone, Debug)]
pub struct SampleMapping {
    pub layers: BTreeMap<String, FeatureLayer>,
    pub target_reached: bool,
}

#[derive(Clone, Debug)]
pub enum SampleOutput {
    Layer(FeatureLayer),
    /// Boxes and their centroids
    Pair(FeatureLayer, FeatureLayer),
    Mapping(SampleMapping),
}

impl SampleOutput {
    /// Boxes (with centroids) or a single layer
    fn tiles(name: &str, tiles: &TiledLayer, centroids: bool) -> SampleOutput {
        let boxes = FeatureLayer::from_tiles(name, tiles);
        if centroids {
            SampleOutput::Pair(boxes, FeatureLayer::tile_centroids("centroids", tiles))
        } else {
            SampleOutput::Layer(boxes)
        }
    }
    pub fn layers(&self) -> Vec<&FeatureLayer> {
        match self {
            SampleOutput::Layer(layer) => vec![layer],
            SampleOutput::Pair(boxes, centroids) => vec![boxes, centroids],
            SampleOutput::Mapping(mapping) => mapping.layers.values().collect(),
        }
    }
    pub fn layer(&self, name: &str) -> Option<&FeatureLayer> {
        self.layers().into_iter().find(|layer| layer.name == name)
    }
    /// False if a systematic sampling stopped before reaching its quota
    pub fn target_reached(&self) -> bool {
        match self {
            SampleOutput::Mapping(mapping) => mapping.target_reached,
            _ => true,
        }
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Every tile of the tiling
#[derive(Clone, Debug)]
pub struct GridSampling {
    tiling: TilingSource,
    tiles: TiledLayer,
    centroids: bool,
}

impl GridSampling {
    pub fn new(tiling: TilingSource, centroids: bool) -> SamplerResult<GridSampling> {
        let tiles = tiling.layer()?;
        Ok(GridSampling {
            tiling,
            tiles,
            centroids,
        })
    }
    pub fn sample(&self) -> SampleOutput {
        info!("Grid sampling of {} tiles", self.tiles.len());
        SampleOutput::tiles("boxes", &self.tiles, self.centroids)
    }
}

/// Uniform sample without replacement
#[derive(Clone, Debug)]
pub struct RandomSampling {
    tiling: TilingSource,
    tiles: TiledLayer,
    n_sample: usize,
    seed: Option<u64>,
    centroids: bool,
}

impl RandomSampling {
    pub fn new(
        tiling: TilingSource,
        n_sample: usize,
        seed: Option<u64>,
        centroids: bool,
    ) -> SamplerResult<RandomSampling> {
        let tiles = tiling.layer()?;
        Ok(RandomSampling {
            tiling,
            tiles,
            n_sample,
            seed,
            centroids,
        })
    }
    pub fn sample(&self) -> SampleOutput {
        let population = self.tiles.len();
        if self.n_sample > population {
            warn!(
                "{} samples requested but only {} tiles available, returning all tiles",
                self.n_sample, population
            );
            return SampleOutput::tiles("boxes", &self.tiles, self.centroids);
        }
        let mut rng = rng(self.seed);
        let indices = rand::seq::index::sample(&mut rng, population, self.n_sample).into_vec();
        info!("Random sampling of {} out of {} tiles", indices.len(), population);
        SampleOutput::tiles("boxes", &self.tiles.select(&indices), self.centroids)
    }
}

/// Weights of the tiles on the number line of a systematic sampling
#[derive(PartialEq, Clone, Debug)]
pub enum Weights {
    Uniform,
    Values(Vec<f64>),
    /// Fraction of the tile covered by the mask, plus a floor
    MaskCoverage,
}

#[derive(PartialEq, Clone, Debug)]
pub struct SystematicOptions {
    pub interval: f64,
    /// Random start if unset
    pub starting_point: Option<usize>,
    pub max_cycle: u32,
    pub oversampling: bool,
    pub seed: Option<u64>,
}

impl Default for SystematicOptions {
    fn default() -> SystematicOptions {
        SystematicOptions {
            interval: 1.0,
            starting_point: None,
            max_cycle: 1,
            oversampling: false,
            seed: None,
        }
    }
}

/// Weighted cyclic walk over the tiles, accepting tiles or mask polygons
pub struct SystematicSampling {
    tiling: TilingSource,
    tiles: TiledLayer,
    frame: WeightedFrame,
    criteria: MaskCriteria,
    options: SystematicOptions,
}

impl SystematicSampling {
    pub fn new(
        tiling: TilingSource,
        criteria: MaskCriteria,
        weights: Weights,
        options: SystematicOptions,
    ) -> SamplerResult<SystematicSampling> {
        let tiles = tiling.layer()?;
        if tiles.is_empty() {
            return Err(SamplerError::config("systematic sampling without tiles"));
        }
        let weights = match weights {
            Weights::Uniform => vec![1.0; tiles.len()],
            Weights::Values(values) => {
                if values.len() != tiles.len() {
                    return Err(SamplerError::config(format!(
                        "{} weights given for {} tiles",
                        values.len(),
                        tiles.len()
                    )));
                }
                values
            }
            Weights::MaskCoverage => {
                if criteria.mask().is_none() {
                    return Err(SamplerError::config("mask_coverage weights require a mask"));
                }
                tiles
                    .iter()
                    .map(|tile| criteria.coverage(tile) + COVERAGE_WEIGHT_FLOOR)
                    .collect()
            }
        };
        let frame = WeightedFrame::new(weights)?;
        if let Some(mask) = criteria.mask() {
            match mask.layer().srid {
                Some(srid) if srid != tiles.srid => warn!(
                    "mask SRID {} differs from tiling SRID {}, no reprojection applied",
                    srid, tiles.srid
                ),
                _ => {}
            }
        }
        // validates interval, max_cycle and starting point
        WeightedCyclicIterator::from_frame(
            frame.clone(),
            options.interval,
            options.starting_point.unwrap_or(0),
            options.max_cycle,
        )?;
        Ok(SystematicSampling {
            tiling,
            tiles,
            frame,
            criteria,
            options,
        })
    }

    pub fn criteria(&self) -> &MaskCriteria {
        &self.criteria
    }

    pub fn frame(&self) -> &WeightedFrame {
        &self.frame
    }

    pub fn sample(&self) -> SamplerResult<SampleOutput> {
        let mut rng = rng(self.options.seed);
        let start = match self.options.starting_point {
            Some(start) => start,
            None => rng.random_range(0..self.tiles.len()),
        };
        let iterator = WeightedCyclicIterator::from_frame(
            self.frame.clone(),
            self.options.interval,
            start,
            self.options.max_cycle,
        )?;
        let mut session = SamplingSession::new(
            iterator,
            self.options.oversampling,
            self.criteria.quota().clone(),
        );
        let polygon_mode = self.criteria.is_polygon_mode();
        info!(
            "Systematic sampling of {} tiles from tile {} ({} mode, quota {:?})",
            self.tiles.len(),
            start,
            if polygon_mode { "polygon" } else { "box" },
            self.criteria.quota()
        );
        while !session.target_reached() {
            let idx = match session.pull() {
                Pull::Skip => continue,
                Pull::Exhausted => {
                    warn!(
                        "Sampling stopped after {} cycles before reaching the target ({:?})",
                        self.options.max_cycle,
                        session.accumulator()
                    );
                    break;
                }
                Pull::Index(idx) => idx,
            };
            let tile = match self.tiles.get(idx) {
                Some(tile) => tile,
                None => continue,
            };
            if polygon_mode {
                let candidates = self.criteria.candidates(
                    tile,
                    session.picked_features(),
                    session.oversampling(),
                    session.accumulator(),
                );
                if candidates.is_empty() {
                    debug!("no candidate polygon in tile {}", tile.id);
                    continue;
                }
                let feature = candidates[rng.random_range(0..candidates.len())];
                let category = self.criteria.category(feature);
                debug!("tile {}: picked feature {} ({:?})", tile.id, feature, category);
                session.record_feature(idx, feature, category.as_deref());
            } else if self.criteria.box_reach_criteria(tile) {
                debug!("tile {} accepted", tile.id);
                session.record_tile(idx);
            } else {
                debug!("tile {} rejected by mask criteria", tile.id);
            }
        }
        let target_reached = session.target_reached();
        let (tile_indices, feature_indices) = session.finish();
        let boxes = self.tiles.select(&tile_indices);
        let mut layers = BTreeMap::new();
        layers.insert(
            "boxes".to_string(),
            FeatureLayer::from_tiles("boxes", &boxes),
        );
        layers.insert(
            "boxes_centroids".to_string(),
            FeatureLayer::tile_centroids("boxes_centroids", &boxes),
        );
        if polygon_mode {
            if let Some(mask) = self.criteria.mask() {
                let srid = mask.layer().srid.or(Some(self.tiles.srid));
                let mut polygons = FeatureLayer::new("polygons", srid);
                polygons.features = feature_indices
                    .iter()
                    .filter_map(|idx| mask.layer().features.get(*idx))
                    .cloned()
                    .collect();
                layers.insert(
                    "polygons_centroids".to_string(),
                    polygons.centroids("polygons_centroids"),
                );
                layers.insert("polygons".to_string(), polygons);
            }
        }
        info!(
            "{} tiles accepted, target {}",
            boxes.len(),
            if target_reached { "reached" } else { "not reached" }
        );
        Ok(SampleOutput::Mapping(SampleMapping {
            layers,
            target_reached,
        }))
    }
}

/// Sampling strategy
pub enum Sampling {
    Grid(GridSampling),
    Random(RandomSampling),
    Systematic(SystematicSampling),
}

impl Sampling {
    pub fn sample(&self) -> SamplerResult<SampleOutput> {
        match self {
            Sampling::Grid(grid) => Ok(grid.sample()),
            Sampling::Random(random) => Ok(random.sample()),
            Sampling::Systematic(systematic) => systematic.sample(),
        }
    }
    pub fn tiling(&self) -> &TilingSource {
        match self {
            Sampling::Grid(grid) => &grid.tiling,
            Sampling::Random(random) => &random.tiling,
            Sampling::Systematic(systematic) => &systematic.tiling,
        }
    }
    /// Tiles to sample from
    pub fn tiles(&self) -> &TiledLayer {
        match self {
            Sampling::Grid(grid) => &grid.tiles,
            Sampling::Random(random) => &random.tiles,
            Sampling::Systematic(systematic) => &systematic.tiles,
        }
    }
}
