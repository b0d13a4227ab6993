//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Sampling strategies over tiled layers

pub mod criteria;
pub mod session;
pub mod strategy;
pub mod weighted;

#[cfg(test)]
mod weighted_test;

pub use self::criteria::{Accumulator, Mask, MaskCriteria, Quota, Thresholds};
pub use self::session::{Pull, SamplingSession};
pub use self::strategy::{
    GridSampling, RandomSampling, SampleMapping, SampleOutput, Sampling, SystematicOptions,
    SystematicSampling, Weights,
};
pub use self::weighted::{Step, WeightedCyclicIterator, WeightedFrame};

use crate::core::config::{ApplicationCfg, MaskCfg, QuotaCfg, SamplingCfg, WeightsCfg};
use crate::core::error::{SamplerError, SamplerResult};
use crate::core::Config;
use crate::datasource;
use crate::tiler::TilingSource;

impl Weights {
    pub fn from_config(weights: Option<&WeightsCfg>) -> SamplerResult<Weights> {
        match weights {
            None => Ok(Weights::Uniform),
            Some(WeightsCfg::Values(values)) => Ok(Weights::Values(values.clone())),
            Some(WeightsCfg::Named(name)) => match name.as_str() {
                "uniform" => Ok(Weights::Uniform),
                "mask_coverage" => Ok(Weights::MaskCoverage),
                _ => Err(SamplerError::config(format!(
                    "unknown weights '{}', expected uniform, mask_coverage or a list",
                    name
                ))),
            },
        }
    }
}

impl MaskCriteria {
    /// Criteria of a mask configuration, `n_sample` being the default quota
    pub fn from_config(mask_cfg: Option<&MaskCfg>, n_sample: usize) -> SamplerResult<MaskCriteria> {
        let default_quota = Quota::Count(n_sample as u64);
        let mask_cfg = match mask_cfg {
            Some(mask_cfg) => mask_cfg,
            None => return MaskCriteria::unmasked(default_quota),
        };
        let quota = match mask_cfg.quota {
            Some(QuotaCfg::Count(count)) => Quota::Count(count),
            Some(QuotaCfg::PerCategory(ref targets)) => Quota::PerCategory(targets.clone()),
            None => default_quota,
        };
        let thresholds = Thresholds::new(mask_cfg.min_threshold, mask_cfg.max_threshold)?;
        let layer = datasource::read_layer(&mask_cfg.path)?;
        MaskCriteria::new(Some(layer), thresholds, mask_cfg.category_field.clone(), quota)
    }
}

impl Sampling {
    /// Sampling of `tiling` as configured in `[sampling]` and `[mask]`
    pub fn from_tiling(
        tiling: TilingSource,
        sampling_cfg: &SamplingCfg,
        mask_cfg: Option<&MaskCfg>,
    ) -> SamplerResult<Sampling> {
        if sampling_cfg.method != "systematic" && mask_cfg.is_some() {
            warn!("mask is only used by systematic sampling, ignoring it");
        }
        match sampling_cfg.method.as_str() {
            "grid" => Ok(Sampling::Grid(GridSampling::new(tiling, sampling_cfg.centroids)?)),
            "random" => Ok(Sampling::Random(RandomSampling::new(
                tiling,
                sampling_cfg.n_sample,
                sampling_cfg.seed,
                sampling_cfg.centroids,
            )?)),
            "systematic" => {
                let criteria = MaskCriteria::from_config(mask_cfg, sampling_cfg.n_sample)?;
                let weights = Weights::from_config(sampling_cfg.weights.as_ref())?;
                let options = SystematicOptions {
                    interval: sampling_cfg.interval,
                    starting_point: sampling_cfg.starting_point,
                    max_cycle: sampling_cfg.max_cycle,
                    oversampling: sampling_cfg.oversampling,
                    seed: sampling_cfg.seed,
                };
                Ok(Sampling::Systematic(SystematicSampling::new(
                    tiling, criteria, weights, options,
                )?))
            }
            other => Err(SamplerError::config(format!(
                "unknown sampling method '{}', expected grid, random or systematic",
                other
            ))),
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for Sampling {
    fn from_config(config: &ApplicationCfg) -> SamplerResult<Self> {
        let tiling = TilingSource::from_config(&config.tiler)?;
        let sampling_cfg = config.sampling.clone().unwrap_or_default();
        Sampling::from_tiling(tiling, &sampling_cfg, config.mask.as_ref())
    }

    fn gen_config() -> String {
        let toml = r#"
[sampling]
# grid, random or systematic
method = "systematic"
# Add centroid layers (grid, random)
centroids = true
# Number of samples (random) or default quota (systematic)
n_sample = 50
#seed = 42
# Step on the weighted number line (systematic)
interval = 1
oversampling = false
# Fixed starting tile, random if unset
#starting_point = 0
max_cycle = 1
# uniform, mask_coverage or a list of per tile weights
weights = "uniform"

#[mask]
#path = "mask.geojson"
# Fraction of a tile covered by the mask (box sampling)
#min_threshold = 0.2
#max_threshold = 1.0
# Pick mask polygons per category (polygon sampling)
#category_field = "class"
#quota = { forest = 10, water = 5 }
"#;
        toml.to_string()
    }
}
