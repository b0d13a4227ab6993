//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::SamplerResult;
use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> SamplerResult<Self>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub tiler: TilerCfg,
    pub sampling: Option<SamplingCfg>,
    pub mask: Option<MaskCfg>,
    pub output: Option<OutputCfg>,
}

/// Value applied to both axes or `[x, y]` pair
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum AxisCfg {
    Both(f64),
    PerAxis(f64, f64),
}

impl AxisCfg {
    pub fn xy(&self) -> (f64, f64) {
        match *self {
            AxisCfg::Both(v) => (v, v),
            AxisCfg::PerAxis(x, y) => (x, y),
        }
    }
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct ExtentCfg {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

/// Bounds as `[minx, miny, maxx, maxy]`, WKT polygon or table
#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum BoundsCfg {
    Values(Vec<f64>),
    Wkt(String),
    Extent(ExtentCfg),
}

#[derive(Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(untagged)]
pub enum CriterionValueCfg {
    Int(i64),
    Float(f64),
}

#[derive(Deserialize, Clone, Debug)]
pub struct TilerCfg {
    /// grid or quadtree
    #[serde(rename = "type", default = "default_tiler_type")]
    pub tiler_type: String,
    /// Tile size in ground units (grid)
    pub tile_size: Option<AxisCfg>,
    /// Tile overlap in ground units (grid)
    pub overlap: Option<AxisCfg>,
    /// Drop tiles reaching past the extent (grid)
    #[serde(default = "default_strict_inclusion")]
    pub strict_inclusion: bool,
    /// max_sample or min_sample_area (quadtree)
    pub criterion: Option<String>,
    pub criterion_value: Option<CriterionValueCfg>,
    /// Quad tree level used for sampling (default: last level)
    pub level: Option<usize>,
    pub bounds: Option<BoundsCfg>,
    /// Spatial reference system (EPSG code)
    pub srid: Option<i32>,
    /// Vector file restricting the tiles to its convex hull
    pub extent: Option<String>,
    /// Spatial predicate against the extent hull: intersects or within
    #[serde(default = "default_predicate")]
    pub predicate: String,
}

pub fn default_tiler_type() -> String {
    "grid".to_string()
}

pub fn default_strict_inclusion() -> bool {
    true
}

pub fn default_predicate() -> String {
    "intersects".to_string()
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum WeightsCfg {
    Values(Vec<f64>),
    Named(String),
}

#[derive(Deserialize, Clone, Debug)]
pub struct SamplingCfg {
    /// grid, random or systematic
    #[serde(default = "default_method")]
    pub method: String,
    /// Add a centroid layer to grid and random samples
    #[serde(default = "default_centroids")]
    pub centroids: bool,
    #[serde(default = "default_n_sample")]
    pub n_sample: usize,
    pub seed: Option<u64>,
    /// Step on the weighted number line (systematic)
    #[serde(default = "default_interval")]
    pub interval: f64,
    /// Accept the same tile more than once (systematic)
    #[serde(default)]
    pub oversampling: bool,
    /// Fixed starting tile (systematic, default: random)
    pub starting_point: Option<usize>,
    #[serde(default = "default_max_cycle")]
    pub max_cycle: u32,
    /// uniform, mask_coverage or list of per tile weights
    pub weights: Option<WeightsCfg>,
}

impl Default for SamplingCfg {
    fn default() -> SamplingCfg {
        SamplingCfg {
            method: default_method(),
            centroids: default_centroids(),
            n_sample: default_n_sample(),
            seed: None,
            interval: default_interval(),
            oversampling: false,
            starting_point: None,
            max_cycle: default_max_cycle(),
            weights: None,
        }
    }
}

pub fn default_method() -> String {
    "grid".to_string()
}

pub fn default_centroids() -> bool {
    true
}

pub fn default_n_sample() -> usize {
    50
}

pub fn default_interval() -> f64 {
    1.0
}

pub fn default_max_cycle() -> u32 {
    1
}

#[derive(Deserialize, Clone, PartialEq, Debug)]
#[serde(untagged)]
pub enum QuotaCfg {
    Count(u64),
    PerCategory(BTreeMap<String, u64>),
}

#[derive(Deserialize, Clone, Debug)]
pub struct MaskCfg {
    pub path: String,
    /// Minimal fraction of a tile covered by the mask
    pub min_threshold: Option<f64>,
    /// Maximal fraction of a tile covered by the mask
    pub max_threshold: Option<f64>,
    /// Attribute holding the category of mask features (polygon sampling)
    pub category_field: Option<String>,
    /// Number of samples or number of samples per category (default: n_sample)
    pub quota: Option<QuotaCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OutputCfg {
    /// Output file name prefix
    pub path: String,
    #[serde(default = "default_driver")]
    pub driver: String,
}

pub fn default_driver() -> String {
    "GeoJSON".to_string()
}

pub const DEFAULT_CONFIG: &'static str = r#"
[tiler]
type = "grid"
tile_size = 256
overlap = 0
strict_inclusion = true
bounds = [0.0, 0.0, 1024.0, 1024.0]
srid = 3857

[sampling]
method = "grid"

[output]
path = "sample"
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
