//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::*;
use std::collections::BTreeMap;

#[test]
fn test_load_config() {
    let config = read_config("../geosampler-service/src/test/example.toml");
    println!("{:#?}", config);
    let config: ApplicationCfg = config.expect("load_config returned Err");
    assert_eq!(config.tiler.tiler_type, "quadtree");
    assert_eq!(config.tiler.criterion, Some("max_sample".to_string()));
    assert_eq!(config.tiler.criterion_value, Some(CriterionValueCfg::Int(16)));
    assert_eq!(config.tiler.srid, Some(2154));
    assert!(config.tiler.strict_inclusion);
    assert_eq!(config.tiler.predicate, "intersects");
    let sampling = config.sampling.unwrap();
    assert_eq!(sampling.method, "systematic");
    assert_eq!(sampling.interval, 2.5);
    assert_eq!(sampling.starting_point, Some(0));
    assert_eq!(sampling.max_cycle, 2);
    assert_eq!(sampling.weights, Some(WeightsCfg::Named("mask_coverage".to_string())));
    let mask = config.mask.unwrap();
    assert_eq!(mask.category_field, Some("class".to_string()));
    let mut quota = BTreeMap::new();
    quota.insert("forest".to_string(), 2);
    quota.insert("water".to_string(), 1);
    assert_eq!(mask.quota, Some(QuotaCfg::PerCategory(quota)));
    assert_eq!(config.output.unwrap().driver, "GeoJSON");
}

#[test]
fn test_parse_error() {
    let config: Result<ApplicationCfg, _> = read_config("src/core/mod.rs");
    assert!(config.err().unwrap().starts_with("src/core/mod.rs - "));

    let config: Result<ApplicationCfg, _> = read_config("wrongfile");
    assert_eq!("Could not find config file!", config.err().unwrap());

    let config: Result<ApplicationCfg, _> = parse_config("[sampling]\n".to_string(), "");
    assert_eq!(" - missing field `tiler`", config.err().unwrap());
}

#[test]
fn test_defaults() {
    let toml = r#"
        [tiler]
        tile_size = 100
        bounds = [0, 0, 500, 500]

        [sampling]
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.tiler.tiler_type, "grid");
    assert_eq!(config.tiler.tile_size, Some(AxisCfg::Both(100.0)));
    assert_eq!(config.tiler.overlap, None);
    assert_eq!(
        config.tiler.bounds,
        Some(BoundsCfg::Values(vec![0.0, 0.0, 500.0, 500.0]))
    );
    let sampling = config.sampling.unwrap();
    assert_eq!(sampling.method, "grid");
    assert!(sampling.centroids);
    assert_eq!(sampling.n_sample, 50);
    assert_eq!(sampling.interval, 1.0);
    assert!(!sampling.oversampling);
    assert_eq!(sampling.max_cycle, 1);
    assert!(config.mask.is_none());
}

#[test]
fn test_value_variants() {
    let toml = r#"
        [tiler]
        tile_size = [200, 100.5]
        overlap = 10
        bounds = { minx = -10, miny = -20, maxx = 10, maxy = 20 }
        criterion_value = 2500.5

        [sampling]
        weights = [1, 2.5, 3]

        [mask]
        path = "mask.geojson"
        min_threshold = 0.25
        quota = 12
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.tiler.tile_size.unwrap().xy(), (200.0, 100.5));
    assert_eq!(config.tiler.overlap.unwrap().xy(), (10.0, 10.0));
    assert_eq!(
        config.tiler.bounds,
        Some(BoundsCfg::Extent(ExtentCfg {
            minx: -10.0,
            miny: -20.0,
            maxx: 10.0,
            maxy: 20.0
        }))
    );
    assert_eq!(config.tiler.criterion_value, Some(CriterionValueCfg::Float(2500.5)));
    assert_eq!(
        config.sampling.unwrap().weights,
        Some(WeightsCfg::Values(vec![1.0, 2.5, 3.0]))
    );
    let mask = config.mask.unwrap();
    assert_eq!(mask.min_threshold, Some(0.25));
    assert_eq!(mask.max_threshold, None);
    assert_eq!(mask.quota, Some(QuotaCfg::Count(12)));
}

#[test]
fn test_env_vars() {
    std::env::set_var("GEOSAMPLER_TEST_SRID", "31467");
    let toml = r#"
        [tiler]
        srid = {{ env.GEOSAMPLER_TEST_SRID }}
        "#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    assert_eq!(config.tiler.srid, Some(31467));

    let toml = r#"
        [tiler]
        srid = ${GEOSAMPLER_TEST_SRID}
        "#;
    let config: Result<ApplicationCfg, _> = parse_config(toml.to_string(), "");
    assert_eq!(
        "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`",
        config.err().unwrap()
    );
}

#[test]
fn test_default_config() {
    let config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "").unwrap();
    assert_eq!(config.tiler.tile_size, Some(AxisCfg::Both(256.0)));
    assert_eq!(config.output.unwrap().path, "sample");
}
