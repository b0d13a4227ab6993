//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::{Extent, GridError};
use crate::quadtree::{Criterion, CriterionValue, QuadTree};

fn max_sample(v: i64) -> Criterion {
    Criterion::parse("max_sample", CriterionValue::Int(v)).unwrap()
}

#[test]
fn test_max_sample() {
    let bounds = Extent::new(0.0, 0.0, 100.0, 100.0);
    let tree = QuadTree::build(&bounds, &max_sample(3), 2154);
    assert_eq!(tree.last_level(), 1);
    assert_eq!(tree.level(0).unwrap().len(), 1);
    assert_eq!(tree.level(1).unwrap().len(), 4);
    assert!(tree.level(2).is_none());

    let tree = QuadTree::build(&bounds, &max_sample(0), 2154);
    assert_eq!(tree.last_level(), 0);
    assert_eq!(tree.level(0).unwrap().tiles[0].extent, bounds);

    let tree = QuadTree::build(&bounds, &max_sample(16), 2154);
    assert_eq!(tree.last_level(), 3);
    assert_eq!(tree.level(3).unwrap().len(), 64);
}

#[test]
fn test_quadrant_order() {
    let bounds = Extent::new(0.0, 0.0, 100.0, 100.0);
    let tree = QuadTree::build(&bounds, &max_sample(4), 3857);
    let level1 = tree.level(1).unwrap();
    assert_eq!(level1.ids(), vec!["00", "01", "02", "03"]);
    // south-east, north-east, south-west, north-west
    assert_eq!(level1.tiles[0].extent, Extent::new(50.0, 0.0, 100.0, 50.0));
    assert_eq!(level1.tiles[1].extent, Extent::new(50.0, 50.0, 100.0, 100.0));
    assert_eq!(level1.tiles[2].extent, Extent::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(level1.tiles[3].extent, Extent::new(0.0, 50.0, 50.0, 100.0));

    let level2 = tree.level(2).unwrap();
    assert_eq!(&level2.ids()[0..5], &["000", "001", "002", "003", "010"]);
    assert_eq!(level2.tiles[0].extent, Extent::new(75.0, 0.0, 100.0, 25.0));
    assert_eq!(level2.srid, 3857);
}

#[test]
fn test_levels_preserve_area() {
    let bounds = Extent::new(506880.00000000914, 6286848.0, 508416.0, 6288379.599999994);
    let tree = QuadTree::build(&bounds, &max_sample(50), 2154);
    assert_eq!(tree.last_level(), 3);
    for k in 0..tree.last_level() {
        let level = tree.level(k).unwrap();
        let next = tree.level(k + 1).unwrap();
        assert_eq!(next.len(), 4 * level.len());
        let diff = (next.total_area() - level.total_area()).abs();
        assert!(diff < 1e-6 * bounds.area(), "area differs by {}", diff);
    }
}

#[test]
fn test_min_sample_area() {
    let bounds = Extent::new(500000.0, 6200000.0, 501000.0, 6201000.0);
    let criterion = Criterion::parse("min_sample_area", CriterionValue::Int(2500)).unwrap();
    assert_eq!(criterion, Criterion::MinSampleArea(2500.0));
    let tree = QuadTree::build(&bounds, &criterion, 2154);
    assert_eq!(tree.last_level(), 5);
    assert_eq!(tree.level(4).unwrap().tiles[0].area(), 3906.25);
    assert!(tree.level(5).unwrap().tiles[0].area() < 2500.0);

    // nothing to split on a degenerate root
    let flat = Extent::new(0.0, 0.0, 100.0, 0.0);
    let tree = QuadTree::build(&flat, &criterion, 2154);
    assert_eq!(tree.last_level(), 0);
}

#[test]
fn test_bad_criterion() {
    assert!(matches!(
        Criterion::parse("max_area", CriterionValue::Int(3)),
        Err(GridError::InvalidCriterion(_))
    ));
    assert!(Criterion::parse("max_sample", CriterionValue::Float(3.5)).is_err());
    assert!(Criterion::parse("max_sample", CriterionValue::Int(-1)).is_err());
    assert!(Criterion::parse("min_sample_area", CriterionValue::Float(0.0)).is_err());
    assert_eq!(
        Criterion::parse("min_sample_area", CriterionValue::Float(12.5)).unwrap(),
        Criterion::MinSampleArea(12.5)
    );
}

#[test]
fn test_filtered_tree() {
    let bounds = Extent::new(0.0, 0.0, 100.0, 100.0);
    let tree = QuadTree::build(&bounds, &max_sample(4), 2154);
    let west = tree.filtered(|t| t.extent.minx < 50.0);
    assert_eq!(west.srid, 2154);
    assert_eq!(west.last_level(), 2);
    assert_eq!(west.level(0).unwrap().len(), 1);
    assert_eq!(west.level(1).unwrap().ids(), vec!["02", "03"]);
    assert_eq!(west.level(2).unwrap().len(), 8);
}
