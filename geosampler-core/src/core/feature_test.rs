//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::feature::*;
use crate::core::geom::{extent_polygon, Geometry, Point};
use tile_grid::{Extent, TileSpec, TiledLayer};

fn square(minx: f64, miny: f64, size: f64, class: &str) -> Feature {
    Feature::new(Geometry::Polygon(extent_polygon(&Extent::new(
        minx,
        miny,
        minx + size,
        miny + size,
    ))))
    .with_attr("class", FeatureAttrValType::String(class.to_string()))
}

#[test]
fn test_attributes() {
    let feat = square(0.0, 0.0, 1.0, "forest").with_attr("code", FeatureAttrValType::Int(311));
    assert_eq!(feat.attribute("code").map(|v| v.label()), Some("311".to_string()));
    assert_eq!(feat.attribute("class").map(|v| v.label()), Some("forest".to_string()));
    assert_eq!(feat.attribute("missing"), None);
    assert_eq!(FeatureAttrValType::Double(0.5).label(), "0.5");
    assert_eq!(FeatureAttrValType::Bool(true).label(), "true");
}

#[test]
fn test_tile_layers() {
    let spec = TileSpec::square(10.0, 0.0, true).unwrap();
    let tiles = TiledLayer::new(3857, spec.tiles(&Extent::new(0.0, 0.0, 20.0, 10.0)).collect());
    let boxes = FeatureLayer::from_tiles("boxes", &tiles);
    assert_eq!(boxes.srid, Some(3857));
    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes.extent(), Some(Extent::new(0.0, 0.0, 20.0, 10.0)));

    let centroids = FeatureLayer::tile_centroids("centroids", &tiles);
    assert_eq!(centroids.features[1].geometry, Geometry::Point(Point::new(15.0, 5.0)));
    assert_eq!(
        centroids.features[1].attribute("id"),
        Some(&FeatureAttrValType::String("10.0-0.0-20.0-10.0".to_string()))
    );
    // centroids of polygon features match the tile centers
    let from_boxes = boxes.centroids("centroids");
    assert_eq!(from_boxes.features[0].geometry, centroids.features[0].geometry);
}

#[test]
fn test_layer_geometry() {
    let mut layer = FeatureLayer::new("mask", Some(2154));
    assert!(layer.is_empty());
    assert_eq!(layer.extent(), None);
    assert!(layer.convex_hull().is_none());
    layer.features.push(square(0.0, 0.0, 10.0, "forest"));
    layer.features.push(square(20.0, 0.0, 10.0, "water"));
    layer.features.push(Feature::new(Geometry::Point(Point::new(50.0, 50.0))));
    assert_eq!(layer.extent(), Some(Extent::new(0.0, 0.0, 50.0, 50.0)));
    use geo::Area;
    assert_eq!(layer.union().unsigned_area(), 200.0);
    // points do not contribute to the hull
    assert_eq!(layer.convex_hull().unwrap().unsigned_area(), 300.0);
}

#[test]
fn test_polygon_index() {
    let mut layer = FeatureLayer::new("mask", Some(2154));
    layer.features.push(square(0.0, 0.0, 10.0, "forest"));
    layer.features.push(Feature::new(Geometry::Point(Point::new(5.0, 5.0))));
    layer.features.push(square(20.0, 0.0, 10.0, "water"));
    layer.features.push(square(5.0, 5.0, 20.0, "urban"));
    let index = PolygonIndex::new(&layer);

    let tile = extent_polygon(&Extent::new(0.0, 0.0, 6.0, 6.0));
    assert_eq!(index.intersecting(&tile), vec![0, 3]);
    let tile = extent_polygon(&Extent::new(18.0, 0.0, 30.0, 4.0));
    assert_eq!(index.intersecting(&tile), vec![2]);
    let tile = extent_polygon(&Extent::new(100.0, 100.0, 110.0, 110.0));
    assert!(index.intersecting(&tile).is_empty());
    assert!(index.polygons(1).unwrap().0.is_empty());
    assert!(index.polygons(4).is_none());
}
