//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::*;
use geo::Area;
use tile_grid::Extent;

#[test]
fn test_extent_polygon() {
    let poly = extent_polygon(&Extent::new(0.0, 0.0, 10.0, 20.0));
    assert_eq!(poly.unsigned_area(), 200.0);
    assert_eq!(
        geometry_extent(&Geometry::Polygon(poly)),
        Some(Extent::new(0.0, 0.0, 10.0, 20.0))
    );
}

#[test]
fn test_union_and_intersection() {
    let a = polygons(&Geometry::Polygon(extent_polygon(&Extent::new(0.0, 0.0, 10.0, 10.0))));
    let b = polygons(&Geometry::Polygon(extent_polygon(&Extent::new(5.0, 0.0, 15.0, 10.0))));
    let union = union_all(vec![a, b]);
    assert!((union.unsigned_area() - 150.0).abs() < 1e-9);

    let tile = extent_polygon(&Extent::new(10.0, 0.0, 20.0, 10.0));
    assert!((intersection_area(&tile, &union) - 50.0).abs() < 1e-9);
    assert_eq!(intersection_area(&tile, &MultiPolygon::new(vec![])), 0.0);
}

#[test]
fn test_convex_hull() {
    let a = polygons(&Geometry::Polygon(extent_polygon(&Extent::new(0.0, 0.0, 1.0, 1.0))));
    let b = polygons(&Geometry::Polygon(extent_polygon(&Extent::new(9.0, 9.0, 10.0, 10.0))));
    let hull = convex_hull(vec![a, b]).unwrap();
    // square minus two corner triangles
    assert!((hull.unsigned_area() - (100.0 - 2.0 * 40.5)).abs() < 1e-9);
    assert!(convex_hull(Vec::new()).is_none());
}

#[test]
fn test_non_polygonal() {
    let point = Geometry::Point(Point::new(1.0, 2.0));
    assert!(polygons(&point).0.is_empty());
    assert_eq!(geometry_extent(&point), Some(Extent::new(1.0, 2.0, 1.0, 2.0)));
}

#[test]
fn test_wkt_bounds() {
    let extent = wkt_bounds("POLYGON ((506880 6286848, 508416 6286848, 508416 6288379.6, 506880 6288379.6, 506880 6286848))").unwrap();
    assert_eq!(extent, Extent::new(506880.0, 6286848.0, 508416.0, 6288379.6));
    let extent = wkt_bounds("multipolygon(((-1 -2, 3 -2, 3 4, -1 -2)))").unwrap();
    assert_eq!(extent, Extent::new(-1.0, -2.0, 3.0, 4.0));
    assert!(wkt_bounds("POINT (1 2)").is_err());
    assert!(wkt_bounds("POLYGON ((1 2, 3))").is_err());
}
