//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::{SamplerError, SamplerResult};
use geo::{Area, BooleanOps, BoundingRect, ConvexHull};
use regex::Regex;
use tile_grid::Extent;

// Aliases for geo geometry types
pub type Coord = geo::Coord<f64>;
pub type Point = geo::Point<f64>;
pub type LineString = geo::LineString<f64>;
pub type Polygon = geo::Polygon<f64>;
pub type MultiPoint = geo::MultiPoint<f64>;
pub type MultiLineString = geo::MultiLineString<f64>;
pub type MultiPolygon = geo::MultiPolygon<f64>;
pub type GeometryCollection = geo::GeometryCollection<f64>;
pub type Geometry = geo::Geometry<f64>;
pub type Rect = geo::Rect<f64>;

/// Box polygon of an extent
pub fn extent_polygon(extent: &Extent) -> Polygon {
    Rect::new(
        Coord {
            x: extent.minx,
            y: extent.miny,
        },
        Coord {
            x: extent.maxx,
            y: extent.maxy,
        },
    )
    .to_polygon()
}

pub fn rect_extent(rect: &Rect) -> Extent {
    Extent::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
}

pub fn geometry_extent(geom: &Geometry) -> Option<Extent> {
    geom.bounding_rect().map(|rect| rect_extent(&rect))
}

/// Smallest extent containing both
pub fn merge_extents(a: &Extent, b: &Extent) -> Extent {
    Extent::new(
        a.minx.min(b.minx),
        a.miny.min(b.miny),
        a.maxx.max(b.maxx),
        a.maxy.max(b.maxy),
    )
}

/// Polygonal parts of a geometry
pub fn polygons(geom: &Geometry) -> MultiPolygon {
    match geom {
        Geometry::Polygon(p) => MultiPolygon::new(vec![p.clone()]),
        Geometry::MultiPolygon(mp) => mp.clone(),
        Geometry::Rect(r) => MultiPolygon::new(vec![r.to_polygon()]),
        Geometry::Triangle(t) => MultiPolygon::new(vec![t.to_polygon()]),
        Geometry::GeometryCollection(gc) => {
            MultiPolygon::new(gc.iter().flat_map(|g| polygons(g).0).collect())
        }
        _ => MultiPolygon::new(Vec::new()),
    }
}

/// Union of all polygons
pub fn union_all<I>(parts: I) -> MultiPolygon
where
    I: IntoIterator<Item = MultiPolygon>,
{
    parts
        .into_iter()
        .filter(|mp| !mp.0.is_empty())
        .fold(MultiPolygon::new(Vec::new()), |acc, mp| {
            if acc.0.is_empty() {
                mp
            } else {
                acc.union(&mp)
            }
        })
}

/// Convex hull of all polygons
pub fn convex_hull<I>(parts: I) -> Option<Polygon>
where
    I: IntoIterator<Item = MultiPolygon>,
{
    let all = MultiPolygon::new(parts.into_iter().flat_map(|mp| mp.0).collect());
    if all.0.is_empty() {
        None
    } else {
        Some(all.convex_hull())
    }
}

/// Area of the intersection of `poly` with `other`
pub fn intersection_area(poly: &Polygon, other: &MultiPolygon) -> f64 {
    if other.0.is_empty() {
        return 0.0;
    }
    MultiPolygon::new(vec![poly.clone()])
        .intersection(other)
        .unsigned_area()
}

/// Bounds of a WKT (MULTI)POLYGON string
pub fn wkt_bounds(wkt: &str) -> SamplerResult<Extent> {
    let re_type = Regex::new(r"(?i)^\s*(MULTI)?POLYGON\s*\(").map_err(|e| SamplerError::config(e.to_string()))?;
    if !re_type.is_match(wkt) {
        return Err(SamplerError::config(format!(
            "Expected WKT POLYGON or MULTIPOLYGON, got '{}'",
            wkt
        )));
    }
    let re_num = Regex::new(r"-?\d+(\.\d*)?([eE][-+]?\d+)?").map_err(|e| SamplerError::config(e.to_string()))?;
    let numbers = re_num
        .find_iter(wkt)
        .map(|m| m.as_str().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|e| SamplerError::config(format!("Invalid WKT coordinate: {}", e)))?;
    if numbers.len() < 2 || numbers.len() % 2 != 0 {
        return Err(SamplerError::config(format!(
            "Invalid WKT coordinates in '{}'",
            wkt
        )));
    }
    let mut extent = Extent::new(numbers[0], numbers[1], numbers[0], numbers[1]);
    for xy in numbers.chunks(2) {
        extent = merge_extents(&extent, &Extent::new(xy[0], xy[1], xy[0], xy[1]));
    }
    Ok(extent)
}
