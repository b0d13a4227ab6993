//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::geom::{self, Geometry, MultiPolygon, Point, Polygon};
use rstar::{RTree, RTreeObject, AABB};
use tile_grid::{Extent, TiledLayer};

/// Supported feature attribute value types
#[derive(Clone, PartialEq, Debug)]
pub enum FeatureAttrValType {
    String(String),
    Double(f64),
    Int(i64),
    Bool(bool),
}

impl FeatureAttrValType {
    /// Attribute value as category label
    pub fn label(&self) -> String {
        match self {
            FeatureAttrValType::String(s) => s.clone(),
            FeatureAttrValType::Double(v) => v.to_string(),
            FeatureAttrValType::Int(v) => v.to_string(),
            FeatureAttrValType::Bool(v) => v.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct FeatureAttr {
    pub key: String,
    pub value: FeatureAttrValType,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Feature {
    pub fid: Option<u64>,
    pub attributes: Vec<FeatureAttr>,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Feature {
        Feature {
            fid: None,
            attributes: Vec::new(),
            geometry,
        }
    }
    pub fn with_attr(mut self, key: &str, value: FeatureAttrValType) -> Feature {
        self.attributes.push(FeatureAttr {
            key: key.to_string(),
            value,
        });
        self
    }
    pub fn attribute(&self, key: &str) -> Option<&FeatureAttrValType> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| &attr.value)
    }
}

/// Features sharing one spatial reference system
#[derive(Clone, Default, Debug)]
pub struct FeatureLayer {
    pub name: String,
    /// Spatial reference system (EPSG code)
    pub srid: Option<i32>,
    pub features: Vec<Feature>,
}

impl FeatureLayer {
    pub fn new(name: &str, srid: Option<i32>) -> FeatureLayer {
        FeatureLayer {
            name: name.to_string(),
            srid,
            features: Vec::new(),
        }
    }
    /// Box features with an `id` attribute
    pub fn from_tiles(name: &str, layer: &TiledLayer) -> FeatureLayer {
        FeatureLayer {
            name: name.to_string(),
            srid: Some(layer.srid),
            features: layer
                .iter()
                .map(|tile| {
                    Feature::new(Geometry::Polygon(geom::extent_polygon(&tile.extent)))
                        .with_attr("id", FeatureAttrValType::String(tile.id.clone()))
                })
                .collect(),
        }
    }
    /// One centroid per tile, with the tile `id`
    pub fn tile_centroids(name: &str, layer: &TiledLayer) -> FeatureLayer {
        FeatureLayer {
            name: name.to_string(),
            srid: Some(layer.srid),
            features: layer
                .iter()
                .map(|tile| {
                    let (x, y) = tile.extent.center();
                    Feature::new(Geometry::Point(Point::new(x, y)))
                        .with_attr("id", FeatureAttrValType::String(tile.id.clone()))
                })
                .collect(),
        }
    }
    /// Centroids of all features with centroid, keeping their attributes
    pub fn centroids(&self, name: &str) -> FeatureLayer {
        use geo::Centroid;
        FeatureLayer {
            name: name.to_string(),
            srid: self.srid,
            features: self
                .features
                .iter()
                .filter_map(|feat| {
                    feat.geometry.centroid().map(|center| Feature {
                        fid: feat.fid,
                        attributes: feat.attributes.clone(),
                        geometry: Geometry::Point(center),
                    })
                })
                .collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.features.len()
    }
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
    /// Bounding box of all features
    pub fn extent(&self) -> Option<Extent> {
        self.features
            .iter()
            .filter_map(|feat| geom::geometry_extent(&feat.geometry))
            .fold(None, |acc, ext| match acc {
                None => Some(ext),
                Some(acc) => Some(geom::merge_extents(&acc, &ext)),
            })
    }
    pub fn union(&self) -> MultiPolygon {
        geom::union_all(self.features.iter().map(|feat| geom::polygons(&feat.geometry)))
    }
    pub fn convex_hull(&self) -> Option<Polygon> {
        geom::convex_hull(self.features.iter().map(|feat| geom::polygons(&feat.geometry)))
    }
}

/// Bounding box of a feature in the spatial index
struct IndexedFeature {
    idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Polygonal features of a layer with a bounding box index
pub struct PolygonIndex {
    parts: Vec<MultiPolygon>,
    rtree: RTree<IndexedFeature>,
}

fn envelope(extent: &Extent) -> AABB<[f64; 2]> {
    AABB::from_corners([extent.minx, extent.miny], [extent.maxx, extent.maxy])
}

impl PolygonIndex {
    pub fn new(layer: &FeatureLayer) -> PolygonIndex {
        let parts: Vec<MultiPolygon> = layer
            .features
            .iter()
            .map(|feat| geom::polygons(&feat.geometry))
            .collect();
        let entries = layer
            .features
            .iter()
            .enumerate()
            .filter(|(idx, _)| !parts[*idx].0.is_empty())
            .filter_map(|(idx, feat)| {
                geom::geometry_extent(&feat.geometry).map(|ext| IndexedFeature {
                    idx,
                    envelope: envelope(&ext),
                })
            })
            .collect();
        PolygonIndex {
            parts,
            rtree: RTree::bulk_load(entries),
        }
    }
    /// Positions of the features intersecting `poly`, in layer order
    pub fn intersecting(&self, poly: &Polygon) -> Vec<usize> {
        use geo::{BoundingRect, Intersects};
        let bbox = match poly.bounding_rect() {
            Some(rect) => envelope(&geom::rect_extent(&rect)),
            None => return Vec::new(),
        };
        let mut hits: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&bbox)
            .map(|entry| entry.idx)
            .filter(|idx| self.parts[*idx].intersects(poly))
            .collect();
        hits.sort_unstable();
        hits
    }
    pub fn polygons(&self, idx: usize) -> Option<&MultiPolygon> {
        self.parts.get(idx)
    }
}
