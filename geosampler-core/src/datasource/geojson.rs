//
// Copyright (c) The geosampler developers. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! GeoJSON feature collections

use crate::core::error::{SamplerError, SamplerResult};
use crate::core::feature::{Feature, FeatureAttr, FeatureAttrValType, FeatureLayer};
use crate::core::geom::*;
use crate::datasource::datasource::{DatasourceInput, DatasourceOutput};
use regex::Regex;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// CRS assumed when a collection has no `crs` member (RFC 7946)
pub const DEFAULT_SRID: i32 = 4326;

pub struct GeoJsonDatasource {
    pub path: String,
}

impl GeoJsonDatasource {
    pub fn new(path: &str) -> GeoJsonDatasource {
        GeoJsonDatasource {
            path: path.to_string(),
        }
    }
}

impl DatasourceInput for GeoJsonDatasource {
    fn read_layer(&self) -> SamplerResult<FeatureLayer> {
        debug!("GeoJsonDatasource.read {}", self.path);
        let text = fs::read_to_string(&self.path).map_err(|e| SamplerError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        let json: Value = serde_json::from_str(&text).map_err(|e| SamplerError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        let name = Path::new(&self.path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("layer");
        parse_feature_collection(&json, name)
    }
}

pub struct GeoJsonWriter;

impl DatasourceOutput for GeoJsonWriter {
    fn driver(&self) -> &'static str {
        "GeoJSON"
    }
    fn extension(&self) -> &'static str {
        "geojson"
    }
    fn write_layer(&self, layer: &FeatureLayer, path: &str) -> SamplerResult<()> {
        debug!("GeoJsonWriter.write {} ({} features)", path, layer.len());
        let io_err = |e| SamplerError::Io {
            path: path.to_string(),
            source: e,
        };
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let text = serde_json::to_string(&layer_to_json(layer)).map_err(|e| SamplerError::Json {
            path: path.to_string(),
            source: e,
        })?;
        fs::write(path, text).map_err(io_err)
    }
}

fn format_err<S: Into<String>>(msg: S) -> SamplerError {
    SamplerError::Format(msg.into())
}

/// SRID of a legacy `crs` member like `urn:ogc:def:crs:EPSG::2154`
pub fn parse_crs(json: &Value) -> SamplerResult<Option<i32>> {
    let name = match json.get("crs") {
        None | Some(Value::Null) => return Ok(None),
        Some(crs) => crs
            .pointer("/properties/name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| format_err("crs member without properties.name"))?,
    };
    if name.contains("CRS84") {
        return Ok(Some(DEFAULT_SRID));
    }
    let re = Regex::new(r"EPSG:+(\d+)").map_err(|e| format_err(e.to_string()))?;
    re.captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|code| code.as_str().parse::<i32>().ok())
        .map(Some)
        .ok_or_else(|| format_err(format!("unsupported crs '{}'", name)))
}

pub fn parse_feature_collection(json: &Value, name: &str) -> SamplerResult<FeatureLayer> {
    if json.get("type").and_then(|t| t.as_str()) != Some("FeatureCollection") {
        return Err(format_err("expected a FeatureCollection"));
    }
    let srid = parse_crs(json)?.unwrap_or(DEFAULT_SRID);
    let mut layer = FeatureLayer::new(name, Some(srid));
    let features = json
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| format_err("FeatureCollection without features"))?;
    for feature in features {
        layer.features.push(parse_feature(feature)?);
    }
    Ok(layer)
}

pub fn parse_feature(json: &Value) -> SamplerResult<Feature> {
    let geometry = json
        .get("geometry")
        .filter(|g| !g.is_null())
        .ok_or_else(|| format_err("feature without geometry"))?;
    let mut feature = Feature::new(parse_geometry(geometry)?);
    feature.fid = json.get("id").and_then(|id| id.as_u64());
    if let Some(props) = json.get("properties").and_then(|p| p.as_object()) {
        for (key, value) in props {
            let value = match value {
                Value::Null => continue,
                Value::Bool(b) => FeatureAttrValType::Bool(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => FeatureAttrValType::Int(i),
                    None => FeatureAttrValType::Double(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::String(s) => FeatureAttrValType::String(s.clone()),
                other => FeatureAttrValType::String(other.to_string()),
            };
            feature.attributes.push(FeatureAttr {
                key: key.clone(),
                value,
            });
        }
    }
    Ok(feature)
}

fn parse_coord(json: &Value) -> SamplerResult<Coord> {
    match json.as_array().map(|a| a.as_slice()) {
        Some([x, y, ..]) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Coord { x, y }),
            _ => Err(format_err(format!("invalid position {}", json))),
        },
        _ => Err(format_err(format!("invalid position {}", json))),
    }
}

fn parse_array<'a>(json: &'a Value) -> SamplerResult<&'a Vec<Value>> {
    json.as_array()
        .ok_or_else(|| format_err(format!("expected coordinate array, got {}", json)))
}

fn parse_line(json: &Value) -> SamplerResult<LineString> {
    let coords = parse_array(json)?
        .iter()
        .map(parse_coord)
        .collect::<SamplerResult<Vec<Coord>>>()?;
    Ok(LineString::new(coords))
}

fn parse_polygon(json: &Value) -> SamplerResult<Polygon> {
    let mut rings = parse_array(json)?
        .iter()
        .map(parse_line)
        .collect::<SamplerResult<Vec<LineString>>>()?;
    if rings.is_empty() {
        return Ok(Polygon::new(LineString::new(Vec::new()), Vec::new()));
    }
    let exterior = rings.remove(0);
    Ok(Polygon::new(exterior, rings))
}

pub fn parse_geometry(json: &Value) -> SamplerResult<Geometry> {
    let geom_type = json
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| format_err("geometry without type"))?;
    if geom_type == "GeometryCollection" {
        let members = json
            .get("geometries")
            .map(parse_array)
            .transpose()?
            .ok_or_else(|| format_err("GeometryCollection without geometries"))?;
        let geoms = members
            .iter()
            .map(parse_geometry)
            .collect::<SamplerResult<Vec<Geometry>>>()?;
        return Ok(Geometry::GeometryCollection(GeometryCollection::from(geoms)));
    }
    let coords = json
        .get("coordinates")
        .ok_or_else(|| format_err(format!("{} without coordinates", geom_type)))?;
    let geom = match geom_type {
        "Point" => Geometry::Point(Point::from(parse_coord(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint::new(
            parse_array(coords)?
                .iter()
                .map(|c| parse_coord(c).map(Point::from))
                .collect::<SamplerResult<Vec<Point>>>()?,
        )),
        "LineString" => Geometry::LineString(parse_line(coords)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString::new(
            parse_array(coords)?
                .iter()
                .map(parse_line)
                .collect::<SamplerResult<Vec<LineString>>>()?,
        )),
        "Polygon" => Geometry::Polygon(parse_polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon::new(
            parse_array(coords)?
                .iter()
                .map(parse_polygon)
                .collect::<SamplerResult<Vec<Polygon>>>()?,
        )),
        other => return Err(format_err(format!("unsupported geometry type '{}'", other))),
    };
    Ok(geom)
}

fn coord_json(c: &Coord) -> Value {
    json!([c.x, c.y])
}

fn line_json(line: &LineString) -> Value {
    Value::Array(line.0.iter().map(coord_json).collect())
}

fn polygon_json(poly: &Polygon) -> Value {
    let mut rings = vec![line_json(poly.exterior())];
    rings.extend(poly.interiors().iter().map(line_json));
    Value::Array(rings)
}

pub fn geometry_to_json(geom: &Geometry) -> Value {
    match geom {
        Geometry::Point(p) => json!({"type": "Point", "coordinates": coord_json(&p.0)}),
        Geometry::MultiPoint(mp) => json!({
            "type": "MultiPoint",
            "coordinates": mp.0.iter().map(|p| coord_json(&p.0)).collect::<Vec<_>>()
        }),
        Geometry::Line(l) => json!({
            "type": "LineString",
            "coordinates": [coord_json(&l.start), coord_json(&l.end)]
        }),
        Geometry::LineString(ls) => json!({"type": "LineString", "coordinates": line_json(ls)}),
        Geometry::MultiLineString(mls) => json!({
            "type": "MultiLineString",
            "coordinates": mls.0.iter().map(line_json).collect::<Vec<_>>()
        }),
        Geometry::Polygon(p) => json!({"type": "Polygon", "coordinates": polygon_json(p)}),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(polygon_json).collect::<Vec<_>>()
        }),
        Geometry::Rect(r) => json!({"type": "Polygon", "coordinates": polygon_json(&r.to_polygon())}),
        Geometry::Triangle(t) => {
            json!({"type": "Polygon", "coordinates": polygon_json(&t.to_polygon())})
        }
        Geometry::GeometryCollection(gc) => json!({
            "type": "GeometryCollection",
            "geometries": gc.0.iter().map(geometry_to_json).collect::<Vec<_>>()
        }),
    }
}

fn attr_json(value: &FeatureAttrValType) -> Value {
    match value {
        FeatureAttrValType::String(s) => json!(s),
        FeatureAttrValType::Double(v) => json!(v),
        FeatureAttrValType::Int(v) => json!(v),
        FeatureAttrValType::Bool(v) => json!(v),
    }
}

pub fn layer_to_json(layer: &FeatureLayer) -> Value {
    let features: Vec<Value> = layer
        .features
        .iter()
        .map(|feat| {
            let mut props = Map::new();
            for attr in &feat.attributes {
                props.insert(attr.key.clone(), attr_json(&attr.value));
            }
            let mut obj = json!({
                "type": "Feature",
                "properties": props,
                "geometry": geometry_to_json(&feat.geometry),
            });
            if let Some(fid) = feat.fid {
                obj["id"] = json!(fid);
            }
            obj
        })
        .collect();
    let mut collection = json!({
        "type": "FeatureCollection",
        "name": layer.name,
        "features": features,
    });
    if let Some(srid) = layer.srid {
        collection["crs"] = json!({
            "type": "name",
            "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", srid) }
        });
    }
    collection
}
