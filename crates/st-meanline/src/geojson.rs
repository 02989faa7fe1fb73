use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use st_core::LineSegment;

/// Minimal GeoJSON `FeatureCollection` carrying line geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<[f64; 2]> },
}

impl Geometry {
    pub fn coordinates(&self) -> &[[f64; 2]] {
        match self {
            Self::LineString { coordinates } => coordinates,
        }
    }
}

/// One `LineString` feature per line, with ids `0..n` and empty properties.
pub fn meanlines_to_geojson(lines: &[LineSegment]) -> FeatureCollection {
    let features = lines
        .iter()
        .enumerate()
        .map(|(i, line)| Feature {
            id: Some(Value::from(i)),
            geometry: Geometry::LineString {
                coordinates: vec![
                    [f64::from(line.start.x), f64::from(line.start.y)],
                    [f64::from(line.end.x), f64::from(line.end.y)],
                ],
            },
            properties: Map::new(),
        })
        .collect();
    FeatureCollection { features }
}
