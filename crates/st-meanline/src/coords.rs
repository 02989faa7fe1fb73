use serde::Serialize;
use serde_json::{Map, Value};
use st_core::Error;

use crate::geojson::{Feature, FeatureCollection, Geometry};

/// First and last vertex of a line feature plus the spread of its `y`
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EndpointSummary {
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub average_y: f64,
    /// Population standard deviation.
    pub std_deviation_y: f64,
}

pub fn endpoint_summaries(collection: &FeatureCollection) -> Result<Vec<EndpointSummary>, Error> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let coords = feature.geometry.coordinates();
            let (Some(&start), Some(&end)) = (coords.first(), coords.last()) else {
                return Err(Error::InvalidParameter {
                    name: "segments",
                    reason: format!("feature {i} has no coordinates"),
                });
            };

            let n = coords.len() as f64;
            let average_y = coords.iter().map(|c| c[1]).sum::<f64>() / n;
            let variance = coords.iter().map(|c| (c[1] - average_y).powi(2)).sum::<f64>() / n;
            Ok(EndpointSummary {
                start,
                end,
                average_y,
                std_deviation_y: variance.sqrt(),
            })
        })
        .collect()
}

/// Two-point line features with `average_y` and `standard_deviation`
/// properties.
pub fn summaries_to_geojson(summaries: &[EndpointSummary]) -> FeatureCollection {
    let features = summaries
        .iter()
        .map(|s| {
            let mut properties = Map::new();
            properties.insert("average_y".into(), Value::from(s.average_y));
            properties.insert("standard_deviation".into(), Value::from(s.std_deviation_y));
            Feature {
                id: None,
                geometry: Geometry::LineString {
                    coordinates: vec![s.start, s.end],
                },
                properties,
            }
        })
        .collect();
    FeatureCollection { features }
}
