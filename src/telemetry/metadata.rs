use std::collections::BTreeMap;

use serde::Serialize;

use super::model::SeriesMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementMetadata {
    pub unit: String,
    pub display_name: String,
}

pub fn metadata(series: &SeriesMap) -> BTreeMap<String, MeasurementMetadata> {
    series
        .iter()
        .map(|(measurement, series)| {
            (
                measurement.clone(),
                MeasurementMetadata {
                    unit: series.unit.clone(),
                    display_name: display_name(measurement),
                },
            )
        })
        .collect()
}

/// `battery_level` becomes `Battery Level`.
pub fn display_name(measurement: &str) -> String {
    measurement
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
