use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

use super::model::{DataPoint, SeriesMap, TelemetryRecord, TelemetrySeries};
use super::record::{RecordVariant, TIMESTAMP_FIELD};
use super::timestamp::parse_timestamp;

/// Units for legacy records, whose fields carry no unit of their own.
const DEFAULT_UNITS: [(&str, &str); 8] = [
    ("temperature", "°C"),
    ("humidity", "%"),
    ("pressure", "hPa"),
    ("battery_level", "%"),
    ("signal_strength", "dBm"),
    ("signal_quality", "%"),
    ("air_quality", "AQI"),
    ("light_level", "lux"),
];

/// Turns telemetry records of either schema into series keyed by
/// measurement type.
#[derive(Debug, Clone)]
pub struct TelemetryParser {
    device_id: Option<String>,
    units: HashMap<String, String>,
}

impl Default for TelemetryParser {
    fn default() -> Self {
        TelemetryParser {
            device_id: None,
            units: DEFAULT_UNITS
                .iter()
                .map(|(measurement, unit)| (measurement.to_string(), unit.to_string()))
                .collect(),
        }
    }
}

impl TelemetryParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device the records belong to; copied onto every data point.
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Sets the unit assigned to a legacy field.
    pub fn unit(mut self, measurement: impl Into<String>, unit: impl Into<String>) -> Self {
        self.units.insert(measurement.into(), unit.into());
        self
    }

    fn legacy_unit(&self, measurement: &str) -> &str {
        self.units.get(measurement).map(String::as_str).unwrap_or("")
    }

    pub fn parse(&self, records: &[TelemetryRecord]) -> SeriesMap {
        let mut series = SeriesMap::new();

        for record in records {
            let timestamp = record.get(TIMESTAMP_FIELD).and_then(parse_timestamp);

            match RecordVariant::classify(record) {
                RecordVariant::Enhanced {
                    measurement_type,
                    unit,
                    value,
                } => {
                    let point = self.data_point(timestamp, value, &measurement_type);
                    append(&mut series, &measurement_type, &unit, point);
                }
                RecordVariant::Legacy { readings } => {
                    for reading in readings {
                        let point = self.data_point(timestamp, reading.value, reading.measurement);
                        let unit = self.legacy_unit(reading.measurement);
                        append(&mut series, reading.measurement, unit, point);
                    }
                }
            }
        }

        log::debug!(
            "Normalized {} telemetry records into {} series",
            records.len(),
            series.len()
        );
        series
    }

    /// Parses an untyped JSON payload, which must be an array of objects.
    pub fn parse_json(&self, payload: &Value) -> Result<SeriesMap> {
        let Value::Array(items) = payload else {
            return Err(Error::InvalidArgument(format!(
                "telemetry payload must be a JSON array, got {}",
                json_kind(payload)
            )));
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(position, item)| match item {
                Value::Object(fields) => Ok(TelemetryRecord::new(fields.clone())),
                other => Err(Error::InvalidArgument(format!(
                    "telemetry record {position} must be a JSON object, got {}",
                    json_kind(other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.parse(&records))
    }

    pub fn parse_json_str(&self, payload: &str) -> Result<SeriesMap> {
        let payload: Value = serde_json::from_str(payload)?;
        self.parse_json(&payload)
    }

    fn data_point(
        &self,
        timestamp: Option<DateTime<Utc>>,
        value: f64,
        measurement: &str,
    ) -> DataPoint {
        DataPoint {
            timestamp,
            value,
            device_id: self.device_id.clone(),
            measurement: measurement.to_string(),
        }
    }
}

/// Appends to the series for `measurement`. The unit of a series is the one
/// it was created with; later units for the same measurement are ignored.
fn append(series: &mut SeriesMap, measurement: &str, unit: &str, point: DataPoint) {
    let entry = series
        .entry(measurement.to_string())
        .or_insert_with(|| TelemetrySeries::new(unit));
    if entry.unit != unit {
        log::debug!(
            "Ignoring unit {unit:?} for {measurement}, series already uses {:?}",
            entry.unit
        );
    }
    entry.data.push(point);
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parser_for(device_id: Option<&str>) -> TelemetryParser {
    match device_id {
        Some(device_id) => TelemetryParser::new().device_id(device_id),
        None => TelemetryParser::new(),
    }
}

/// Normalizes records with the default unit table.
pub fn parse_telemetry(records: &[TelemetryRecord], device_id: Option<&str>) -> SeriesMap {
    parser_for(device_id).parse(records)
}

/// Like [`parse_telemetry`], for an untyped JSON payload.
pub fn parse_json(payload: &Value, device_id: Option<&str>) -> Result<SeriesMap> {
    parser_for(device_id).parse_json(payload)
}

/// Like [`parse_telemetry`], for a JSON document.
pub fn parse_json_str(payload: &str, device_id: Option<&str>) -> Result<SeriesMap> {
    parser_for(device_id).parse_json_str(payload)
}
