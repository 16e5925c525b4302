use serde_json::Value;

use super::model::TelemetryRecord;

pub const TIMESTAMP_FIELD: &str = "timestamp";
pub const MEASUREMENT_TYPE_FIELD: &str = "measurement_type";
pub const UNIT_FIELD: &str = "unit";
pub const VALUE_FIELD: &str = "value";

/// Key prefixes of debugging and bookkeeping fields that never carry a
/// reading.
const RESERVED_PREFIXES: [&str; 3] = ["_", "debug_", "meta_"];

/// The schema a telemetry record follows.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordVariant<'a> {
    /// The record names its own measurement type and unit.
    Enhanced {
        measurement_type: String,
        unit: String,
        value: f64,
    },
    /// Each reading is a field named after its measurement type.
    Legacy { readings: Vec<Reading<'a>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading<'a> {
    pub measurement: &'a str,
    pub value: f64,
}

impl<'a> RecordVariant<'a> {
    /// A record is enhanced when both `measurement_type` and `value` are
    /// present and not null. Everything else is read as legacy.
    pub fn classify(record: &'a TelemetryRecord) -> Self {
        if let (Some(measurement_type), Some(value)) = (
            record.non_null(MEASUREMENT_TYPE_FIELD),
            record.non_null(VALUE_FIELD),
        ) {
            return RecordVariant::Enhanced {
                measurement_type: text(measurement_type),
                unit: record.non_null(UNIT_FIELD).map(text).unwrap_or_default(),
                value: number(value),
            };
        }

        let readings = record
            .fields()
            .filter(|(key, value)| is_reading_field(key) && !value.is_null())
            .map(|(measurement, value)| Reading {
                measurement,
                value: number(value),
            })
            .collect();
        RecordVariant::Legacy { readings }
    }
}

fn is_reading_field(key: &str) -> bool {
    !matches!(
        key,
        TIMESTAMP_FIELD | MEASUREMENT_TYPE_FIELD | UNIT_FIELD | VALUE_FIELD
    ) && !RESERVED_PREFIXES
        .iter()
        .any(|prefix| key.starts_with(*prefix))
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric reading of a field. Numeric strings are accepted; anything else
/// is NaN.
fn number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}
