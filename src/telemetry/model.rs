use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One flat telemetry record as delivered by the device-data endpoint.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TelemetryRecord {
    fields: Map<String, Value>,
}

impl TelemetryRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        TelemetryRecord { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The field under `key`, treating JSON `null` as missing.
    pub fn non_null(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl From<Map<String, Value>> for TelemetryRecord {
    fn from(fields: Map<String, Value>) -> Self {
        TelemetryRecord::new(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// `None` when the record's timestamp could not be read as an instant.
    pub timestamp: Option<DateTime<Utc>>,
    /// May be NaN for readings that are not numeric.
    pub value: f64,
    pub device_id: Option<String>,
    pub measurement: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeriesStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TelemetrySeries {
    pub unit: String,
    pub data: Vec<DataPoint>,
}

impl TelemetrySeries {
    pub fn new(unit: impl Into<String>) -> Self {
        TelemetrySeries {
            unit: unit.into(),
            data: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn latest(&self) -> Option<&DataPoint> {
        self.data.last()
    }

    /// Statistics over the finite values of the series, or `None` if it has
    /// none.
    pub fn stats(&self) -> Option<SeriesStats> {
        let mut stats: Option<SeriesStats> = None;
        let mut sum = 0.0;
        for value in self.data.iter().map(|p| p.value).filter(|v| v.is_finite()) {
            sum += value;
            let s = stats.get_or_insert(SeriesStats {
                count: 0,
                min: value,
                max: value,
                mean: 0.0,
            });
            s.count += 1;
            s.min = s.min.min(value);
            s.max = s.max.max(value);
        }
        stats.map(|mut s| {
            s.mean = sum / s.count as f64;
            s
        })
    }
}

/// Series keyed by measurement type.
pub type SeriesMap = BTreeMap<String, TelemetrySeries>;
