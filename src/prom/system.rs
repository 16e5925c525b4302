use serde::Serialize;

use super::model::{find_metric, Metric};

const CPU_USAGE: &str = "system_cpu_usage_percent";
const MEMORY_USAGE: &str = "system_memory_usage_percent";
const DISK_USAGE: &str = "system_disk_usage_percent";
const MQTT_CONNECTIONS: &str = "mqtt_active_connections";
const DEVICES_TOTAL: &str = "devices_total";
const DEVICES_ONLINE: &str = "devices_online";
const UPTIME: &str = "process_uptime_seconds";
const DATABASE_STATUS: &str = "database_connection_status";
const MQTT_BROKER_STATUS: &str = "mqtt_broker_status";
const HTTP_REQUESTS: &str = "http_requests_total";
const TELEMETRY_MESSAGES: &str = "telemetry_messages_total";
const NETWORK_RECEIVED: &str = "network_bytes_received_total";
const NETWORK_TRANSMITTED: &str = "network_bytes_transmitted_total";
const DISK_READ: &str = "disk_read_bytes_total";
const DISK_WRITTEN: &str = "disk_written_bytes_total";

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BYTES_PER_MEGABYTE: f64 = 1_048_576.0;

/// A summed byte counter together with its display form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteCounter {
    pub bytes: f64,
    pub formatted: String,
}

impl ByteCounter {
    fn new(bytes: f64) -> Self {
        ByteCounter {
            bytes,
            formatted: format_bytes(bytes),
        }
    }

    /// The counter rendered as `X.XX MB/s`. See [`format_rate`].
    pub fn rate(&self) -> String {
        format_rate(self.bytes)
    }
}

/// Flat view over the well-known service metrics. A field is `None` when
/// the scrape did not contain the metric.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub cpu_usage_percent: Option<f64>,
    pub memory_usage_percent: Option<f64>,
    pub disk_usage_percent: Option<f64>,
    pub mqtt_active_connections: Option<f64>,
    pub devices_total: Option<f64>,
    pub devices_online: Option<f64>,
    pub uptime_seconds: Option<f64>,
    pub database_status: Option<f64>,
    pub mqtt_broker_status: Option<f64>,

    pub http_requests_total: Option<f64>,
    pub telemetry_messages_total: Option<f64>,
    pub network_received: Option<ByteCounter>,
    pub network_transmitted: Option<ByteCounter>,
    pub network_received_rate: Option<String>,
    pub network_transmitted_rate: Option<String>,
    pub disk_read: Option<ByteCounter>,
    pub disk_written: Option<ByteCounter>,
}

impl SystemSnapshot {
    pub fn database_up(&self) -> Option<bool> {
        self.database_status.map(|status| status >= 1.0)
    }

    pub fn mqtt_broker_up(&self) -> Option<bool> {
        self.mqtt_broker_status.map(|status| status >= 1.0)
    }
}

pub fn extract(metrics: &[Metric]) -> SystemSnapshot {
    let network_received = byte_counter(metrics, NETWORK_RECEIVED);
    let network_transmitted = byte_counter(metrics, NETWORK_TRANSMITTED);

    SystemSnapshot {
        cpu_usage_percent: gauge(metrics, CPU_USAGE),
        memory_usage_percent: gauge(metrics, MEMORY_USAGE),
        disk_usage_percent: gauge(metrics, DISK_USAGE),
        mqtt_active_connections: gauge(metrics, MQTT_CONNECTIONS),
        devices_total: gauge(metrics, DEVICES_TOTAL),
        devices_online: gauge(metrics, DEVICES_ONLINE),
        uptime_seconds: gauge(metrics, UPTIME),
        database_status: gauge(metrics, DATABASE_STATUS),
        mqtt_broker_status: gauge(metrics, MQTT_BROKER_STATUS),

        http_requests_total: counter(metrics, HTTP_REQUESTS),
        telemetry_messages_total: counter(metrics, TELEMETRY_MESSAGES),
        network_received_rate: network_received.as_ref().map(ByteCounter::rate),
        network_transmitted_rate: network_transmitted.as_ref().map(ByteCounter::rate),
        network_received,
        network_transmitted,
        disk_read: byte_counter(metrics, DISK_READ),
        disk_written: byte_counter(metrics, DISK_WRITTEN),
    }
}

/// Value of a single-sample metric, or the mean over several samples.
fn gauge(metrics: &[Metric], name: &str) -> Option<f64> {
    let metric = find_metric(metrics, name)?;
    match metric.samples.as_slice() {
        [] => None,
        [sample] => Some(sample.value),
        samples => Some(metric.values().sum::<f64>() / samples.len() as f64),
    }
}

/// Sum over every sample, whatever its labels.
fn counter(metrics: &[Metric], name: &str) -> Option<f64> {
    let metric = find_metric(metrics, name)?;
    if metric.samples.is_empty() {
        return None;
    }
    Some(metric.values().sum())
}

fn byte_counter(metrics: &[Metric], name: &str) -> Option<ByteCounter> {
    counter(metrics, name).map(ByteCounter::new)
}

/// Formats a byte count using the largest unit of B, KB, MB, GB and TB
/// (powers of 1024) that keeps the value at or above one.
pub fn format_bytes(bytes: f64) -> String {
    if bytes == 0.0 {
        return "0 B".to_string();
    }

    let mut value = bytes;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", BYTE_UNITS[unit])
}

/// Divides a cumulative byte total by one megabyte and labels it `MB/s`.
///
/// The input is a cumulative total, so this is not a time-windowed rate.
pub fn format_rate(bytes: f64) -> String {
    format!("{:.2} MB/s", bytes / BYTES_PER_MEGABYTE)
}
