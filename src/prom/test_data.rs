/// Scrape of the dashboard backend's own `/metrics` endpoint.
pub const SERVICE_METRICS: &str = r#"# HELP system_cpu_usage_percent Current CPU usage in percent
# TYPE system_cpu_usage_percent gauge
system_cpu_usage_percent 23.5
# HELP system_memory_usage_percent Current memory usage in percent
# TYPE system_memory_usage_percent gauge
system_memory_usage_percent 61.25
# HELP system_disk_usage_percent Disk usage per mount point in percent
# TYPE system_disk_usage_percent gauge
system_disk_usage_percent{mount="/"} 40
system_disk_usage_percent{mount="/data"} 80
# HELP mqtt_active_connections Connected MQTT clients
# TYPE mqtt_active_connections gauge
mqtt_active_connections 12
# HELP devices_total Registered devices
# TYPE devices_total gauge
devices_total 42
# HELP devices_online Devices that reported within the last interval
# TYPE devices_online gauge
devices_online 37
# HELP process_uptime_seconds Seconds since the service started
# TYPE process_uptime_seconds gauge
process_uptime_seconds 86400
# HELP database_connection_status 1 when the database is reachable
# TYPE database_connection_status gauge
database_connection_status 1
# HELP mqtt_broker_status 1 when the MQTT broker is reachable
# TYPE mqtt_broker_status gauge
mqtt_broker_status 0
# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total{method="GET",route="/api/devices",status="200"} 15
http_requests_total{method="POST",route="/api/devices",status="201"} 3
# HELP telemetry_messages_total Telemetry messages ingested
# TYPE telemetry_messages_total counter
telemetry_messages_total{protocol="mqtt"} 1200
telemetry_messages_total{protocol="http"} 34
# HELP network_bytes_received_total Bytes received per interface
# TYPE network_bytes_received_total counter
network_bytes_received_total{interface="eth0"} 2097152
network_bytes_received_total{interface="lo"} 418816
# HELP network_bytes_transmitted_total Bytes transmitted per interface
# TYPE network_bytes_transmitted_total counter
network_bytes_transmitted_total{interface="eth0"} 1048576
# HELP disk_read_bytes_total Bytes read from disk
# TYPE disk_read_bytes_total counter
disk_read_bytes_total{device="sda"} 1073741824
# HELP disk_written_bytes_total Bytes written to disk
# TYPE disk_written_bytes_total counter
disk_written_bytes_total{device="sda"} 0
# HELP http_request_duration_seconds Request latency
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_bucket{le="0.1"} 120
http_request_duration_seconds_bucket{le="0.5"} 170
http_request_duration_seconds_bucket{le="1"} 176
http_request_duration_seconds_bucket{le="+Inf"} 178
http_request_duration_seconds_sum 53.4
http_request_duration_seconds_count 178
"#;

/// A node exporter style scrape with untyped and malformed lines mixed in.
pub const NODE_EXPORTER: &str = r#"# HELP go_gc_duration_seconds A summary of the pause duration of garbage collection cycles.
# TYPE go_gc_duration_seconds summary
go_gc_duration_seconds{quantile="0"} 2.5617e-05
go_gc_duration_seconds{quantile="0.5"} 4.1206e-05
go_gc_duration_seconds{quantile="1"} 0.000213343
go_gc_duration_seconds_sum 0.004591402
go_gc_duration_seconds_count 97
# HELP node_load1 1m load average.
# TYPE node_load1 gauge
node_load1 0.52
node_cpu_seconds_total{cpu="0",mode="idle"} 12345.67 1712345678000
node_cpu_seconds_total{cpu="0",mode="user"} 234.5 1712345678000
this line is garbage
node_scrape_collector_success{collector="cpu"} 1
# a free-form comment
"#;
