mod model;
pub use self::model::DataPoint;
pub use self::model::SeriesMap;
pub use self::model::SeriesStats;
pub use self::model::TelemetryRecord;
pub use self::model::TelemetrySeries;

mod record;
pub use self::record::Reading;
pub use self::record::RecordVariant;

mod timestamp;
pub use self::timestamp::parse_timestamp;
pub use self::timestamp::parse_timestamp_str;

mod parser;
pub use self::parser::parse_json;
pub use self::parser::parse_json_str;
pub use self::parser::parse_telemetry;
pub use self::parser::TelemetryParser;

mod metadata;
pub use self::metadata::display_name;
pub use self::metadata::metadata;
pub use self::metadata::MeasurementMetadata;
