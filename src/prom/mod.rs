mod model;
pub use self::model::find_metric;
pub use self::model::Metric;
pub use self::model::MetricType;
pub use self::model::Sample;

pub(crate) mod parser;
pub use self::parser::parse;
pub use self::parser::parse_bytes;

mod summary;
pub use self::summary::summarize;
pub use self::summary::MetricsSummary;

mod system;
pub use self::system::extract;
pub use self::system::format_bytes;
pub use self::system::format_rate;
pub use self::system::ByteCounter;
pub use self::system::SystemSnapshot;

#[cfg(test)]
mod test_data;
