use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Metric, MetricType};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_metrics: usize,
    pub total_samples: usize,
    /// Only metrics with a `# TYPE` line are counted here.
    pub metric_types: BTreeMap<MetricType, usize>,
}

pub fn summarize(metrics: &[Metric]) -> MetricsSummary {
    let mut metric_types = BTreeMap::new();
    for metric in metrics.iter().filter(|m| m.metric_type.is_set()) {
        *metric_types.entry(metric.metric_type).or_insert(0) += 1;
    }

    MetricsSummary {
        total_metrics: metrics.len(),
        total_samples: metrics.iter().map(Metric::sample_count).sum(),
        metric_types,
    }
}
