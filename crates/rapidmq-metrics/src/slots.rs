//! Binding parsed samples to the dashboard's fixed metric slots.

use rapidmq_core::config::MetricsConfig;
use rapidmq_core::{KeyedRecord, MetricSample};
use serde::Serialize;

use crate::grouping::group_with_keys;

/// All values seen for one metric name, labelled variants included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// One poll's worth of data, ready for the chart consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundDataset {
    /// Slot labels, in display order.
    pub labels: Vec<String>,
    /// Slot values, index-for-index with `labels`.
    pub values: Vec<f64>,
    /// Configured names absent from the payload.
    pub missing: Vec<String>,
    /// Every metric in the payload grouped by base name.
    pub series: Vec<MetricSeries>,
}

/// Maps configured metric names to dashboard slots.
#[derive(Debug, Clone)]
pub struct SlotBinding {
    names: Vec<String>,
    labels: Vec<String>,
    missing_value: f64,
}

impl SlotBinding {
    /// Create a binding. An empty `labels` list reuses the names.
    pub fn new(names: Vec<String>, labels: Vec<String>, missing_value: f64) -> Self {
        let labels = if labels.is_empty() { names.clone() } else { labels };
        Self {
            names,
            labels,
            missing_value,
        }
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(
            config.names.clone(),
            config.labels.clone(),
            config.missing_value,
        )
    }

    /// Bind samples by name. The first sample whose full name, or failing
    /// that whose base name, equals the slot's name fills the slot.
    pub fn bind(&self, samples: &[MetricSample]) -> BoundDataset {
        let mut values = Vec::with_capacity(self.names.len());
        let mut missing = Vec::new();

        for name in &self.names {
            let found = samples
                .iter()
                .find(|s| s.name == *name)
                .or_else(|| samples.iter().find(|s| s.base_name() == name));
            match found {
                Some(sample) => values.push(sample.value),
                None => {
                    values.push(self.missing_value);
                    missing.push(name.clone());
                }
            }
        }

        let series = group_with_keys(
            samples
                .iter()
                .map(|s| KeyedRecord::new(s.base_name().to_string(), s.value)),
        )
        .into_iter()
        .map(|(name, values)| MetricSeries { name, values })
        .collect();

        BoundDataset {
            labels: self.labels.clone(),
            values,
            missing,
            series,
        }
    }

    /// Dataset shown before the first successful poll.
    pub fn empty(&self) -> BoundDataset {
        BoundDataset {
            labels: self.labels.clone(),
            values: vec![self.missing_value; self.names.len()],
            missing: self.names.clone(),
            series: Vec::new(),
        }
    }
}

/// Pad or truncate positional values to exactly `len` slots.
pub fn bind_positional(values: &[f64], len: usize, missing_value: f64) -> Vec<f64> {
    let mut out: Vec<f64> = values.iter().copied().take(len).collect();
    out.resize(len, missing_value);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposition::parse_samples;

    fn binding() -> SlotBinding {
        SlotBinding::from_config(&MetricsConfig::default())
    }

    #[test]
    fn binds_by_name_regardless_of_order() {
        let samples = parse_samples(
            "total_messages 9\nqueue_count 2\nmessages_consumed 4\nmessages_published 11\n",
        );
        let dataset = binding().bind(&samples);
        assert_eq!(dataset.values, vec![11.0, 4.0, 2.0, 9.0]);
        assert_eq!(dataset.labels[0], "Messages Published");
        assert!(dataset.missing.is_empty());
    }

    #[test]
    fn missing_names_get_default() {
        let samples = parse_samples("messages_published 3\n");
        let dataset = binding().bind(&samples);
        assert_eq!(dataset.values, vec![3.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            dataset.missing,
            vec!["messages_consumed", "queue_count", "total_messages"]
        );
    }

    #[test]
    fn unknown_metrics_are_not_bound() {
        let samples = parse_samples("process_cpu_seconds_total 1.2\nqueue_count 5\n");
        let dataset = binding().bind(&samples);
        assert_eq!(dataset.values[2], 5.0);
        assert_eq!(dataset.series.len(), 2);
    }

    #[test]
    fn labelled_samples_match_base_name_and_group() {
        let samples = parse_samples(
            "queue_depth{queue=\"a\"} 1\nqueue_depth{queue=\"b\"} 4\nqueue_count 2\n",
        );
        let binding = SlotBinding::new(
            vec!["queue_depth".to_string(), "queue_count".to_string()],
            Vec::new(),
            -1.0,
        );
        let dataset = binding.bind(&samples);
        assert_eq!(dataset.labels, vec!["queue_depth", "queue_count"]);
        assert_eq!(dataset.values, vec![1.0, 2.0]);
        assert_eq!(
            dataset.series,
            vec![
                MetricSeries {
                    name: "queue_depth".to_string(),
                    values: vec![1.0, 4.0],
                },
                MetricSeries {
                    name: "queue_count".to_string(),
                    values: vec![2.0],
                },
            ]
        );
    }

    #[test]
    fn empty_dataset_is_all_missing() {
        let dataset = binding().empty();
        assert_eq!(dataset.values, vec![0.0; 4]);
        assert_eq!(dataset.missing.len(), 4);
    }

    #[test]
    fn nan_serializes_as_null() {
        let samples = parse_samples("messages_published oops\n");
        let json = serde_json::to_value(binding().bind(&samples)).unwrap();
        assert!(json["values"][0].is_null());
    }

    #[test]
    fn positional_pads_and_truncates() {
        assert_eq!(bind_positional(&[1.0, 2.0], 4, 0.0), vec![1.0, 2.0, 0.0, 0.0]);
        assert_eq!(bind_positional(&[1.0, 2.0, 3.0], 2, 0.0), vec![1.0, 2.0]);
        assert!(bind_positional(&[], 0, 0.0).is_empty());
    }
}
