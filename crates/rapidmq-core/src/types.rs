//! Shared types used across RapidMQ dashboard crates.

use serde::{Deserialize, Serialize};

/// One key/value pair fed into the grouping engine.
///
/// Keys are not unique across records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRecord<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyedRecord<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A single data line from the metrics exposition payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// First token of the line, labels included (`name{queue="a"}`).
    pub name: String,
    /// Parsed second token, `NaN` when it was missing or not numeric.
    pub value: f64,
}

impl MetricSample {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Metric name with any `{...}` label set stripped.
    pub fn base_name(&self) -> &str {
        match self.name.find('{') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

/// A phrase recognized by the speech engine, with its wildcard captures
/// in template order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedUtterance {
    pub template_id: String,
    #[serde(default)]
    pub captures: Vec<String>,
}

impl RecognizedUtterance {
    pub fn new(template_id: impl Into<String>, captures: Vec<String>) -> Self {
        Self {
            template_id: template_id.into(),
            captures,
        }
    }
}

/// A typed command built from a recognized utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum VoiceCommand {
    ShowHealth,
    ShowCluster,
    CreateQueue { name: String },
    PublishMessage { queue_name: String, message: String },
    ConsumeMessage { queue_name: String },
}

impl VoiceCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            VoiceCommand::ShowHealth => "show_health",
            VoiceCommand::ShowCluster => "show_cluster",
            VoiceCommand::CreateQueue { .. } => "create_queue",
            VoiceCommand::PublishMessage { .. } => "publish_message",
            VoiceCommand::ConsumeMessage { .. } => "consume_message",
        }
    }
}

/// Result of running a command, surfaced to the operator.
///
/// `Empty` is a normal "nothing to consume" outcome, distinct from a
/// transport or server `Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Success { text: String },
    Empty,
    Failure { text: String },
}

impl CommandOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        CommandOutcome::Success { text: text.into() }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        CommandOutcome::Failure { text: text.into() }
    }

    /// Text shown to the operator for this outcome.
    pub fn message(&self) -> &str {
        match self {
            CommandOutcome::Success { text } | CommandOutcome::Failure { text } => text,
            CommandOutcome::Empty => "No messages in queue",
        }
    }
}

/// Static figures shown on the System Health panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthPanel {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

impl Default for HealthPanel {
    fn default() -> Self {
        Self {
            cpu_percent: 30.0,
            memory_percent: 50.0,
            disk_percent: 20.0,
        }
    }
}

impl HealthPanel {
    pub fn summary(&self) -> String {
        format!(
            "System health: CPU usage {}%, Memory usage {}%, Disk usage {}%",
            self.cpu_percent, self.memory_percent, self.disk_percent
        )
    }
}

/// Static figures shown on the Cluster Status panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPanel {
    pub active_nodes: u32,
    pub inactive_nodes: u32,
}

impl Default for ClusterPanel {
    fn default() -> Self {
        Self {
            active_nodes: 5,
            inactive_nodes: 1,
        }
    }
}

impl ClusterPanel {
    pub fn summary(&self) -> String {
        format!(
            "Cluster status: {} active {}, {} inactive {}",
            self.active_nodes,
            plural(self.active_nodes, "node"),
            self.inactive_nodes,
            plural(self.inactive_nodes, "node"),
        )
    }
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
