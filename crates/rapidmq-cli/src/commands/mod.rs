pub mod config;
pub mod say;
pub mod serve;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use rapidmq_client::{HttpMetricsSource, QueueServiceClient};
use rapidmq_core::DashConfig;
use rapidmq_metrics::{MetricsPoller, TickPolicy};
use rapidmq_voice::{CommandGrammar, CommandRouter, QueueCommandHandler};

/// Router over the standard grammar, handled against the configured backend.
pub fn command_router(config: &DashConfig) -> Result<CommandRouter> {
    let client = QueueServiceClient::new(&config.backend.base_url)?;
    let handler = QueueCommandHandler::new(client, config.panels.clone());
    Ok(CommandRouter::new(
        Arc::new(CommandGrammar::standard()),
        Arc::new(handler),
    ))
}

/// Poller for the configured `/metrics` endpoint.
pub fn metrics_poller(config: &DashConfig) -> Result<MetricsPoller> {
    let source = HttpMetricsSource::new(&config.backend.base_url, &config.metrics.path)?;
    let policy = if config.metrics.single_flight {
        TickPolicy::SingleFlight
    } else {
        TickPolicy::Overlap
    };
    Ok(MetricsPoller::new(Arc::new(source), config.metrics.interval()).with_policy(policy))
}
