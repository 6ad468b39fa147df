//! `rapidmq-dash serve`: poll metrics and serve the dashboard API.

use std::sync::Arc;

use anyhow::Result;
use rapidmq_api::{ApiState, build_router};
use rapidmq_core::DashConfig;
use rapidmq_metrics::{FetchError, SlotBinding};
use rapidmq_metrics::poller::{DataCallback, ErrorCallback};
use rapidmq_voice::TextRecognizer;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub async fn serve(config: DashConfig) -> Result<()> {
    info!(backend = %config.backend.base_url, "RapidMQ dashboard starting");

    // ── Metrics ────────────────────────────────────────────────

    let binding = SlotBinding::from_config(&config.metrics);
    let (latest_tx, latest_rx) = watch::channel(binding.empty());

    let on_data: DataCallback = Arc::new(move |samples| {
        let dataset = binding.bind(&samples);
        if !dataset.missing.is_empty() {
            debug!(missing = ?dataset.missing, "configured metrics absent from payload");
        }
        latest_tx.send_replace(dataset);
    });
    // The previous dataset stays visible until a tick succeeds.
    let on_error: ErrorCallback = Arc::new(|e: FetchError| {
        warn!(error = %e, "metrics fetch failed, keeping previous dataset");
    });

    let poller = super::metrics_poller(&config)?;
    let poll_handle = poller.start(on_data, on_error);

    // ── Voice ──────────────────────────────────────────────────

    let router = super::command_router(&config)?;
    let recognizer = Arc::new(TextRecognizer::new(router.grammar())?);

    // ── API server ─────────────────────────────────────────────

    let state = ApiState {
        latest: latest_rx,
        panels: config.panels.clone(),
        router,
        recognizer,
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.api.bind, config.api.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "dashboard API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    poll_handle.cancel();
    info!("RapidMQ dashboard stopped");
    Ok(())
}
