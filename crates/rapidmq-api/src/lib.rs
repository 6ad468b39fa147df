//! rapidmq-api — REST API behind the RapidMQ dashboard UI.
//!
//! Serves the most recent polled metrics dataset, the static panel
//! figures, and voice command dispatch. Chart rendering stays in the UI.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/health` | Liveness |
//! | GET | `/api/metrics` | Latest bound metrics dataset |
//! | GET | `/api/panels/health` | System health figures |
//! | GET | `/api/panels/cluster` | Cluster status figures |
//! | GET | `/api/voice/templates` | Voice grammar templates |
//! | POST | `/api/voice` | Dispatch a recognized utterance |
//! | POST | `/api/voice/text` | Recognize typed text, then dispatch |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use rapidmq_core::config::PanelsConfig;
use rapidmq_metrics::BoundDataset;
use rapidmq_voice::{CommandRouter, TextRecognizer};
use tokio::sync::watch;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Latest dataset published by the poller.
    pub latest: watch::Receiver<BoundDataset>,
    pub panels: PanelsConfig,
    pub router: CommandRouter,
    pub recognizer: Arc<TextRecognizer>,
}

/// Build the API router.
pub fn build_router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::latest_metrics))
        .route("/panels/health", get(handlers::health_panel))
        .route("/panels/cluster", get(handlers::cluster_panel))
        .route("/voice/templates", get(handlers::voice_templates))
        .route("/voice", post(handlers::dispatch_utterance))
        .route("/voice/text", post(handlers::dispatch_text))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}
