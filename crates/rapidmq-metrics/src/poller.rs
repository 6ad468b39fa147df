//! Metrics poller: periodic fetch of the exposition payload.
//!
//! One tick fires immediately, then one every `interval`. Each tick runs
//! its fetch in its own task, so a slow response never delays the timer.
//! Fetch failures are handed to the caller's error callback; the poller
//! never retries or backs off.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rapidmq_core::MetricSample;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::exposition::parse_samples;

/// Boxed future returned by [`MetricsSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;

/// Callback receiving the samples parsed from one tick.
pub type DataCallback = Arc<dyn Fn(Vec<MetricSample>) + Send + Sync>;

/// Callback receiving a tick's fetch failure.
pub type ErrorCallback = Arc<dyn Fn(FetchError) + Send + Sync>;

/// Where the poller gets its payload from. Injected for testability.
pub trait MetricsSource: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;
}

/// What to do when a tick fires while an earlier fetch is unresolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickPolicy {
    /// Start the fetch anyway. Deliveries may arrive out of tick order.
    #[default]
    Overlap,
    /// Skip the tick. At most one fetch is in flight.
    SingleFlight,
}

/// Stops a running poller. Dropping the handle does not stop it.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel_tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Stop future ticks. Fetches already in flight still complete and
    /// still deliver.
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }
}

/// Shortest poll interval. tokio's interval timer rejects zero.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

pub struct MetricsPoller {
    source: Arc<dyn MetricsSource>,
    interval: Duration,
    policy: TickPolicy,
}

impl MetricsPoller {
    /// Intervals shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn new(source: Arc<dyn MetricsSource>, interval: Duration) -> Self {
        if interval < MIN_INTERVAL {
            warn!(
                requested_ms = interval.as_millis() as u64,
                "metrics poll interval too short, using 1ms"
            );
        }
        let interval = interval.max(MIN_INTERVAL);
        Self {
            source,
            interval,
            policy: TickPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: TickPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start polling on the current tokio runtime.
    pub fn start(&self, on_data: DataCallback, on_error: ErrorCallback) -> CancelHandle {
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let cancel_tx = Arc::new(cancel_tx);

        let ticks = TickLoop {
            source: Arc::clone(&self.source),
            interval: self.interval,
            policy: self.policy,
            on_data,
            on_error,
            in_flight: Arc::new(AtomicBool::new(false)),
            // Keeps the channel open so a dropped handle never reads as cancel.
            _keepalive: Arc::clone(&cancel_tx),
        };
        tokio::spawn(ticks.run(cancel_rx));

        info!(
            interval_ms = self.interval.as_millis() as u64,
            policy = ?self.policy,
            "metrics poller started"
        );
        CancelHandle { cancel_tx }
    }
}

struct TickLoop {
    source: Arc<dyn MetricsSource>,
    interval: Duration,
    policy: TickPolicy,
    on_data: DataCallback,
    on_error: ErrorCallback,
    in_flight: Arc<AtomicBool>,
    _keepalive: Arc<watch::Sender<bool>>,
}

impl TickLoop {
    async fn run(self, mut cancel: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            if *cancel.borrow() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => {
                    self.fire(tick);
                    tick += 1;
                }
                _ = cancel.changed() => {}
            }
        }

        debug!(ticks = tick, "metrics poller stopped");
    }

    fn fire(&self, tick: u64) {
        let guard = match self.policy {
            TickPolicy::Overlap => None,
            TickPolicy::SingleFlight => {
                if self.in_flight.swap(true, Ordering::AcqRel) {
                    debug!(tick, "previous metrics fetch unresolved, skipping tick");
                    return;
                }
                Some(InFlight(Arc::clone(&self.in_flight)))
            }
        };

        let source = Arc::clone(&self.source);
        let on_data = Arc::clone(&self.on_data);
        let on_error = Arc::clone(&self.on_error);

        tokio::spawn(async move {
            let _guard = guard;
            match source.fetch().await {
                Ok(payload) => {
                    let samples = parse_samples(&payload);
                    debug!(tick, samples = samples.len(), "metrics tick delivered");
                    on_data(samples);
                }
                Err(e) => {
                    debug!(tick, error = %e, "metrics fetch failed");
                    on_error(e);
                }
            }
        });
    }
}

/// Clears the single-flight flag when the fetch task ends.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
