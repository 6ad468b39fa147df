//! `rapidmq-dash watch`: poll metrics and print each dataset.

use std::sync::Arc;

use anyhow::Result;
use rapidmq_core::DashConfig;
use rapidmq_metrics::poller::{DataCallback, ErrorCallback};
use rapidmq_metrics::{BoundDataset, FetchError, SlotBinding};
use tokio::sync::mpsc;
use tracing::{info, warn};

enum Tick {
    Data(BoundDataset),
    Failed(FetchError),
}

pub async fn watch(config: DashConfig, count: Option<u64>) -> Result<()> {
    let poller = super::metrics_poller(&config)?;
    let binding = SlotBinding::from_config(&config.metrics);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let data_tx = tx.clone();
    let on_data: DataCallback = Arc::new(move |samples| {
        let _ = data_tx.send(Tick::Data(binding.bind(&samples)));
    });
    let on_error: ErrorCallback = Arc::new(move |e| {
        let _ = tx.send(Tick::Failed(e));
    });

    info!(backend = %config.backend.base_url, "watching metrics");
    let handle = poller.start(on_data, on_error);
    let mut delivered = 0u64;

    loop {
        tokio::select! {
            tick = rx.recv() => match tick {
                Some(Tick::Data(dataset)) => {
                    print_dataset(&dataset);
                    delivered += 1;
                    if count.is_some_and(|n| delivered >= n) {
                        break;
                    }
                }
                // A failed tick is skipped; the next one is already scheduled.
                Some(Tick::Failed(e)) => warn!(error = %e, "metrics fetch failed"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    handle.cancel();
    Ok(())
}

fn print_dataset(dataset: &BoundDataset) {
    let width = dataset.labels.iter().map(String::len).max().unwrap_or(0);
    for (label, value) in dataset.labels.iter().zip(&dataset.values) {
        println!("{label:<width$}  {value}");
    }
    if !dataset.missing.is_empty() {
        println!("(missing: {})", dataset.missing.join(", "));
    }
    println!();
}
