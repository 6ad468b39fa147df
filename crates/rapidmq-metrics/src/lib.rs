//! rapidmq-metrics — turns the queue service's `/metrics` text feed into
//! dashboard data.
//!
//! Parses the line-oriented exposition format, groups samples into
//! per-metric series, binds them to the dashboard's configured slots, and
//! runs the periodic poll loop that feeds a consumer.
//!
//! # Architecture
//!
//! ```text
//! MetricsPoller
//!   ├── tick (immediately, then every interval)
//!   │   ├── MetricsSource::fetch() → payload
//!   │   ├── parse_samples() → Vec<MetricSample>
//!   │   └── on_data(samples)    | on_error(FetchError)
//!   └── CancelHandle::cancel() stops future ticks
//!
//! SlotBinding::bind(samples)
//!   ├── name lookup per configured slot (missing → default)
//!   └── group() labelled samples into per-metric series
//! ```
//!
//! Ticks are independent. With `TickPolicy::Overlap` a slow fetch can
//! still be running when the next tick starts, so consumers must accept
//! out-of-order deliveries. `TickPolicy::SingleFlight` skips a tick while
//! the previous fetch is unresolved.

pub mod error;
pub mod exposition;
pub mod grouping;
pub mod poller;
pub mod slots;

pub use error::FetchError;
pub use exposition::{parse_samples, parse_values};
pub use grouping::{group, group_with_keys};
pub use poller::{CancelHandle, MetricsPoller, MetricsSource, TickPolicy};
pub use slots::{BoundDataset, MetricSeries, SlotBinding, bind_positional};
