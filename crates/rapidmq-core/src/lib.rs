pub mod config;
pub mod types;

pub use config::DashConfig;
pub use types::*;
