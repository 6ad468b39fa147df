//! `rapidmq-dash config`: print the resolved configuration.

use anyhow::Result;
use rapidmq_core::DashConfig;

pub fn print(config: &DashConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
