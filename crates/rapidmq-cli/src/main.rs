//! rapidmq-dash — backend for the RapidMQ operator dashboard.
//!
//! # Usage
//!
//! ```text
//! rapidmq-dash serve --port 3000
//! rapidmq-dash watch --count 3
//! rapidmq-dash say "publish message hello to queue orders"
//! rapidmq-dash --backend http://mq.internal:8080 config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rapidmq_core::DashConfig;
use rapidmq_core::config::DEFAULT_CONFIG_FILE;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "rapidmq-dash",
    about = "RapidMQ dashboard: metrics polling and voice commands",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Queue service base URL (overrides [backend].base_url)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Metrics poll interval in milliseconds (overrides [metrics].interval_ms)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Poll metrics and serve the dashboard API.
    Serve {
        /// Address to bind (overrides [api].bind)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides [api].port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Poll metrics and print each dataset.
    Watch {
        /// Stop after this many datasets.
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
        /// Skip ticks while a fetch is still in flight.
        #[arg(long)]
        single_flight: bool,
    },
    /// Dispatch one voice phrase, e.g. `say create queue orders`.
    Say {
        /// The phrase, as the speech engine would hear it.
        #[arg(required = true, num_args = 1..)]
        phrase: Vec<String>,
    },
    /// Print the resolved configuration.
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rapidmq=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = DashConfig::load_or_default(&cli.config)?;
    if let Some(backend) = cli.backend {
        config.backend.base_url = backend;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.metrics.interval_ms = interval_ms;
    }

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                config.api.bind = bind;
            }
            if let Some(port) = port {
                config.api.port = port;
            }
            config.validate()?;
            commands::serve::serve(config).await
        }
        Commands::Watch {
            count,
            single_flight,
        } => {
            config.metrics.single_flight |= single_flight;
            config.validate()?;
            commands::watch::watch(config, count).await
        }
        Commands::Say { phrase } => {
            config.validate()?;
            commands::say::say(&config, &phrase.join(" ")).await
        }
        Commands::Config => commands::config::print(&config),
    }
}
