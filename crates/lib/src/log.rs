use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone, ValueEnum)]
pub enum LoggingFormat {
    Standard,
    Json,
}

const DEFAULT_LOG_FILTER: &str = "info,jsonrpsee=warn,reqwest=warn,hyper=warn";

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. `log` records from the library are picked up through the subscriber's
/// log bridge.
pub fn setup_logging(format: &LoggingFormat) {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
    match format {
        LoggingFormat::Standard => subscriber.init(),
        LoggingFormat::Json => subscriber.json().init(),
    }
}
