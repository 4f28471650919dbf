//! opslog CLI.
//!
//! `opslog [MESSAGE...]` processes the joined arguments as one message. With
//! no arguments every non-blank stdin line is processed as its own message.
//! The config file is taken from `OPSLOG_CONFIG`, then `opslog.yaml` in the
//! working directory, then built-in defaults.

use std::io::BufRead;
use std::path::Path;

use anyhow::Context;
use opslog::{LoggingConfig, OpsConfig, Pipeline};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "opslog.yaml";

fn load_config() -> anyhow::Result<OpsConfig> {
    match std::env::var("OPSLOG_CONFIG") {
        Ok(path) => OpsConfig::from_file(&path).with_context(|| format!("loading {path}")),
        Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => OpsConfig::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("loading {DEFAULT_CONFIG_FILE}")),
        Err(_) => Ok(OpsConfig::from_env()?),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config()?;
    init_tracing(&config.logging);
    let pipeline = Pipeline::from_config(&config)?;
    tracing::info!(
        store = ?config.store.backend,
        extract_mode = %config.extract.mode,
        "opslog.started"
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        println!("{}", pipeline.handle(&args.join(" ")).await);
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", pipeline.handle(&line).await);
    }
    Ok(())
}
