//! Main entry point for CLI command to start server.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::configuration::Configuration;
use crate::configuration::generate_config_schema;
use crate::controllers::Controllers;
use crate::controllers::RestBackend;
use crate::graphql;
use crate::server;

/// Options for the façade
#[derive(Parser, Debug)]
#[command(name = "heroes-graphql", about = "GraphQL façade over the heroes controllers")]
struct Opt {
    /// Log level (off|error|warn|info|debug|trace).
    #[arg(
        long = "log",
        default_value = "info",
        alias = "log-level",
        env = "HEROES_LOG"
    )]
    log_level: String,

    /// Configuration location relative to the current directory.
    #[arg(short, long = "config", env = "HEROES_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Prints the configuration schema.
    #[arg(long = "config-schema")]
    config_schema: bool,
}

/// This is the main entrypoint.
pub fn main() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(start())
}

async fn start() -> Result<()> {
    let opt = Opt::parse();

    if opt.config_schema {
        let schema = generate_config_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let builder = tracing_subscriber::fmt::fmt().with_env_filter(
        EnvFilter::try_new(&opt.log_level).context("could not parse log configuration")?,
    );
    let installed = if std::io::stdout().is_terminal() {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
    installed
        .map_err(|error| anyhow::anyhow!(error))
        .context("could not set the global subscriber")?;

    let configuration = match &opt.config_path {
        Some(path) => {
            let path = if path.is_relative() {
                std::env::current_dir()?.join(path)
            } else {
                path.clone()
            };
            tracing::info!(path = %path.display(), "loading configuration");
            Configuration::from_file(&path)?
        }
        None => Configuration::default(),
    };

    let backend = Arc::new(
        RestBackend::new(&configuration.backend, configuration.cache_ttl_header.clone())
            .map_err(|error| anyhow::anyhow!(error))
            .context("could not create the backend client")?,
    );
    let schema = graphql::schema(
        Controllers::new(backend.clone(), backend),
        configuration.locale()?,
    )?;
    let app = server::router(&configuration, schema);

    let listener = tokio::net::TcpListener::bind(configuration.server.listen)
        .await
        .with_context(|| format!("could not listen on {}", configuration.server.listen))?;
    tracing::info!(
        "serving GraphQL on http://{}{}",
        listener.local_addr()?,
        configuration.server.graphql_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "could not listen for the shutdown signal");
        return;
    }
    tracing::info!("shutting down");
}
