//! wkrk CLI entry point.
//!
//! Serves a demo route table over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wkrk_common::ConfigFile;
use wkrk_core::{HandlerParams, RouteEntry, RouteTable, Wkrk, sync};
use wkrk_server::{Env, ExecutionContext, ServerConfig, WkrkServer};

type Params = HandlerParams<Env, ExecutionContext>;

/// Minimal request router for edge-function style handlers.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "WKRK_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration file.
    #[arg(short, long, env = "WKRK_BIND_ADDR")]
    bind: Option<SocketAddr>,
}

fn demo_routes() -> RouteTable<Env, ExecutionContext> {
    RouteTable::new()
        .route(
            "/",
            RouteEntry::new().get(sync(|p: Params| Ok(p.res.send("Hello world!")))),
        )
        .route(
            "/json",
            RouteEntry::new().get(sync(|p: Params| {
                Ok(p.res.json(&serde_json::json!({ "hello": "world" }))?)
            })),
        )
        .route(
            "/echo",
            RouteEntry::new().handler(sync(|p: Params| {
                let body = serde_json::json!({
                    "method": p.req.method().as_str(),
                    "query": p.req.query(),
                    "greeting": p.env.var("GREETING"),
                    "request_id": p.ctx.request_id,
                });
                Ok(p.res.json(&body)?)
            })),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wkrk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    info!("Starting wkrk");

    // Load configuration
    let file = match &cli.config {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigFile::default(),
    };

    let mut server_config =
        ServerConfig::try_from(&file.server).context("Invalid [server] configuration")?;
    if let Some(bind) = cli.bind {
        server_config = server_config.with_bind_addr(bind);
    }

    info!(
        bind_addr = %server_config.bind_addr,
        error_format = ?file.router.error_format,
        vars = file.vars.len(),
        "Configuration loaded"
    );

    let app = Wkrk::with_config(demo_routes(), file.router);
    let env = Env::new(file.vars);

    info!("Server initialized. Available routes:");
    for path in app.routes().paths() {
        info!("  {path}");
    }

    WkrkServer::new(app, env, server_config).run().await?;

    Ok(())
}
