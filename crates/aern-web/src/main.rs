//! AERN — AI Emergency Response Navigator.
//!
//! Thin front-end over the JamAI table service: collects emergency-report
//! input (text, audio, photo, or any combination), routes it to the right
//! remote table, and displays the generated description and summary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aern_client::{Credentials, JamClient, api_base_from_env, tables_from_env};

mod page;
mod routes;
mod submission;

#[derive(Parser, Debug)]
#[command(name = "aern", version, about = "AI Emergency Response Navigator")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "AERN_BIND", default_value = "127.0.0.1:8700")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Credentials are checked before anything else is wired up; without
    // them the process refuses to start.
    let credentials = Credentials::from_env()
        .context("missing JamAI credentials: set JAMAI_PROJECT_ID and JAMAI_PAT_KEY")?;
    let base_url = api_base_from_env();
    let tables = tables_from_env();
    info!(base_url = %base_url, combined_table = %tables.combined, "configuration loaded");

    let state = routes::AppState {
        client: Arc::new(JamClient::new(credentials, base_url)),
        tables: Arc::new(tables),
    };
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("listening on http://{}", args.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
