// Copyright (c) 2025 - MV Consulting
//! VS Code Server Synthesizer
//!
//! Reads a `VSCodeServerProps` JSON document, validates it, materializes it
//! with the in-process blueprint engine and prints the construct outputs
//! together with the rendered deployment blueprint.
//!
//! Run with: cargo run --bin vscode-server-synth
//!
//! Environment:
//! - `VSCODE_SERVER_PROPS` - path of the props JSON (empty props when unset)
//! - `VSCODE_SERVER_ID` - construct id (default `VSCodeServer`)
//! - `VSCODE_SERVER_STACK` - stack name (default `vscode-server`)

use anyhow::{Context, Result};
use cdk_vscode_server::config::SynthConfig;
use cdk_vscode_server::{BlueprintEngine, VSCodeServer};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let synth = SynthConfig::from_env();
    info!(
        stack = %synth.stack_name,
        id = %synth.construct_id,
        props = ?synth.props_path,
        "Synthesizing VSCodeServer"
    );

    let props = synth.load_props().context("Failed to load VSCodeServer props")?;
    let mut server = VSCodeServer::new(&synth.stack_name, &synth.construct_id, &props)
        .context("Invalid VSCodeServer props")?;

    let engine = BlueprintEngine::new();
    server
        .construct(&engine)
        .await
        .context("Failed to materialize VSCodeServer")?;

    let path = server.node().path();
    let blueprint = engine
        .blueprint(&path)?
        .with_context(|| format!("No blueprint rendered for {path}"))?;

    let document = json!({
        "construct": server.to_string(),
        "outputs": {
            "domainName": server.domain_name()?,
            "url": server.url()?,
            "statusApiUrl": server.status_api_url()?,
        },
        "blueprint": blueprint,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);

    info!(construct = %path, "✅ Synthesis complete");
    Ok(())
}
