use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;

use super::{load_config, provider_client};
use crate::assistant::DirectTransport;
use crate::config::{ResolveOptions, resolve_bind, resolve_provider};
use crate::server::{self, AppState, GENERATE_PATH};
use crate::ui::Style;

pub struct ServeOptions {
    pub bind: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Runs the local generation endpoint until Ctrl+C.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let config = load_config()?;
    let provider = resolve_provider(
        &ResolveOptions {
            provider: options.provider,
            model: options.model,
            ..ResolveOptions::default()
        },
        &config,
    )?;
    let addr = resolve_bind(options.bind.as_deref(), &config)?;

    let upstream = DirectTransport::new(
        provider_client(&provider)?,
        provider.provider_name.clone(),
    );
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local = listener.local_addr().unwrap_or(addr);

    crate::status!(
        "{} Serving {} via {} on {}",
        Style::success("✓"),
        Style::value(format!("POST {GENERATE_PATH}")),
        Style::value(format!("{} ({})", provider.provider_name, provider.model)),
        Style::value(format!("http://{local}"))
    );
    crate::status!("{}", Style::hint("Press Ctrl+C to stop."));

    server::serve(listener, AppState::new(Arc::new(upstream)), shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
