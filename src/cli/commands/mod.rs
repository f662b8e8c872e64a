//! Subcommand implementations.

use anyhow::Result;
use std::sync::Arc;

use crate::assistant::{DirectTransport, GenerateTransport, HttpTransport};
use crate::config::{ConfigFile, ConfigManager, ResolvedProvider, TransportTarget};
use crate::provider::ProviderClient;

/// One-shot question handler (the default command).
pub mod ask;

/// Chat mode command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// Local generation endpoint handler.
pub mod serve;

/// Loads the user's config file, treating a missing file as empty.
pub fn load_config() -> Result<ConfigFile> {
    ConfigManager::new()?.load_or_default()
}

pub fn provider_client(provider: &ResolvedProvider) -> Result<ProviderClient> {
    Ok(ProviderClient::new(
        provider.endpoint.clone(),
        provider.model.clone(),
        provider.api_key.clone(),
        provider.options,
    )?)
}

/// Builds the transport a session sends its prompts through.
pub fn build_transport(target: &TransportTarget) -> Result<Arc<dyn GenerateTransport>> {
    let transport: Arc<dyn GenerateTransport> = match target {
        TransportTarget::Proxy { url } => Arc::new(HttpTransport::new(url.clone())?),
        TransportTarget::Direct(provider) => Arc::new(DirectTransport::new(
            provider_client(provider)?,
            provider.provider_name.clone(),
        )),
    };

    tracing::debug!(transport = %transport.describe(), "transport ready");
    Ok(transport)
}
