//! Configuration file handling and option resolution.

mod manager;

pub use manager::{
    AssistConfig, ConfigFile, ConfigManager, DEFAULT_BIND, ProviderConfig, ResolveOptions,
    ResolvedProvider, ResolvedSession, ServerConfig, TransportTarget, resolve_bind,
    resolve_provider, resolve_session,
};
