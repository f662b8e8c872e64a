use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::assistant::{DEFAULT_SOURCE, DEFAULT_TARGET, Language, validate_language};
use crate::paths;
use crate::provider::CompletionOptions;
use crate::ui::Style;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Default settings in the `[assist]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Default language the topic is about.
    pub from: Option<String>,
    /// Default language of the answer.
    pub to: Option<String>,
    /// Generation endpoint to post prompts to (e.g. a running `langassist serve`).
    pub endpoint: Option<String>,
}

/// Settings for `langassist serve` in the `[server]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Configuration for a generation provider.
///
/// Each provider has an endpoint and optional API key settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/langassist/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub assist: AssistConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// CLI overrides; they take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
}

/// A provider with everything needed to call it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub provider_name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub options: CompletionOptions,
}

/// Where a session sends its prompts.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportTarget {
    /// POST `{"prompt"}` to a generation endpoint.
    Proxy { url: String },
    /// Call the provider in-process.
    Direct(ResolvedProvider),
}

/// Resolved settings for an ask or chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub source_language: Language,
    pub target_language: Language,
    pub target: TransportTarget,
}

/// Resolves the languages and transport for a session.
///
/// An endpoint (CLI or config) selects the proxy transport; without one the
/// provider is resolved and called directly.
pub fn resolve_session(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedSession> {
    let source_language = resolve_language(
        options.from.as_deref(),
        config_file.assist.from.as_deref(),
        DEFAULT_SOURCE,
    )?;
    let target_language = resolve_language(
        options.to.as_deref(),
        config_file.assist.to.as_deref(),
        DEFAULT_TARGET,
    )?;

    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.assist.endpoint.as_ref());

    let target = match endpoint {
        Some(url) => TransportTarget::Proxy { url: url.clone() },
        None => TransportTarget::Direct(resolve_provider(options, config_file)?),
    };

    Ok(ResolvedSession {
        source_language,
        target_language,
        target,
    })
}

fn resolve_language(
    cli: Option<&str>,
    file: Option<&str>,
    default: Language,
) -> Result<Language> {
    match cli.or(file) {
        Some(input) => Ok(validate_language(input)?),
        None => Ok(default),
    }
}

/// Resolves provider, model and API key by merging CLI options with the config file.
///
/// # Errors
///
/// Returns an error if no provider is selected, the provider is unknown, no
/// model can be determined, or a required API key is missing.
pub fn resolve_provider(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedProvider> {
    let provider_name = options
        .provider
        .as_ref()
        .or(config_file.assist.provider.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'provider'\n\n\
                 Please provide it via:\n  \
                 - CLI option: langassist --provider <name>\n  \
                 - Config file: ~/.config/langassist/config.toml\n\n\
                 Or point at a running proxy with --endpoint <url>."
            )
        })?;

    let provider_config = config_file.providers.get(&provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/langassist/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{provider_name}' not found\n\n\
                 Available providers:\n  \
                 - {}",
                available.join("\n  - ")
            )
        }
    })?;

    // Fall back to the provider's first listed model.
    let model = options
        .model
        .as_ref()
        .or(config_file.assist.model.as_ref())
        .or(provider_config.models.first())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: langassist --model <name>\n  \
                 - Config file: ~/.config/langassist/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        crate::warn!(
            "{} Model '{}' is not in the configured models list for '{}'\n\
             Configured models: {}\n\
             Proceeding anyway...\n",
            Style::warning("Warning:"),
            model,
            provider_name,
            provider_config.models.join(", ")
        );
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/langassist/config.toml"
        );
    }

    let defaults = CompletionOptions::default();
    let completion = CompletionOptions {
        temperature: config_file
            .server
            .temperature
            .unwrap_or(defaults.temperature),
        max_tokens: config_file.server.max_tokens.unwrap_or(defaults.max_tokens),
    };

    Ok(ResolvedProvider {
        provider_name,
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
        options: completion,
    })
}

/// Resolves the proxy's listen address: CLI, then `[server] bind`, then [`DEFAULT_BIND`].
pub fn resolve_bind(cli: Option<&str>, config_file: &ConfigFile) -> Result<SocketAddr> {
    let bind = cli
        .or(config_file.server.bind.as_deref())
        .unwrap_or(DEFAULT_BIND);

    bind.parse()
        .with_context(|| format!("Invalid bind address: '{bind}' (expected e.g. {DEFAULT_BIND})"))
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/langassist/config.toml`
    /// or `~/.config/langassist/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        crate::fs::atomic_write(&self.config_path, &contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
    }
}
