//! # langassist - Streaming Language Assistant
//!
//! `langassist` asks an OpenAI-compatible model to translate and explain a
//! topic. The topic is about one language (the source) and the answer is
//! written in another (the target). Answers stream to the terminal as they
//! are generated.
//!
//! ## Quick Start
//!
//! ```bash
//! # Ask once (Spanish topic, English answer by default)
//! langassist "ser vs estar"
//!
//! # Pick languages by code or name
//! langassist --from fr --to Japanese "French cuisine"
//!
//! # Interactive session
//! langassist chat
//!
//! # Run the local generation endpoint and point the CLI at it
//! langassist serve &
//! langassist -e http://127.0.0.1:3000/api/generate "subjuntivo"
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/langassist/config.toml`:
//!
//! ```toml
//! [assist]
//! provider = "openai"
//! from = "es"
//! to = "en"
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! models = ["gpt-3.5-turbo"]
//! ```

/// Prompt construction, stream decoding and the session orchestrator.
pub mod assistant;

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// System clipboard access.
pub mod clipboard;

/// Configuration file management and option resolution.
pub mod config;

/// Typed errors for requests, streams and validation.
pub mod error;

/// File system utilities.
pub mod fs;

/// Reading the topic from arguments or stdin.
pub mod input;

/// `tracing` subscriber setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style config directory resolution.
pub mod paths;

/// Client for OpenAI-compatible streaming chat completions.
pub mod provider;

/// The local `POST /api/generate` endpoint.
pub mod server;

/// Terminal UI components (spinner, colors, session view).
pub mod ui;
