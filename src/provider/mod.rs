//! Upstream text-generation provider (OpenAI-compatible chat completions).

mod client;
mod sse_parser;

pub use client::{
    CompletionOptions, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, ProviderClient, TextStream,
};
pub use sse_parser::sse_to_text_stream;
