mod consumer;
mod decoder;
mod language;
mod prompt;
mod session;
mod transport;

pub use consumer::{ByteStream, ConsumeOutcome, consume, text_increments};
pub use decoder::Utf8StreamDecoder;
pub use language::{
    DEFAULT_SOURCE, DEFAULT_TARGET, LANGUAGES, Language, find_language, print_languages,
    validate_language,
};
pub use prompt::{PROMPT_TEMPLATE, build_prompt};
pub use session::{
    BusyGuard, EMPTY_TOPIC_NOTICE, Phase, Session, SessionState, SessionView, SubmitOutcome,
};
pub use transport::{DirectTransport, GenerateRequest, GenerateTransport, HttpTransport};
