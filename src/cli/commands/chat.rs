use anyhow::Result;

use super::{build_transport, load_config};
use crate::assistant::{Session, SessionState};
use crate::chat::ChatSession;
use crate::config::{ResolveOptions, resolve_session};

pub async fn run_chat(options: ResolveOptions) -> Result<()> {
    let config = load_config()?;
    let resolved = resolve_session(&options, &config)?;
    let transport = build_transport(&resolved.target)?;

    let session = Session::with_state(
        transport,
        SessionState {
            source_language: resolved.source_language,
            target_language: resolved.target_language,
            ..SessionState::default()
        },
    );

    ChatSession::new(session).run().await
}
