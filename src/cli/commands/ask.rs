use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{build_transport, load_config};
use crate::assistant::{EMPTY_TOPIC_NOTICE, Session, SessionState, SessionView, SubmitOutcome};
use crate::clipboard::copy_to_clipboard;
use crate::config::{ResolveOptions, resolve_session};
use crate::input::TopicReader;
use crate::ui::{CtrlCCancel, Style, TerminalView};

pub struct AskOptions {
    /// Topic argument; read from stdin when absent.
    pub topic: Option<String>,
    pub resolve: ResolveOptions,
    pub output: Option<PathBuf>,
    pub copy: bool,
}

/// How a one-shot question ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskStatus {
    Answered,
    NeedsTopic,
    Cancelled,
}

pub async fn run_ask(options: AskOptions) -> Result<AskStatus> {
    let topic = TopicReader::read(options.topic.as_deref())?;

    // A blank topic never needs configuration, so it is rejected up front.
    if topic.trim().is_empty() {
        TerminalView::new().notice(EMPTY_TOPIC_NOTICE);
        return Ok(AskStatus::NeedsTopic);
    }

    let config = load_config()?;
    let resolved = resolve_session(&options.resolve, &config)?;
    let transport = build_transport(&resolved.target)?;

    let mut session = Session::with_state(
        transport,
        SessionState {
            topic,
            source_language: resolved.source_language,
            target_language: resolved.target_language,
            ..SessionState::default()
        },
    );

    let interrupt = CtrlCCancel::arm();
    let mut view = TerminalView::new();
    let outcome = session.submit(&mut view, interrupt.token()).await?;
    drop(interrupt);

    if let Some(e) = view.take_write_error()
        && e.kind() != ErrorKind::BrokenPipe
    {
        return Err(e).context("Failed to write answer to stdout");
    }

    match outcome {
        SubmitOutcome::NeedsTopic | SubmitOutcome::Busy => Ok(AskStatus::NeedsTopic),
        SubmitOutcome::Cancelled { .. } => {
            crate::status!("{}", Style::warning("Cancelled."));
            Ok(AskStatus::Cancelled)
        }
        SubmitOutcome::Completed { .. } => {
            let result_text = &session.state().result_text;

            if let Some(path) = &options.output {
                crate::fs::save_result(path, result_text)?;
                crate::status!(
                    "{} Saved to {}",
                    Style::success("✓"),
                    Style::value(path.display())
                );
            }

            if options.copy {
                match copy_to_clipboard(result_text) {
                    Ok(()) => {
                        crate::status!("{} Copied to clipboard", Style::success("✓"));
                    }
                    Err(e) => {
                        crate::warn!("{} {e:#}", Style::warning("Warning:"));
                    }
                }
            }

            Ok(AskStatus::Answered)
        }
    }
}
