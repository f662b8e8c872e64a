//! Session state and the request orchestrator.
//!
//! A [`Session`] owns all mutable state of one assistant session. Handlers
//! reach it through methods; there is no ambient shared state. Rendering is
//! delegated to a [`SessionView`].

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::consumer::{ConsumeOutcome, consume};
use super::language::{DEFAULT_SOURCE, DEFAULT_TARGET, Language};
use super::prompt::build_prompt;
use super::transport::{GenerateRequest, GenerateTransport};
use crate::error::Result;

pub const EMPTY_TOPIC_NOTICE: &str = "Please enter the topic you need help with.";

/// Everything the user can see or change during a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub topic: String,
    pub source_language: Language,
    pub target_language: Language,
    pub result_text: String,
    pub busy: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            topic: String::new(),
            source_language: DEFAULT_SOURCE,
            target_language: DEFAULT_TARGET,
            result_text: String::new(),
            busy: false,
        }
    }
}

impl SessionState {
    pub const fn phase(&self) -> Phase {
        if self.busy {
            Phase::Streaming
        } else {
            Phase::Idle
        }
    }

    /// The prompt for the current topic and languages.
    pub fn prompt(&self) -> String {
        build_prompt(
            &self.topic,
            self.source_language.name,
            self.target_language.name,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Streaming,
}

/// Render surface for a session: notices, the busy indicator and streamed text.
pub trait SessionView {
    /// A short, transient message to the user (the toast).
    fn notice(&mut self, message: &str);

    fn busy_changed(&mut self, busy: bool);

    /// Called after `increment` has been appended; `result_text` is the full text so far.
    fn append(&mut self, increment: &str, result_text: &str);
}

/// Result of a submission that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Topic was empty; a notice was shown and nothing was sent.
    NeedsTopic,
    /// A request is already in flight; the submission was rejected.
    Busy,
    Completed { increments: usize },
    Cancelled { increments: usize },
}

/// Holds `busy = true` for as long as it lives.
///
/// Acquiring it reports `busy_changed(true)` to the view. Dropping it clears
/// the flag and reports `busy_changed(false)`, whichever way the request
/// ended, including when the request future itself is dropped.
pub struct BusyGuard<'a, V: SessionView + ?Sized> {
    state: &'a mut SessionState,
    view: &'a mut V,
}

impl<'a, V: SessionView + ?Sized> BusyGuard<'a, V> {
    pub fn acquire(state: &'a mut SessionState, view: &'a mut V) -> Self {
        state.busy = true;
        view.busy_changed(true);
        Self { state, view }
    }

    /// Borrows the state and the view together for the duration of a request.
    pub fn parts(&mut self) -> (&mut SessionState, &mut V) {
        (&mut *self.state, &mut *self.view)
    }
}

impl<V: SessionView + ?Sized> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.state.busy = false;
        self.view.busy_changed(false);
    }
}

/// One assistant session: state plus the transport used to reach the generator.
pub struct Session {
    state: SessionState,
    transport: Arc<dyn GenerateTransport>,
}

impl Session {
    pub fn new(transport: Arc<dyn GenerateTransport>) -> Self {
        Self::with_state(transport, SessionState::default())
    }

    pub fn with_state(transport: Arc<dyn GenerateTransport>, state: SessionState) -> Self {
        Self { state, transport }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transport(&self) -> &dyn GenerateTransport {
        self.transport.as_ref()
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.state.topic = topic.into();
    }

    pub const fn set_source_language(&mut self, language: Language) {
        self.state.source_language = language;
    }

    pub const fn set_target_language(&mut self, language: Language) {
        self.state.target_language = language;
    }

    pub fn swap_languages(&mut self) {
        std::mem::swap(
            &mut self.state.source_language,
            &mut self.state.target_language,
        );
    }

    /// Submits the current topic and streams the answer into `result_text`.
    ///
    /// An empty or whitespace-only topic shows [`EMPTY_TOPIC_NOTICE`] and
    /// sends nothing. Otherwise the previous result is cleared, exactly one
    /// request is made, and every increment is appended and rendered as it
    /// arrives. `busy` is reset on every exit path.
    pub async fn submit<V>(
        &mut self,
        view: &mut V,
        cancel: &CancellationToken,
    ) -> Result<SubmitOutcome>
    where
        V: SessionView + ?Sized,
    {
        if self.state.topic.trim().is_empty() {
            view.notice(EMPTY_TOPIC_NOTICE);
            return Ok(SubmitOutcome::NeedsTopic);
        }

        if self.state.busy {
            tracing::debug!("submission rejected: request already in flight");
            return Ok(SubmitOutcome::Busy);
        }

        let transport = Arc::clone(&self.transport);
        self.state.result_text.clear();
        let mut guard = BusyGuard::acquire(&mut self.state, view);
        let (state, view) = guard.parts();
        run_request(transport.as_ref(), state, view, cancel).await
    }
}

async fn run_request<V>(
    transport: &dyn GenerateTransport,
    state: &mut SessionState,
    view: &mut V,
    cancel: &CancellationToken,
) -> Result<SubmitOutcome>
where
    V: SessionView + ?Sized,
{
    let request = GenerateRequest {
        prompt: state.prompt(),
    };

    tracing::info!(
        source = state.source_language.name,
        target = state.target_language.name,
        transport = %transport.describe(),
        "submitting topic"
    );

    let body = tokio::select! {
        biased;
        () = cancel.cancelled() => return Ok(SubmitOutcome::Cancelled { increments: 0 }),
        body = transport.generate(&request) => body?,
    };

    let outcome = consume(body, cancel, |increment| {
        state.result_text.push_str(increment);
        view.append(increment, &state.result_text);
    })
    .await?;

    Ok(match outcome {
        ConsumeOutcome::Completed { increments } => SubmitOutcome::Completed { increments },
        ConsumeOutcome::Cancelled { increments } => SubmitOutcome::Cancelled { increments },
    })
}
