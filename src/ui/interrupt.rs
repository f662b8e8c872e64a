use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels a token when the user presses Ctrl+C.
///
/// The signal watcher lives as long as this value. Dropping it stops
/// watching, so one guard covers exactly one request.
pub struct CtrlCCancel {
    token: CancellationToken,
    watcher: JoinHandle<()>,
}

impl CtrlCCancel {
    pub fn arm() -> Self {
        let token = CancellationToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::debug!("interrupt received, cancelling request");
                    token.cancel();
                }
            }
        });

        Self { token, watcher }
    }

    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for CtrlCCancel {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_starts_uncancelled() {
        let guard = CtrlCCancel::arm();
        assert!(!guard.token().is_cancelled());
    }

    #[tokio::test]
    async fn test_drop_stops_watcher() {
        let guard = CtrlCCancel::arm();
        let token = guard.token().clone();
        drop(guard);
        tokio::task::yield_now().await;
        assert!(!token.is_cancelled());
    }
}
