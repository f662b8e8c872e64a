//! Copying an answer to the system clipboard.

use anyhow::{Result, bail};

/// Copies `text` to the system clipboard.
///
/// # Errors
///
/// Fails when `text` is empty, when no clipboard is available (e.g. a
/// headless session), or on platforms without clipboard support.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text.is_empty() {
        bail!("Nothing to copy yet");
    }
    set_text(text)
}

#[cfg(not(target_os = "android"))]
fn set_text(text: &str) -> Result<()> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text.to_owned())
        .context("Failed to copy to clipboard")?;
    tracing::debug!(chars = text.chars().count(), "copied answer to clipboard");
    Ok(())
}

#[cfg(target_os = "android")]
fn set_text(_text: &str) -> Result<()> {
    bail!("Clipboard is not supported on this platform")
}
