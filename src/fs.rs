//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// The temp file is created next to the target so the rename stays on one
/// filesystem. An interrupted write leaves the previous file untouched.
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("Not a file path: {}", path.display()))?
        .to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Saves an assistant answer, adding a trailing newline if it lacks one.
pub fn save_result(path: &Path, result_text: &str) -> Result<()> {
    let content = if result_text.ends_with('\n') || result_text.is_empty() {
        result_text.to_string()
    } else {
        format!("{result_text}\n")
    };

    atomic_write(path, &content).with_context(|| format!("Failed to write {}", path.display()))
}
