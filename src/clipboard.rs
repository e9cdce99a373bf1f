//! System clipboard integration

use anyhow::{Context, Result};

/// Put text on the system clipboard
pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().context("failed to open the system clipboard")?;
    clipboard
        .set_text(text.to_string())
        .context("failed to write to the system clipboard")?;
    Ok(())
}
