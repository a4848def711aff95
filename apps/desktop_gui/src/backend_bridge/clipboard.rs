use anyhow::{Context, Result};
use arboard::Clipboard;
use async_trait::async_trait;
use upload_core::ClipboardSink;

/// System clipboard through `arboard`. A fresh handle is opened per write so
/// nothing platform-specific is held between copies.
pub struct ArboardClipboard;

#[async_trait]
impl ClipboardSink for ArboardClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut clipboard = Clipboard::new().context("failed to open system clipboard")?;
            clipboard
                .set_text(text)
                .context("failed to write text to system clipboard")?;
            Ok(())
        })
        .await
        .context("clipboard worker panicked")?
    }
}
