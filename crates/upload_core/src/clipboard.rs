use anyhow::{anyhow, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Used when the host has no system clipboard; every write fails.
pub struct UnavailableClipboard;

#[async_trait]
impl ClipboardSink for UnavailableClipboard {
    async fn write_text(&self, _text: &str) -> Result<()> {
        Err(anyhow!("system clipboard unavailable"))
    }
}
