//! Outbound "send text" seam used by the reminder pass.

use async_trait::async_trait;
use tracing::info;

/// Something that can deliver a rendered reminder.
///
/// Implementations report delivery with the returned flag; callers log
/// failures and move on, nothing is retried.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> bool;
}

/// Notifier that writes each message to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_message(&self, text: &str) -> bool {
        let rule = "=".repeat(60);
        info!("\n{}\n{}\n{}", rule, text, rule);
        true
    }
}
