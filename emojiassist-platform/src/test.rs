use std::io::Write;
use std::sync::Mutex;

use emojiassist_engine::traits::{
    Clipboard, Notification, NotificationLevel, Notifier, ShareError, SharePayload, ShareTarget,
};

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<String> {
        self.writes.lock().ok()?.last().cloned()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        self.writes
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}

/// Records payloads. `dismiss` makes every share behave like a closed share sheet.
#[derive(Debug, Default)]
pub struct MemoryShareTarget {
    pub shared: Mutex<Vec<SharePayload>>,
    pub dismiss: bool,
}

#[async_trait::async_trait]
impl ShareTarget for MemoryShareTarget {
    fn is_supported(&self) -> bool {
        true
    }

    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        if self.dismiss {
            return Err(ShareError::Cancelled);
        }
        self.shared
            .lock()
            .map_err(|_| ShareError::Failed("share target poisoned".into()))?
            .push(payload.clone());
        Ok(())
    }
}

/// Prints the payload so it can be copied out of a terminal.
#[derive(Debug, Default)]
pub struct StdoutShareTarget;

#[async_trait::async_trait]
impl ShareTarget for StdoutShareTarget {
    fn is_supported(&self) -> bool {
        true
    }

    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "[share] {}\n{}", payload.title, payload.text)
            .map_err(|e| ShareError::Failed(e.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub seen: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen
            .lock()
            .map(|seen| seen.iter().map(|n| n.title.clone()).collect())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

#[derive(Debug, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Info => {
                log::info!("{}: {}", n.title, n.description);
                println!("[{}] {}", n.title, n.description);
            }
            NotificationLevel::Error => {
                log::warn!("{}: {}", n.title, n.description);
                eprintln!("[{}] {}", n.title, n.description);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_adapters_record_in_order() {
        let clipboard = MemoryClipboard::default();
        clipboard.write_text("🐱").await.unwrap();
        clipboard.write_text("🐱 🐾").await.unwrap();
        assert_eq!(clipboard.last().as_deref(), Some("🐱 🐾"));

        let notifier = MemoryNotifier::default();
        notifier.notify(Notification::info("Copied! 🎉", "🐱 Copied to clipboard."));
        assert_eq!(notifier.titles(), vec!["Copied! 🎉"]);
    }

    #[tokio::test]
    async fn dismissing_share_target_reports_cancel() {
        let target = MemoryShareTarget {
            dismiss: true,
            ..Default::default()
        };
        let payload = SharePayload {
            title: "t".into(),
            text: "🐱".into(),
        };
        assert_eq!(target.share(&payload).await, Err(ShareError::Cancelled));
        assert!(target.shared.lock().unwrap().is_empty());
    }
}
