use crate::traits::{Clipboard, Notification, Notifier, ShareError, SharePayload, ShareTarget};
use emojiassist_core::text::join_emojis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Placeholder tiles shown while a request is in flight.
pub const LOADING_PLACEHOLDERS: usize = 12;

pub const SHARE_TITLE: &str = "Emoji Challenge - Guess the Emojis!";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PresenterInputs {
    pub emojis: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub has_searched: bool,
    pub detected_language: Option<String>,
    pub input_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultView {
    Loading { placeholders: usize },
    Error { message: String },
    NotSearched,
    Empty,
    Tiles {
        emojis: Vec<String>,
        detected_language: Option<String>,
    },
}

impl ResultView {
    pub fn title(&self) -> &'static str {
        match self {
            ResultView::Loading { .. } => "Suggesting...",
            ResultView::Error { .. } => "Oops! Something went wrong.",
            ResultView::NotSearched => "Enter text above to get emoji suggestions.",
            ResultView::Empty => "No emojis found for your text.",
            ResultView::Tiles { .. } => "Suggested Emojis",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ResultView::Error { message } => Some(message),
            ResultView::Empty => Some("Try different keywords or be more specific."),
            _ => None,
        }
    }

    /// Copy-all and share are only offered next to actual tiles.
    pub fn has_actions(&self) -> bool {
        matches!(self, ResultView::Tiles { .. })
    }
}

/// Picks the single view to show.
///
/// Precedence: loading, then error, then not-yet-searched, then empty, then tiles.
pub fn present(inputs: &PresenterInputs) -> ResultView {
    if inputs.is_loading {
        return ResultView::Loading {
            placeholders: LOADING_PLACEHOLDERS,
        };
    }
    if let Some(message) = &inputs.error {
        return ResultView::Error {
            message: message.clone(),
        };
    }
    if !inputs.has_searched {
        return ResultView::NotSearched;
    }
    if inputs.emojis.is_empty() {
        return ResultView::Empty;
    }
    ResultView::Tiles {
        emojis: inputs.emojis.clone(),
        detected_language: inputs.detected_language.clone(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// Dismissed by the user; deliberately silent.
    Cancelled,
    Unsupported,
    Failed,
    NothingToShare,
}

/// Side-effecting tile actions: copy one, copy all, share.
pub struct EmojiDisplay {
    clipboard: Arc<dyn Clipboard>,
    share: Arc<dyn ShareTarget>,
    notifier: Arc<dyn Notifier>,
}

impl EmojiDisplay {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        share: Arc<dyn ShareTarget>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            clipboard,
            share,
            notifier,
        }
    }

    pub async fn copy_one(&self, emoji: &str) -> bool {
        if !self.clipboard.is_supported() {
            self.notify_clipboard_unsupported();
            return false;
        }

        match self.clipboard.write_text(emoji).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "Copied! 🎉",
                    format!("{emoji} Copied to clipboard."),
                ));
                true
            }
            Err(e) => {
                log::warn!("copy emoji failed: {e:#}");
                self.notifier.notify(Notification::error(
                    "Copy Failed 😥",
                    "Could not copy emoji to clipboard.",
                ));
                false
            }
        }
    }

    /// Copies every emoji, space separated, in display order. No-op for an empty list.
    pub async fn copy_all(&self, emojis: &[String]) -> bool {
        if emojis.is_empty() {
            return false;
        }
        if !self.clipboard.is_supported() {
            self.notify_clipboard_unsupported();
            return false;
        }

        match self.clipboard.write_text(&join_emojis(emojis)).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "All Emojis Copied! 📋",
                    format!("{} emojis copied to clipboard.", emojis.len()),
                ));
                true
            }
            Err(e) => {
                log::warn!("copy all emojis failed: {e:#}");
                self.notifier.notify(Notification::error(
                    "Copy Failed 😥",
                    "Could not copy all emojis to clipboard.",
                ));
                false
            }
        }
    }

    pub async fn share(&self, emojis: &[String]) -> ShareOutcome {
        if emojis.is_empty() {
            return ShareOutcome::NothingToShare;
        }
        if !self.share.is_supported() {
            self.notifier.notify(Notification::error(
                "Not Supported 🙁",
                "Sharing is not supported on this device.",
            ));
            return ShareOutcome::Unsupported;
        }

        let payload = SharePayload {
            title: SHARE_TITLE.into(),
            text: join_emojis(emojis),
        };

        match self.share.share(&payload).await {
            Ok(()) => {
                self.notifier.notify(Notification::info(
                    "Emojis Shared! 📢",
                    "The charade has been shared.",
                ));
                ShareOutcome::Shared
            }
            Err(ShareError::Cancelled) => {
                log::debug!("share dialog dismissed by user");
                ShareOutcome::Cancelled
            }
            Err(ShareError::Failed(reason)) => {
                log::warn!("share failed: {reason}");
                self.notifier.notify(Notification::error(
                    "Share Failed 😥",
                    "Could not share the emoji charade.",
                ));
                ShareOutcome::Failed
            }
        }
    }

    fn notify_clipboard_unsupported(&self) {
        self.notifier.notify(Notification::error(
            "Not Supported 🙁",
            "Clipboard access is not available on this device.",
        ));
    }
}
