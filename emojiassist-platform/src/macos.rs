//! macOS clipboard via the general NSPasteboard.

use emojiassist_engine::traits::Clipboard;
use objc2_app_kit::{NSPasteboard, NSPasteboardTypeString};
use objc2_foundation::NSString;

#[derive(Debug, Default, Clone, Copy)]
pub struct MacClipboard;

fn write_pasteboard(text: &str) -> anyhow::Result<()> {
    let pasteboard = NSPasteboard::generalPasteboard();
    unsafe {
        pasteboard.clearContents();
    }

    let ns_text = NSString::from_str(text);
    if !pasteboard.setString_forType(&ns_text, unsafe { NSPasteboardTypeString }) {
        anyhow::bail!("pasteboard rejected the text");
    }
    Ok(())
}

#[async_trait::async_trait]
impl Clipboard for MacClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        write_pasteboard(text)
    }
}
