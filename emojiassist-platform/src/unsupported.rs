use emojiassist_engine::traits::Clipboard;

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedClipboard;

#[async_trait::async_trait]
impl Clipboard for UnsupportedClipboard {
    fn is_supported(&self) -> bool {
        false
    }

    async fn write_text(&self, _text: &str) -> anyhow::Result<()> {
        anyhow::bail!("clipboard access is not available on this platform")
    }
}
