use std::sync::Arc;

use emojiassist_engine::traits::Clipboard;

pub mod test;
pub mod unsupported;

#[cfg(windows)]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

pub fn platform_clipboard() -> Arc<dyn Clipboard> {
    #[cfg(windows)]
    {
        Arc::new(windows::WindowsClipboard)
    }

    #[cfg(target_os = "macos")]
    {
        Arc::new(macos::MacClipboard)
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        Arc::new(unsupported::UnsupportedClipboard)
    }
}
