use emojiassist_core::examples::EXAMPLE_TEXTS;
use emojiassist_core::validation::{char_count_label, is_over_limit};
use emojiassist_engine::presenter::ResultView;

pub fn render_view(view: &ResultView) -> String {
    let mut out = String::from(view.title());

    match view {
        ResultView::Loading { placeholders } => {
            out.push('\n');
            out.push_str(&vec!["[ ]"; *placeholders].join(" "));
        }
        ResultView::Tiles {
            emojis,
            detected_language,
        } => {
            if let Some(lang) = detected_language {
                out.push_str(&format!(" (language: {lang})"));
            }
            out.push('\n');
            let tiles: Vec<String> = emojis
                .iter()
                .enumerate()
                .map(|(i, e)| format!("[{}] {e}", i + 1))
                .collect();
            out.push_str(&tiles.join("  "));
        }
        _ => {}
    }

    if let Some(detail) = view.detail() {
        out.push('\n');
        out.push_str(detail);
    }
    if view.has_actions() {
        out.push_str("\n:copy N  :copy-all  :share");
    }
    out
}

pub fn render_examples() -> String {
    let chips: Vec<String> = EXAMPLE_TEXTS
        .iter()
        .enumerate()
        .map(|(i, ex)| format!("[{}] {} {}", i + 1, ex.label, ex.text))
        .collect();
    format!("Try an example (:example N):\n{}", chips.join("  "))
}

pub fn render_counter(text: &str) -> String {
    let label = char_count_label(text);
    if is_over_limit(text) {
        format!("{label} (too long)")
    } else {
        label
    }
}

pub const HELP: &str = "\
Type text and press Enter to get emoji suggestions.
Start a line with :: to send text that looks like a command.
  :voice        start or stop voice input
  :stop         stop voice input
  :examples     list example texts
  :example N    submit example N
  :copy N       copy emoji N
  :copy-all     copy every emoji
  :share        share the emojis
  :help         show this help
  :quit         exit";
