use regex::Regex;
use std::sync::OnceLock;

fn reasoning_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<thinking>.*?</thinking>|<think>.*?</think>|<reasoning>.*?</reasoning>")
            .expect("valid reasoning regex")
    })
}

fn code_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Models asked for JSON still like to wrap it in ```json fences.
        Regex::new(r"(?s)^```[A-Za-z0-9_-]*\s*(.*?)\s*```$").expect("valid code fence regex")
    })
}

/// Strips reasoning blocks and a surrounding markdown fence from raw model output.
pub fn clean_model_output(text: &str) -> String {
    let out = reasoning_block_re().replace_all(text, "");
    let out = out.trim();

    match code_fence_re().captures(out) {
        Some(caps) => caps
            .get(1)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        None => out.to_string(),
    }
}

/// Trims each suggestion and drops blanks. Order is preserved and nothing else is
/// second-guessed: whatever grapheme the model picked is kept.
pub fn normalize_emoji_list(emojis: Vec<String>) -> Vec<String> {
    emojis
        .into_iter()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Space-separated form used for copy-all and sharing.
pub fn join_emojis(emojis: &[String]) -> String {
    emojis.join(" ")
}
