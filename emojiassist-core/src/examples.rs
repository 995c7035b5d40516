/// One-click sample inputs, offered while the text field is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleText {
    pub label: &'static str,
    pub text: &'static str,
}

pub const EXAMPLE_TEXTS: &[ExampleText] = &[
    ExampleText {
        label: "EN",
        text: "Cat",
    },
    ExampleText {
        label: "中文",
        text: "貓咪",
    },
    ExampleText {
        label: "日本語",
        text: "猫",
    },
    ExampleText {
        label: "한국어",
        text: "고양이",
    },
    ExampleText {
        label: "Bahasa Indonesia",
        text: "Kucing",
    },
    ExampleText {
        label: "Español",
        text: "Gato",
    },
    ExampleText {
        label: "Italiano",
        text: "Gatto",
    },
    ExampleText {
        label: "Français",
        text: "Chat",
    },
    ExampleText {
        label: "Português",
        text: "Gato",
    },
    ExampleText {
        label: "Монгол",
        text: "Муур",
    },
    ExampleText {
        label: "Русский",
        text: "Кошка",
    },
];

pub fn example_text(index: usize) -> Option<&'static ExampleText> {
    EXAMPLE_TEXTS.get(index)
}

/// Examples are only offered for an empty field when nothing is in flight.
pub fn examples_visible(current_text: &str, is_loading: bool) -> bool {
    current_text.is_empty() && !is_loading
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_text;

    #[test]
    fn every_example_is_valid_input() {
        for ex in EXAMPLE_TEXTS {
            assert!(validate_text(ex.text).is_ok(), "{}", ex.label);
        }
    }

    #[test]
    fn visibility_follows_text_and_loading() {
        assert!(examples_visible("", false));
        assert!(!examples_visible("", true));
        assert!(!examples_visible("c", false));
    }

    #[test]
    fn lookup_is_bounds_checked() {
        assert_eq!(example_text(0).map(|e| e.text), Some("Cat"));
        assert!(example_text(EXAMPLE_TEXTS.len()).is_none());
    }
}
