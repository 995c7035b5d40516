/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Submit(String),
    Voice,
    Stop,
    Examples,
    /// 0-based index.
    Example(usize),
    /// 0-based index.
    Copy(usize),
    CopyAll,
    Share,
    Help,
    Quit,
    Unknown(String),
}

fn one_based(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Lines starting with `:` are commands only when the name is known; anything else
/// (`:)`, `:D party`) is text. A leading `::` sends the rest with one `:` dropped.
pub fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if let Some(escaped) = trimmed.strip_prefix("::") {
        return ReplCommand::Submit(format!(":{escaped}"));
    }
    let Some(cmd) = trimmed.strip_prefix(':') else {
        // Plain text goes to the model exactly as typed.
        return ReplCommand::Submit(trimmed.to_string());
    };

    let (name, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
    let bad_arg = || ReplCommand::Unknown(trimmed.into());
    match name {
        "voice" => ReplCommand::Voice,
        "stop" => ReplCommand::Stop,
        "examples" => ReplCommand::Examples,
        "example" => one_based(arg).map_or_else(bad_arg, ReplCommand::Example),
        "copy" => one_based(arg).map_or_else(bad_arg, ReplCommand::Copy),
        "copy-all" => ReplCommand::CopyAll,
        "share" => ReplCommand::Share,
        "help" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Submit(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_submitted_verbatim() {
        assert_eq!(
            parse_command("  Happy birthday!  \n"),
            ReplCommand::Submit("  Happy birthday!  ".into())
        );
        assert_eq!(parse_command(""), ReplCommand::Submit(String::new()));
    }

    #[test]
    fn indices_are_one_based() {
        assert_eq!(parse_command(":copy 1"), ReplCommand::Copy(0));
        assert_eq!(parse_command(":example 11"), ReplCommand::Example(10));
        assert!(matches!(parse_command(":copy 0"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_command(":copy x"), ReplCommand::Unknown(_)));
    }

    #[test]
    fn named_commands() {
        assert_eq!(parse_command(":voice"), ReplCommand::Voice);
        assert_eq!(parse_command(":copy-all"), ReplCommand::CopyAll);
        assert_eq!(parse_command(":share"), ReplCommand::Share);
        assert_eq!(parse_command(":q"), ReplCommand::Quit);
    }

    #[test]
    fn emoticons_are_text_not_commands() {
        assert_eq!(parse_command(":)"), ReplCommand::Submit(":)".into()));
        assert_eq!(
            parse_command(":D party time"),
            ReplCommand::Submit(":D party time".into())
        );
        assert_eq!(parse_command(":dance"), ReplCommand::Submit(":dance".into()));
    }

    #[test]
    fn double_colon_escapes_a_command_name() {
        assert_eq!(parse_command("::share"), ReplCommand::Submit(":share".into()));
        assert_eq!(parse_command(":share"), ReplCommand::Share);
    }
}
