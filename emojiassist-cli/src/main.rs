mod render;
mod repl;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use emojiassist_appcore::{AppService, AssistSession};
use emojiassist_engine::session::SubmitOutcome;
use emojiassist_engine::voice::{VoiceOutcome, VoiceState};
use emojiassist_platform::test::{StdoutNotifier, StdoutShareTarget};
use tokio::io::AsyncBufReadExt;

use render::{HELP, render_counter, render_examples, render_view};
use repl::{ReplCommand, parse_command};

const CONFIG_ENV: &str = "EMOJIASSIST_CONFIG";

#[derive(Parser)]
#[command(name = "emojiassist")]
#[command(about = "Turn text into emoji suggestions")]
struct Cli {
    /// Config file (defaults to $EMOJIASSIST_CONFIG or the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Suggest emojis for one text and exit
    Suggest { text: String },

    /// Store an API key in the OS keyring
    SetKey {
        #[arg(value_enum)]
        which: KeyKind,
        value: String,
    },

    /// Remove stored API keys
    ClearKeys,

    /// Print the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyKind {
    Llm,
    Elevenlabs,
}

fn default_config_path() -> PathBuf {
    if let Some(p) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(p);
    }
    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_CONFIG_HOME"))
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    match base {
        Some(dir) => dir.join("emojiassist").join("config.json"),
        None => PathBuf::from("emojiassist-config.json"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    log::debug!("config path: {}", config_path.display());

    let svc = AppService::new(
        config_path,
        emojiassist_platform::platform_clipboard(),
        Arc::new(StdoutShareTarget),
        Arc::new(StdoutNotifier),
    );

    match cli.command {
        Some(Command::SetKey { which, value }) => {
            match which {
                KeyKind::Llm => svc.set_llm_api_key(&value)?,
                KeyKind::Elevenlabs => svc.set_elevenlabs_api_key(&value)?,
            }
            println!("Key saved.");
            Ok(())
        }
        Some(Command::ClearKeys) => {
            svc.clear_api_keys()?;
            println!("Keys removed.");
            Ok(())
        }
        Some(Command::Config) => {
            let cfg = svc.load_config()?;
            let json = serde_json::to_string_pretty(&cfg).context("encode config JSON")?;
            println!("{json}");
            Ok(())
        }
        Some(Command::Suggest { text }) => {
            let session = svc.start_session()?;
            let outcome = session.submit(text).await;
            println!("{}", render_view(&session.view().await));
            match outcome {
                SubmitOutcome::Invalid(e) => Err(anyhow::anyhow!(e)),
                SubmitOutcome::Failed(_) => Err(anyhow::anyhow!("suggestion request failed")),
                _ => Ok(()),
            }
        }
        None => interactive(svc.start_session()?).await,
    }
}

async fn interactive(session: AssistSession) -> anyhow::Result<()> {
    let session = Arc::new(session);
    println!("{}\n\n{}", HELP, render_examples());

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("read stdin")? {
        match parse_command(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Examples => println!("{}", render_examples()),
            ReplCommand::Submit(text) => {
                println!("{}", render_counter(&text));
                let outcome = session.submit(text).await;
                report(&session, outcome).await;
            }
            ReplCommand::Example(i) => match session.use_example(i).await {
                Some(outcome) => report(&session, outcome).await,
                None => println!("No example {}.", i + 1),
            },
            ReplCommand::Voice => start_voice(session.clone()),
            ReplCommand::Stop => {
                if !session.voice().stop().await {
                    println!("Voice input is not active.");
                }
            }
            ReplCommand::Copy(i) => {
                if !session.copy(i).await {
                    log::debug!("nothing copied for tile {}", i + 1);
                }
            }
            ReplCommand::CopyAll => {
                session.copy_all().await;
            }
            ReplCommand::Share => {
                session.share().await;
            }
            ReplCommand::Unknown(raw) => println!("Could not read {raw:?} (try :help)"),
        }
    }
    Ok(())
}

async fn report(session: &AssistSession, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Ignored => println!("Still working on the previous text..."),
        SubmitOutcome::Invalid(e) => println!("{e}"),
        _ => println!("{}", render_view(&session.view().await)),
    }
    if session.show_examples().await {
        println!("{}", render_examples());
    }
}

/// Voice capture runs until `:stop` or the listen cap, so it must not block the prompt.
fn start_voice(session: Arc<AssistSession>) {
    tokio::spawn(async move {
        if session.voice().state().await == VoiceState::Idle {
            println!("Listening... (:voice or :stop to finish)");
        }
        match session.toggle_voice().await {
            Ok(VoiceOutcome::Submitted(outcome)) => {
                let text = session.snapshot().await.text;
                println!("Heard: {text}");
                report(&session, outcome).await;
            }
            Ok(VoiceOutcome::Stopped | VoiceOutcome::NotHeard | VoiceOutcome::Cancelled) => {}
            Err(e) => log::debug!("voice input ended: {e}"),
        }
    });
}
