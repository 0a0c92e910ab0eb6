//! Terminal front end.
//!
//! Reads key presses from stdin, one or more per line, feeds them to the
//! expression store and prints the display after every change. The runtime
//! executes the effects returned by the handler: redraws, history writes and
//! the microphone indicator.
//!
//! # Input
//!
//! - Key symbols separated by spaces, or packed: `12+3*4=`
//! - ASCII aliases: `*` `x` for `×`, `/` for `÷`, `c`/`ac` for clear,
//!   `bs`/`del` for backspace, `mic` for the microphone key
//! - `say <words>`: a voice transcript, e.g. `say seven plus two equals`
//! - `history`: list stored calculations
//! - `recall <n>`: put the result of history entry `n` on the display
//! - `delete <n>`: remove history entry `n`
//! - `clear-history`: remove all history entries
//! - `quit`

use clap::Parser;
use rpncalc::observability::init_tracing;
use rpncalc::storage::{JsonStorage, Storage};
use rpncalc::ui::{self, UIViewModel};
use rpncalc::{handle_event, initialize, AppState, Button, Config, Effect, Event};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "rpncalc", about = "Button-driven calculator with RPN evaluation", version)]
struct Cli {
    /// Configuration file. Default: <config dir>/rpncalc/config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// History file, overriding the configuration.
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Neither load nor save history.
    #[arg(long)]
    no_history: bool,

    /// Keys to press before reading stdin, e.g. "2+3*4=".
    #[arg(short, long, value_name = "KEYS")]
    keys: Option<String>,
}

/// Runtime wrapper around the library state.
struct Runtime {
    app: AppState,
    config: Config,
    storage: Option<JsonStorage>,
}

/// One parsed line of input.
#[derive(Debug, PartialEq)]
enum Command {
    Events(Vec<Event>),
    History,
    Quit,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rpncalc: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> rpncalc::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(history) = cli.history {
        config.history_file = Some(history);
    }
    if cli.no_history {
        config.history_enabled = false;
    }

    init_tracing(&config);
    let _span = tracing::info_span!("rpncalc_session").entered();

    let mut runtime = Runtime::new(config)?;
    runtime.redraw()?;

    if let Some(keys) = cli.keys.as_deref() {
        if runtime.execute_line(keys)? {
            return Ok(());
        }
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if runtime.execute_line(&line?)? {
            break;
        }
    }

    tracing::info!("session finished");
    Ok(())
}

impl Runtime {
    fn new(config: Config) -> rpncalc::Result<Self> {
        let mut app = initialize(&config);

        let storage = if config.history_enabled {
            let storage = JsonStorage::with_limit(config.history_path(), config.history_limit)?;
            let records = storage.load_calculations()?;
            handle_event(&mut app, &Event::HistoryLoaded(records))?;
            Some(storage)
        } else {
            None
        };

        Ok(Self {
            app,
            config,
            storage,
        })
    }

    /// Runs one input line. Returns `true` when the user asked to quit.
    fn execute_line(&mut self, line: &str) -> rpncalc::Result<bool> {
        match parse_line(line) {
            Command::Quit => return Ok(true),
            Command::History => {
                ui::render_history(&self.app.history, &mut io::stdout().lock())?;
            }
            Command::Events(events) => {
                for event in events {
                    match handle_event(&mut self.app, &event) {
                        Ok((_changed, effects)) => self.execute(effects)?,
                        Err(e) => {
                            tracing::warn!(error = %e, "event rejected");
                            eprintln!("rpncalc: {e}");
                        }
                    }
                }
            }
        }
        Ok(false)
    }

    fn execute(&mut self, effects: Vec<Effect>) -> rpncalc::Result<()> {
        for effect in effects {
            match effect {
                Effect::ExpressionChanged(snapshot) => {
                    let vm = UIViewModel::from_snapshot(&snapshot, &self.config.display, self.app.recording);
                    ui::render(&vm)?;
                }
                Effect::SaveCalculation(record) => {
                    let Some(storage) = self.storage.as_mut() else {
                        continue;
                    };
                    if let Err(e) = storage.save_calculation(&record) {
                        tracing::error!(error = %e, "failed to save calculation");
                        eprintln!("rpncalc: {e}");
                    }
                }
                Effect::DeleteCalculation(index) => {
                    let Some(storage) = self.storage.as_mut() else {
                        continue;
                    };
                    if let Err(e) = storage.delete_calculation(index) {
                        tracing::error!(error = %e, index, "failed to delete calculation");
                        eprintln!("rpncalc: {e}");
                    }
                }
                Effect::ClearHistory => {
                    let Some(storage) = self.storage.as_mut() else {
                        continue;
                    };
                    if let Err(e) = storage.clear() {
                        tracing::error!(error = %e, "failed to clear history");
                        eprintln!("rpncalc: {e}");
                    }
                }
                Effect::ToggleRecording { recording } => {
                    tracing::info!(recording, "microphone toggled");
                    self.redraw()?;
                }
            }
        }
        Ok(())
    }

    fn redraw(&self) -> rpncalc::Result<()> {
        let vm = UIViewModel::from_snapshot(&self.app.snapshot(), &self.config.display, self.app.recording);
        ui::render(&vm)?;
        Ok(())
    }
}

fn parse_line(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match head {
        "quit" | "exit" | "q" => Command::Quit,
        "history" => Command::History,
        "clear-history" => Command::Events(vec![Event::ClearHistory]),
        "say" => Command::Events(vec![Event::Voice(rest.trim().to_string())]),
        "recall" => indexed(rest, "recall", Event::RecallResult),
        "delete" => indexed(rest, "delete", Event::DeleteCalculation),
        _ => Command::Events(
            line.split_whitespace()
                .flat_map(parse_keys)
                .map(Event::Button)
                .collect(),
        ),
    }
}

/// Builds a history event from its index argument.
fn indexed(arg: &str, command: &str, event: fn(usize) -> Event) -> Command {
    match arg.trim().parse() {
        Ok(index) => Command::Events(vec![event(index)]),
        Err(_) => {
            eprintln!("rpncalc: {command} needs a history index");
            Command::Events(vec![])
        }
    }
}

/// Maps a word to buttons: a whole-word alias, or one button per character.
fn parse_keys(word: &str) -> Vec<Button> {
    if let Some(button) = alias(word) {
        return vec![button];
    }

    let mut buttons = Vec::new();
    for c in word.chars() {
        let mut buf = [0; 4];
        match alias(c.encode_utf8(&mut buf)) {
            Some(button) => buttons.push(button),
            None => {
                tracing::debug!(key = %c, "unknown key");
                eprintln!("rpncalc: unknown key {c:?}");
            }
        }
    }
    buttons
}

fn alias(word: &str) -> Option<Button> {
    match word.to_ascii_lowercase().as_str() {
        "*" | "x" => Some(Button::Multiply),
        "/" => Some(Button::Divide),
        "c" | "ac" => Some(Button::Clear),
        "bs" | "del" => Some(Button::Backspace),
        "mic" => Some(Button::Mic),
        _ => Button::from_symbol(word),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_keys() {
        let Command::Events(events) = parse_line("12+3*4=") else {
            panic!("expected events");
        };
        assert_eq!(events.len(), 7);
        assert_eq!(events[3], Event::Button(Button::Digit(3)));
        assert_eq!(events[4], Event::Button(Button::Multiply));
    }

    #[test]
    fn word_aliases() {
        assert_eq!(
            parse_line("ac ( bs"),
            Command::Events(vec![
                Event::Button(Button::Clear),
                Event::Button(Button::OpenParen),
                Event::Button(Button::Backspace),
            ])
        );
    }

    #[test]
    fn commands() {
        assert_eq!(parse_line("quit"), Command::Quit);
        assert_eq!(parse_line(" history "), Command::History);
        assert_eq!(
            parse_line("say два плюс"),
            Command::Events(vec![Event::Voice("два плюс".to_string())])
        );
        assert_eq!(parse_line("recall 2"), Command::Events(vec![Event::RecallResult(2)]));
        assert_eq!(parse_line("delete 0"), Command::Events(vec![Event::DeleteCalculation(0)]));
        assert_eq!(parse_line("clear-history"), Command::Events(vec![Event::ClearHistory]));
        assert_eq!(parse_line("delete last"), Command::Events(vec![]));
    }

    #[test]
    fn delete_reaches_history_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            history_file: Some(dir.path().join("history.json")),
            history_limit: 2,
            ..Config::default()
        };
        let mut runtime = Runtime::new(config.clone()).unwrap();
        for line in ["1+1=", "2+2=", "3+3=", "delete 0"] {
            runtime.execute_line(line).unwrap();
        }

        let stored = JsonStorage::new(config.history_path()).unwrap().load_calculations().unwrap();
        assert_eq!(stored, runtime.app.history);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].expression, "3+3");

        runtime.execute_line("clear-history").unwrap();
        drop(runtime);
        let stored = JsonStorage::new(config.history_path()).unwrap().load_calculations().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn cli_flags() {
        let cli = Cli::parse_from(["rpncalc", "--no-history", "-k", "1+1="]);
        assert!(cli.no_history);
        assert_eq!(cli.keys.as_deref(), Some("1+1="));
    }
}
