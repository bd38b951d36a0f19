//! Interactive chat session.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use portal_core::{PortalError, Session};

use crate::cli::ChatArgs;
use crate::render;

/// Readline helper providing completion and hints for slash commands.
#[derive(Clone)]
struct ChatHelper {
    commands: Vec<String>,
}

impl ChatHelper {
    fn new() -> Self {
        Self {
            commands: ["/bind", "/clear", "/save", "/help"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Helper for ChatHelper {}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Highlighter for ChatHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Validator for ChatHelper {}

pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    let mut session = Session::new().with_api_name(&args.api);

    println!("Connecting to space {}...", args.space.cyan());
    if let Err(e) = session.bind(&args.space).await {
        eprintln!("{} {e}", "connection failed:".red().bold());
        eprintln!(
            "{}",
            "Check the URL or space id, and that the space is running and public.".yellow()
        );
        return Err(e.into());
    }
    println!("{}", format!("Connected to {}", args.space).green());

    println!();
    println!("{}", "Interactive chat".blue().bold());
    println!(
        "{}",
        "Type a message and press Enter. 'exit' or Ctrl-D ends the session; /help lists commands."
            .bright_black()
    );

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ChatHelper::new()));

    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                if input == "exit" || input == "quit" {
                    break;
                }
                if let Some(command) = input.strip_prefix('/') {
                    handle_command(&mut session, command).await;
                    continue;
                }
                submit_turn(&mut session, input).await;
            }
            // Ctrl-C abandons the current input line, not the session
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("{}", "Bye.".yellow());
    Ok(())
}

async fn submit_turn(session: &mut Session, message: &str) {
    match session.submit(message).await {
        Ok(response) => render::print_styled("Space", &response),
        Err(e @ PortalError::Transport(_)) => {
            eprintln!("{} {e}", "call failed:".red().bold());
            eprintln!(
                "{}",
                "Check your connection or the space status, then try again.".yellow()
            );
        }
        Err(e) => eprintln!("{} {e}", "call failed:".red().bold()),
    }
}

async fn handle_command(session: &mut Session, command: &str) {
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let argument = rest.trim();

    match name {
        "bind" => {
            if argument.is_empty() {
                eprintln!("{}", "usage: /bind <url-or-space-id>".yellow());
                return;
            }
            println!("Connecting to space {}...", argument.cyan());
            match session.bind(argument).await {
                Ok(()) => println!("{}", format!("Now talking to {argument}").green()),
                Err(e) => {
                    eprintln!("{} {e}", "bind failed:".red().bold());
                    if let Some(previous) = session.target() {
                        eprintln!(
                            "{}",
                            format!("Still connected to {previous}; transcript kept.").yellow()
                        );
                    }
                }
            }
        }
        "clear" => {
            session.clear();
            println!("{}", "Transcript cleared.".green());
        }
        "save" => {
            if argument.is_empty() {
                eprintln!("{}", "usage: /save <path>".yellow());
                return;
            }
            match render::save_transcript(Path::new(argument), session.exchanges()) {
                Ok(()) => println!(
                    "{}",
                    format!(
                        "Transcript saved to {argument} ({} exchanges)",
                        session.exchange_count()
                    )
                    .green()
                ),
                Err(e) => eprintln!("{} {e}", "save failed:".red().bold()),
            }
        }
        "help" => print_help(),
        other => eprintln!(
            "{}",
            format!("Unknown command: /{other} (try /help)").bright_black()
        ),
    }
}

fn print_help() {
    println!("{}", "Commands:".blue().bold());
    println!("  /bind <target>   switch to another space (clears the transcript)");
    println!("  /clear           forget the conversation so far");
    println!("  /save <path>     write the transcript as JSON");
    println!("  /help            this list");
    println!("  exit, quit       leave the chat");
}
