use std::io::Write;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use qd_engine::{GameError, ParticipantId, Phase, Session, SessionEvent, Verdict};

use super::GameArgs;

/// How a command names a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// 1-based roster position, as shown by `list`.
    Position(usize),
    /// Case-insensitive name.
    Name(String),
}

/// A line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Remove(Target),
    Rename(Target, String),
    List,
    Scores,
    Draw,
    Judge(bool),
    Status,
    History,
    Help,
    Quit,
}

pub async fn run(args: &GameArgs) -> Result<(), String> {
    let config = args.to_config()?;
    let seed = config.seed;
    let mut session =
        Session::new(config).map_err(|e| format!("failed to start session: {e}"))?;
    info!(seed, "session started");

    println!("  {} Quizdraw", "Starting".bold());
    println!(
        "  Questions: {} | Seed: {seed}",
        session.questions().remaining().len()
    );
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break; // EOF
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let command = match parse_command(input) {
            Ok(command) => command,
            Err(usage) => {
                println!("{}\n", usage.yellow());
                continue;
            }
        };
        if command == Command::Quit {
            println!("Goodbye!");
            break;
        }

        match execute(&mut session, command).await {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => println!("{}\n", e.yellow()),
        }
    }

    info!(rounds = session.history().len(), "session ended");
    Ok(())
}

async fn execute(session: &mut Session, command: Command) -> Result<String, String> {
    match command {
        Command::Add(name) => {
            let id = session.add_participant(&name).map_err(|e| e.to_string())?;
            Ok(format!("Added: {}", participant_name(session, id)))
        }
        Command::Remove(target) => {
            let id = resolve(session, &target)?;
            let removed = session.remove_participant(id).map_err(|e| e.to_string())?;
            Ok(format!("Removed: {}", removed.name))
        }
        Command::Rename(target, new_name) => {
            let id = resolve(session, &target)?;
            let old = participant_name(session, id);
            session
                .rename_participant(id, &new_name)
                .map_err(|e| e.to_string())?;
            Ok(format!("Renamed: {old} -> {}", participant_name(session, id)))
        }
        Command::List => Ok(render_roster(session)),
        Command::Scores => Ok(render_scores(session)),
        Command::Draw => draw(session).await,
        Command::Judge(correct) => judge(session, correct),
        Command::Status => Ok(render_status(session)),
        Command::History => Ok(render_history(session)),
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

async fn draw(session: &mut Session) -> Result<String, String> {
    match session.start_selection() {
        Ok(_) => {}
        Err(GameError::ExhaustedPool) => {
            return Err(
                "All questions have been asked. Restart with --recycle to reuse them.".into(),
            );
        }
        Err(e) => return Err(e.to_string()),
    }

    let mut stdout = std::io::stdout();
    while let Some(event) = session.next_event().await {
        match event {
            SessionEvent::Highlighted { participant, .. } => {
                let name = participant_name(session, participant);
                print!("\r  {} {:<30}", "»".cyan(), name);
                stdout.flush().map_err(|e| e.to_string())?;
            }
            SessionEvent::Selected {
                participant,
                question,
            } => {
                println!("\r{:<34}", "");
                return Ok(format!(
                    "  Picked: {}\n  Question: {}\n  Answer judged with 'right' or 'wrong'.",
                    participant_name(session, participant).green().bold(),
                    question.bold()
                ));
            }
        }
    }
    Err("draw ended without a pick".into())
}

fn judge(session: &mut Session, correct: bool) -> Result<String, String> {
    match session.mark_result(correct) {
        Ok(Verdict::Correct(p)) => Ok(format!("Correct! {} now has {} pts", p.name, p.score)),
        Ok(Verdict::Incorrect(p)) => Ok(format!("Wrong. {} stays at {} pts", p.name, p.score)),
        Ok(Verdict::Forfeited(_)) => Ok("The pick left the game; no points awarded.".into()),
        Err(GameError::NotAwaitingJudgment) => {
            Err("Nobody is waiting for a verdict. Type 'draw' first.".into())
        }
        Err(e) => Err(e.to_string()),
    }
}

fn resolve(session: &Session, target: &Target) -> Result<ParticipantId, String> {
    match target {
        Target::Position(position) => position
            .checked_sub(1)
            .and_then(|i| session.roster().list().get(i))
            .map(|p| p.id)
            .ok_or_else(|| format!("No participant #{position}. Type 'list' to see positions.")),
        Target::Name(name) => match session.roster().find_by_name(name).as_slice() {
            [] => Err(format!("No participant named '{name}'.")),
            [only] => Ok(only.id),
            several => Err(format!(
                "{} participants are named '{name}'. Use the position from 'list'.",
                several.len()
            )),
        },
    }
}

fn participant_name(session: &Session, id: ParticipantId) -> String {
    session
        .roster()
        .get(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("(removed {id})"))
}

fn render_roster(session: &Session) -> String {
    let roster = session.roster();
    if roster.is_empty() {
        return "No participants yet. Use 'add <name>'.".to_string();
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Score", "ID"]);
    for (i, p) in roster.list().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            p.name.clone(),
            p.score.to_string(),
            p.id.to_string(),
        ]);
    }
    format!("{table}\n  {} participants", roster.len())
}

fn render_scores(session: &Session) -> String {
    let standings = session.standings();
    if standings.is_empty() {
        return "No participants yet. Use 'add <name>'.".to_string();
    }
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rank", "Name", "Score"]);
    for (i, p) in standings.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), p.name.clone(), p.score.to_string()]);
    }
    table.to_string()
}

fn render_status(session: &Session) -> String {
    let mut out = format!("Phase: {}\n", session.phase());
    out.push_str(&format!("Participants: {}\n", session.roster().len()));
    out.push_str(&format!(
        "Questions left: {}/{}\n",
        session.questions().remaining().len(),
        session.questions().catalog_len()
    ));
    out.push_str(&format!("Rounds played: {}", session.history().len()));
    if session.phase() == Phase::AwaitingJudgment {
        if let Some(id) = session.selected() {
            out.push_str(&format!("\nWaiting on: {}", participant_name(session, id)));
        }
        if let Some(question) = session.current_question() {
            out.push_str(&format!("\nQuestion: {question}"));
        }
    }
    out
}

fn render_history(session: &Session) -> String {
    if session.history().is_empty() {
        return "No rounds played yet.".to_string();
    }
    session.history().export_text().trim_end().to_string()
}

/// Parse a REPL line: `<command> [args]`.
fn parse_command(input: &str) -> Result<Command, String> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "add" if !rest.is_empty() => Ok(Command::Add(rest.to_string())),
        "add" => Err("usage: add <name>".into()),
        "remove" | "rm" => parse_target(rest)
            .map(Command::Remove)
            .ok_or_else(|| "usage: remove <n|name>".to_string()),
        "rename" => {
            let args: Vec<&str> = rest.splitn(2, ' ').collect();
            match (parse_target(args[0]), args.get(1).map(|s| s.trim())) {
                (Some(target), Some(name)) if !name.is_empty() => {
                    Ok(Command::Rename(target, name.to_string()))
                }
                _ => Err("usage: rename <n|name> <new name>".into()),
            }
        }
        "list" | "ls" => Ok(Command::List),
        "scores" | "standings" => Ok(Command::Scores),
        "draw" | "spin" => Ok(Command::Draw),
        "right" | "yes" | "correct" => Ok(Command::Judge(true)),
        "wrong" | "no" | "incorrect" => Ok(Command::Judge(false)),
        "status" => Ok(Command::Status),
        "history" => Ok(Command::History),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (type 'help')")),
    }
}

/// A number is a roster position; anything else is a name.
fn parse_target(s: &str) -> Option<Target> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match s.parse::<usize>() {
        Ok(0) => None,
        Ok(n) => Some(Target::Position(n)),
        Err(_) => Some(Target::Name(s.to_string())),
    }
}

const HELP: &str = "\
Quizdraw Commands:
  add <name>                Add a participant
  remove <n|name>           Remove participant #n or by name
  rename <n|name> <new>     Rename participant #n or by name
  list                      Show the roster with positions
  scores                    Show standings
  draw                      Draw a participant and reveal a question
  right | wrong             Record the verdict for the pick
  status                    Show session status
  history                   Show judged rounds
  help                      Show this help
  quit                      Exit";
