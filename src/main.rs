//! Crewdeck - AI crew orchestration console
//!
//! CLI entry point for driving orchestration operations from a terminal.

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use eyre::{Result, bail};
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crewdeck::cli::{Cli, Command};
use crewdeck::config::Config;
use crewdeck::domain::{Agent, NotesByDate, default_roster};
use crewdeck::llm::StreamChunk;
use crewdeck::orchestrator::{Orchestrator, Route};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // Priority: --log-level > RUST_LOG > default (warn)
    let filter = match cli_log_level {
        Some(level) => EnvFilter::try_new(level.to_lowercase())?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn find_agent<'a>(roster: &'a [Agent], name: &str) -> Result<&'a Agent> {
    match roster.iter().find(|a| a.name.eq_ignore_ascii_case(name)) {
        Some(agent) => Ok(agent),
        None => {
            let names: Vec<&str> = roster.iter().map(|a| a.name.as_str()).collect();
            bail!("Unknown agent '{}'. Roster: {}", name, names.join(", "))
        }
    }
}

fn route_label(route: Route) -> &'static str {
    match route {
        Route::Primary => "primary",
        Route::Secondary => "secondary",
        Route::Fallback => "fallback",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let config = Config::load(cli.config.as_ref())?;
    let roster = default_roster();

    if let Command::Roster = cli.command {
        for agent in &roster {
            println!("{} - {}", agent.name.bold(), agent.role);
            println!("  skills: {}", agent.skills.join(", ").dimmed());
        }
        return Ok(());
    }

    let orchestrator = Orchestrator::from_config(&config)?;
    debug!("main: orchestrator ready");

    match cli.command {
        Command::Roster => unreachable!("handled above"),

        Command::Tasks => {
            let outcome = orchestrator.generate_initial_tasks(&roster).await;
            if outcome.route == Route::Fallback {
                eprintln!("{}", "All providers failed; no tasks generated.".red());
            }
            for task in &outcome.value {
                println!("{} [{}] {}", task.id.dimmed(), task.agent_name.bold(), task.content);
            }
        }

        Command::Hints => {
            let outcome = orchestrator.generate_hints(&roster, &[], &[], &NotesByDate::new()).await;
            debug!(route = route_label(outcome.route), "main: hints generated");
            for hint in &outcome.value {
                println!("{} {}", ">".cyan(), hint);
            }
        }

        Command::Command { text } => {
            let outcome = orchestrator
                .orchestrate_command(&text, &roster, &[], &[], &NotesByDate::new())
                .await;
            if outcome.route == Route::Fallback {
                println!("{}", outcome.value.response_text.red());
            } else {
                println!("{}", outcome.value.response_text);
            }
            if let Some(draft) = &outcome.value.new_task {
                println!("{} [{}] {}", "new task:".green(), draft.agent_name.bold(), draft.content);
            }
        }

        Command::Skills { agent } => {
            let agent = find_agent(&roster, &agent)?;
            let outcome = orchestrator.suggest_skills(agent, &[]).await;
            if outcome.value.is_empty() {
                println!("No skill suggestions for {}.", agent.name);
            }
            for skill in &outcome.value {
                println!("{} {}", "+".green(), skill);
            }
        }

        Command::Chat { agent, message } => {
            let agent = find_agent(&roster, &agent)?;
            println!("{}", format!("[{}]", agent.name).bold());

            let (tx, mut rx) = mpsc::channel(32);
            let printer = tokio::spawn(async move {
                while let Some(chunk) = rx.recv().await {
                    match chunk {
                        StreamChunk::TextDelta(text) => {
                            print!("{text}");
                            let _ = std::io::stdout().flush();
                        }
                        StreamChunk::Done => break,
                        StreamChunk::Error(err) => {
                            eprintln!("\n{}", err.red());
                            break;
                        }
                    }
                }
            });

            let result = orchestrator.start_conversation(agent, &[], &message, &[], tx).await;
            let _ = printer.await;
            println!();
            result?;
        }
    }

    Ok(())
}
