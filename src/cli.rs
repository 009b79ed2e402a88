//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crewdeck - AI crew orchestration console
#[derive(Parser)]
#[command(name = "crewdeck", about = "AI crew orchestration console", version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the agent roster
    Roster,

    /// Generate a starting task batch for the crew
    Tasks,

    /// Suggest operator commands for the current state
    Hints,

    /// Run a free-text command through the orchestrator
    Command {
        /// The command text
        text: String,
    },

    /// Suggest new skills for an agent
    Skills {
        /// Agent name from the roster
        agent: String,
    },

    /// Chat with an agent (streams the reply)
    Chat {
        /// Agent name from the roster
        agent: String,

        /// Message to send
        message: String,
    },
}
