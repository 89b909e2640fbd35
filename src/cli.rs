//! Command-line interface for par-navigator.
//!
//! The binary inspects and maintains the files the navigator persists:
//! saved state, configuration and shared toggle settings.

use crate::options::{OptionKind, OptionSlot};
use crate::state::NavigatorState;
use crate::state::storage::{clear_state_at, load_state_from, state_path};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use par_navigator_config::{NavigatorConfig, SharedSettings};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// par-navigator - pane registry and selection sync for structural navigators
#[derive(Parser)]
#[command(name = "par-navigator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<log::LevelFilter>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or clear the saved navigator state
    State {
        #[command(subcommand)]
        action: StateAction,
    },
    /// Inspect the navigator configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List toggle values from the shared settings store
    Options {
        /// Shared settings file (default: ~/.config/par-navigator/shared_settings.yaml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the saved view, layout and pane fragments
    Show {
        /// State file (default: ~/.config/par-navigator/navigator_state.yaml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Delete the saved state
    Clear {
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as YAML
    Show {
        /// Config file (default: ~/.config/par-navigator/config.yaml)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

/// Runtime options passed from CLI parsing to command execution
#[derive(Default)]
pub struct RuntimeOptions {
    pub log_level: Option<log::LevelFilter>,
    pub command: Option<Commands>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Run the parsed command
    Continue(RuntimeOptions),
    /// Exit with the given code
    Exit(i32),
}

/// Parse CLI arguments
pub fn process_cli() -> CliResult {
    match Cli::try_parse() {
        Ok(cli) => CliResult::Continue(RuntimeOptions {
            log_level: cli.log_level,
            command: cli.command,
        }),
        Err(e) => {
            let code = if e.use_stderr() { 2 } else { 0 };
            let _ = e.print();
            CliResult::Exit(code)
        }
    }
}

/// Execute a parsed command. With no command, show the saved state.
pub fn run_command(command: Option<Commands>) -> Result<()> {
    match command.unwrap_or(Commands::State {
        action: StateAction::Show { path: None },
    }) {
        Commands::State {
            action: StateAction::Show { path },
        } => show_state(path.unwrap_or_else(state_path)),
        Commands::State {
            action: StateAction::Clear { path, yes },
        } => clear_state(path.unwrap_or_else(state_path), yes),
        Commands::Config {
            action: ConfigAction::Show { path },
        } => show_config(path),
        Commands::Options { path } => show_options(path.unwrap_or_else(SharedSettings::settings_path)),
    }
}

fn show_state(path: PathBuf) -> Result<()> {
    let Some(state) = load_state_from(&path)? else {
        println!("No saved navigator state at {}", path.display());
        return Ok(());
    };
    print!("{}", describe_state(&state));
    Ok(())
}

/// Human-readable summary of a saved state.
pub fn describe_state(state: &NavigatorState) -> String {
    let mut out = String::new();
    if let Some(saved_at) = &state.saved_at {
        out.push_str(&format!("Saved at:     {}\n", saved_at));
    }
    let element = state.navigator.clone().unwrap_or_default();
    match (&element.current_view, &element.current_sub_view) {
        (Some(view), Some(sub)) => out.push_str(&format!("Current view: {} / {}\n", view, sub)),
        (Some(view), None) => out.push_str(&format!("Current view: {}\n", view)),
        (None, _) => out.push_str("Current view: (none)\n"),
    }
    if !element.proportions.is_empty() {
        out.push_str(&format!("Proportions:  {:?}\n", element.proportions));
    }
    out.push_str(&format!("Pane states:  {}\n", state.panes.len()));
    for entry in &state.panes {
        out.push_str(&format!("  - {}\n", entry.id));
    }
    out
}

fn clear_state(path: PathBuf, skip_prompt: bool) -> Result<()> {
    if !path.exists() {
        println!("Nothing to clear at {}", path.display());
        return Ok(());
    }
    if !skip_prompt {
        print!("Delete saved navigator state at {}? [y/N] ", path.display());
        io::stdout().flush()?;
        let mut response = String::new();
        io::stdin().read_line(&mut response)?;
        let response = response.trim().to_lowercase();
        if response != "y" && response != "yes" {
            println!("Cancelled.");
            return Ok(());
        }
    }
    clear_state_at(&path)?;
    println!("Cleared {}", path.display());
    Ok(())
}

fn show_config(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(NavigatorConfig::config_path);
    let config = effective_config(&path)?;
    let yaml = serde_yaml_ng::to_string(&config).context("Failed to serialize config")?;
    print!("{}", yaml);
    Ok(())
}

/// Configuration in effect for `path`. A missing file means defaults; it is
/// never created here.
fn effective_config(path: &Path) -> Result<NavigatorConfig> {
    if !path.exists() {
        log::info!("No config at {:?}, showing defaults", path);
        return Ok(NavigatorConfig::default());
    }
    NavigatorConfig::load_from(path)
}

fn show_options(path: PathBuf) -> Result<()> {
    let settings = SharedSettings::load_from(&path)?;
    for kind in OptionKind::ALL {
        let spec = kind.spec();
        let value = match spec.slot {
            OptionSlot::View { get, .. } => get(&settings.view),
            OptionSlot::PreviewTab => settings.open_in_preview_tab,
        };
        println!(
            "{:<40} {}",
            spec.display_name(&settings.view),
            if value { "on" } else { "off" }
        );
    }
    Ok(())
}
