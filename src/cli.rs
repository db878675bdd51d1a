// CLI module - command-line argument parsing and handlers
//
// Provides the session token flag plus a `config` subcommand for managing
// the config file: print it, reset it, open it in $EDITOR, or merge new
// defaults into an existing file.

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Maître d' - admin console for the reservation platform
#[derive(Parser)]
#[command(name = "maitred")]
#[command(version = VERSION)]
#[command(about = "Admin console for the restaurant reservation platform", long_about = None)]
pub struct Cli {
    /// Admin JWT obtained from the browser login page.
    /// Persisted for later runs; omit to reuse the cached one.
    #[arg(long, value_name = "JWT")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Rewrite the config file with defaults
        #[arg(long)]
        reset: bool,

        /// Open the config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Merge new defaults into the existing file, keeping your values
        #[arg(long)]
        update: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns the parsed arguments when the console
/// should start, or None when a subcommand was handled (exit after).
pub fn handle_cli() -> Option<Cli> {
    let cli = Cli::parse();

    let Some(Commands::Config {
        show,
        reset,
        edit,
        update,
        path,
    }) = cli.command
    else {
        return Some(cli);
    };

    if let Err(e) = run_config_command(show, reset, edit, update, path) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    None
}

fn run_config_command(show: bool, reset: bool, edit: bool, update: bool, path: bool) -> Result<()> {
    if path {
        println!("{}", config_path()?.display());
    } else if show {
        print_effective_config();
    } else if reset {
        reset_config()?;
    } else if edit {
        edit_config()?;
    } else if update {
        update_config()?;
    } else {
        println!("Usage: maitred config [--show|--reset|--edit|--update|--path]");
        println!();
        println!("  --show    Print the effective configuration");
        println!("  --reset   Rewrite the config file with defaults");
        println!("  --edit    Open the config file in $EDITOR");
        println!("  --update  Merge new defaults into the existing file");
        println!("  --path    Print the config file path");
    }
    Ok(())
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("could not determine the config directory")
}

fn print_effective_config() {
    let config = Config::from_env();

    println!("# Effective configuration, env over file over defaults");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("login_url = {:?}", config.login_url);
    println!("page_size = {}", config.page_size);
    println!("theme = {:?}", config.theme);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    println!();
    match Config::config_path() {
        Some(path) if path.exists() => println!("# Source: {}", path.display()),
        _ => println!("# Source: defaults (no config file)"),
    }
}

fn reset_config() -> Result<()> {
    let path = config_path()?;

    if path.exists() && !confirm_overwrite(&path)? {
        println!("Aborted.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("could not create the config directory")?;
    }

    // Config::default().to_toml() is the single source of truth for the
    // file format
    std::fs::write(&path, Config::default().to_toml()).context("could not write the config file")?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    eprint!(
        "Config file exists at {}. Overwrite? [y/N] ",
        path.display()
    );
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("could not read the confirmation")?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

fn edit_config() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = preferred_editor();
    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "could not launch '{}'; set $EDITOR to your preferred editor",
            editor
        )
    })?;
    if !status.success() {
        anyhow::bail!("editor exited with status {}", status);
    }
    Ok(())
}

fn preferred_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| if cfg!(windows) { "notepad" } else { "nano" }.to_string())
}

fn update_config() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return Ok(());
    }

    // Re-serialize the effective config so new keys appear with their
    // defaults while user values survive
    let merged = Config::from_env().to_toml();

    let backup = path.with_extension("toml.bak");
    match std::fs::copy(&path, &backup) {
        Ok(_) => println!("Backup created: {}", backup.display()),
        Err(e) => eprintln!("Warning: could not create a backup: {}", e),
    }

    std::fs::write(&path, merged).context("could not write the config file")?;

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
    Ok(())
}
