//! Shopfront CLI - theme inspection and storefront configuration checks.
//!
//! # Usage
//!
//! ```bash
//! # List every built-in theme
//! sf-cli themes list
//!
//! # List the themes of one category
//! sf-cli themes list --category bold
//!
//! # Print the CSS custom properties of a theme
//! sf-cli themes css modern-minimal
//!
//! # Scope the CSS to a selector instead of :root
//! sf-cli themes css modern-minimal --selector .theme-preview
//!
//! # Validate a storefront payload or module list
//! sf-cli modules check storefront.json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopfront_core::ThemeCategory;

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the built-in theme registry
    Themes {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Inspect storefront module configuration
    Modules {
        #[command(subcommand)]
        action: ModuleAction,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// List built-in themes
    List {
        /// Only list themes of this category (minimal, modern, classic, bold, elegant, playful)
        #[arg(short, long)]
        category: Option<ThemeCategory>,
    },
    /// Print the generated CSS of a theme
    Css {
        /// Theme id
        id: String,

        /// Selector to scope the variables to
        #[arg(short, long, default_value = ":root")]
        selector: String,
    },
}

#[derive(Subcommand)]
enum ModuleAction {
    /// Check a storefront JSON payload or module list
    Check {
        /// Path to the JSON file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli).and_then(|output| {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        Ok(stdout.flush()?)
    });

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<String, commands::CliError> {
    match cli.command {
        Commands::Themes { action } => match action {
            ThemeAction::List { category } => Ok(commands::themes::list(category)),
            ThemeAction::Css { id, selector } => commands::themes::css(&id, &selector),
        },
        Commands::Modules { action } => match action {
            ModuleAction::Check { file } => commands::modules::check_file(&file),
        },
    }
}
