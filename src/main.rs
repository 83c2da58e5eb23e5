use clap::{Parser, Subcommand};
use ctxpack::commands::*;
use ctxpack::core::{clipboard::SystemClipboard, colors::Style, error::Result, print_error};
use std::io::IsTerminal;

#[derive(Parser)]
#[command(name = "ctxpack")]
#[command(about = "Bundle a project for an assistant and apply the files it sends back")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize a project tree into one text bundle
    Bundle(BundleArgs),
    /// Apply file blocks from returned text to a project
    Apply(ApplyArgs),
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still takes precedence when set
    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let style = detect_style(cli.no_color);
    let clipboard = SystemClipboard::new();

    let result: Result<()> = match cli.command {
        Commands::Bundle(args) => execute_bundle(args, style, &clipboard),
        Commands::Apply(args) => execute_apply(args, style, &clipboard),
    };

    if let Err(e) = result {
        log::debug!("Command failed: {e:?}");
        print_error(style, &e.to_string());
        std::process::exit(1);
    }
}

/// Color only an interactive stderr, and never when NO_COLOR or --no-color is set
fn detect_style(no_color_flag: bool) -> Style {
    let enabled = !no_color_flag
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stderr().is_terminal();
    if enabled {
        // colored otherwise looks at stdout, which may be the bundle pipe
        colored::control::set_override(true);
    }
    Style::new(enabled)
}
