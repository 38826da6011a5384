use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tg_cli::commands::{add, app, diagnose, resume, setup, show, start, status, stop};
use tg_cli::error::is_expected;
use tg_cli::opener::open_with_os_default;
use tg_cli::store::RemoteStore;
use tg_cli::{Cli, Commands, Config, Now};

/// Load config and connect to the server it names.
fn connect(config_path: &Path) -> Result<RemoteStore> {
    let config = Config::load_from(config_path)?;
    tracing::debug!(?config, "loaded configuration");
    RemoteStore::connect(&config).context("failed to connect to the TimeTagger server")
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let now = Now::current();
    let mut out = io::stdout().lock();

    match &cli.command {
        Some(Commands::Setup) => setup::run(&mut out, &config_path, open_with_os_default)?,
        Some(Commands::App) => {
            let config = Config::load_from(&config_path)?;
            app::run(&mut out, &config, open_with_os_default)?;
        }
        Some(Commands::Status) => status::run(&mut out, &connect(&config_path)?, now)?,
        Some(Commands::Show { days, start, end }) => {
            show::run(&mut out, &connect(&config_path)?, *start, *end, *days, now)?;
        }
        Some(Commands::Start { description }) => {
            start::run(&mut out, &connect(&config_path)?, description, now)?;
        }
        Some(Commands::Add {
            date,
            start,
            end,
            description,
        }) => {
            add::run(&mut out, &connect(&config_path)?, *date, start, end, description, now)?;
        }
        Some(Commands::Stop) => stop::run(&mut out, &connect(&config_path)?, now)?,
        Some(Commands::Resume { index }) => {
            let store = connect(&config_path)?;
            resume::run(&mut out, &mut io::stdin().lock(), &store, *index, now)?;
        }
        Some(Commands::Diagnose { fix }) => {
            diagnose::run(&mut out, &connect(&config_path)?, *fix, now)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if is_expected(&err) => {
            eprintln!("Error: {err:#}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err),
    }
}
