//! cyber-quiz: interactive certification quiz trainer.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use cyberquiz_core::config::{load_config_from, resolve_data_dir};
use cyberquiz_core::store::JsonStore;

mod commands;
mod console;
mod session;

use console::Console;
use session::Controller;

#[derive(Parser)]
#[command(
    name = "cyber-quiz",
    version,
    about = "Interactive multiple-choice quiz trainer for certification study"
)]
struct Cli {
    /// Directory holding users.json, questions.json and admin.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not clear the terminal between screens
    #[arg(long)]
    no_clear: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cyberquiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config_from(cli.config.as_deref())?;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &config);
    let store = JsonStore::open(&data_dir)?;
    tracing::debug!(data_dir = %store.dir().display(), "opened store");

    println!("Data stored in: {}", store.dir().display());

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), config.clear_screen && !cli.no_clear);
    Controller::new(console, &store).run()
}
