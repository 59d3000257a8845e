use std::io::{self, BufReader};

use clap::Parser;
use colored::Colorize;

use pomotui::cli::{generate_completions, Cli};
use pomotui::config::{Config, Paths};
use pomotui::error::PomoError;
use pomotui::timer::Clock;
use pomotui::{headless, logging, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomoError> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print!("{}", generate_completions(shell)?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let settings = config.resolve(&cli)?;

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Paths::new()?.config_file,
        };
        Config::from_settings(&settings).save_to_path(&path)?;
        println!("{} {}", "Wrote".green(), path.display());
        return Ok(());
    }

    logging::init(settings.log_file.as_deref())?;
    tracing::info!(
        alert = ?settings.alert,
        headless = cli.headless,
        "starting pomotui"
    );

    if cli.headless {
        let mut out = io::stdout();
        headless::run(
            settings.durations,
            Clock::default(),
            settings.alert.alerter(),
            BufReader::new(io::stdin()),
            &mut out,
            cli.output,
        )
    } else {
        tui::run(&settings)
    }
}
