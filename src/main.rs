use clap::Parser;

use codescribe::cli::{commands, Cli};
use codescribe::config::Settings;
use codescribe::logging;

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = settings.unwrap_or_else(|e| {
        eprintln!("failed to load configuration: {e}");
        std::process::exit(1);
    });

    logging::init_with_config(&settings.logging);

    commands::dispatch(cli, settings);
}
