mod cli;
mod commands;
mod error;
mod hardware;
mod output;
mod settings;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{handle_inventory_command, handle_settings_command};
use output::print_error;

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = match &cli.command {
        Some(Commands::Settings(cmd)) => handle_settings_command(cmd),
        command => handle_inventory_command(command.as_ref(), cli.node.as_deref(), cli.debug, &cli.format),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
