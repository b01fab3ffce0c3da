use log::info;
use std::io;
use std::path::PathBuf;

use crate::cli::SettingsCommands;
use crate::output::print_warning;
use crate::settings::{default_pointer_path, default_settings_path, open_or_create, SettingsSource};

pub fn handle_settings_command(cmd: &SettingsCommands) -> Result<(), Box<dyn std::error::Error>> {
    let mut input = io::stdin().lock();
    let mut stdout = io::stdout();

    let (pointer, destination, new) = match cmd {
        SettingsCommands::Show { pointer } => (pointer.clone(), default_settings_path(), false),
        SettingsCommands::New { output, pointer } => {
            (pointer.clone(), output.clone().or_else(default_settings_path), true)
        }
    };
    let pointer: PathBuf = match pointer {
        Some(path) => path,
        None => default_pointer_path()?,
    };

    let (settings, source) = open_or_create(&pointer, destination.as_deref(), new, &mut input, &mut stdout)?;
    match &source {
        SettingsSource::Loaded(path) => info!("settings loaded from {}", path.display()),
        SettingsSource::Saved(path) => println!("Settings saved to {}", path.display()),
        SettingsSource::Unsaved => {
            print_warning("no settings destination available, newly entered settings are not saved")
        }
    }

    if settings.client_id().is_none() || settings.permissions().is_none() || settings.token().is_none() {
        print_warning("settings are missing one of client_id, permissions or token");
    }

    println!("Loading Server Settings...");
    println!("{}", settings.masked());
    Ok(())
}
