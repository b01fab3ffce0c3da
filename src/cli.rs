use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::hardware::RamUnit;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "host-inventory")]
#[command(about = "Summarize a host's hardware and software inventory")]
pub struct Cli {
    /// Host to query (defaults to the local machine)
    pub node: Option<String>,

    /// Echo every management query and its raw result
    #[arg(long, global = true, default_value_t = false, action = ArgAction::Set, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub debug: bool,

    /// Output format (text, json, or yaml)
    #[arg(short, long, global = true, default_value = "text")]
    pub format: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every category summary (the default)
    Inventory {
        /// Unit for the RAM summary (GB or MB)
        #[arg(long, default_value = "GB")]
        ram_unit: RamUnit,
    },
    /// Processor name and count
    Cpu {
        /// Single unadorned line without vendor tokens
        #[arg(long)]
        bare: bool,
    },
    /// Installed memory
    Ram {
        /// Unit for the summary (GB or MB)
        #[arg(short, long, default_value = "GB")]
        unit: RamUnit,
    },
    /// Video controllers
    Gpu {
        /// First controller only, without vendor tokens
        #[arg(long)]
        bare: bool,
    },
    /// Physical network adapters
    Nic,
    /// Baseboard manufacturer and product
    Motherboard,
    /// Disk drives with their sizes
    Disk,
    /// Operating system caption
    Os,
    /// Host and domain name
    Hostname,
    /// Persisted application settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Load settings and print them with secrets masked
    Show {
        /// Pointer file recording where the settings live
        #[arg(short, long)]
        pointer: Option<PathBuf>,
    },
    /// Prompt for new settings and save them
    New {
        /// Where to write the settings file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pointer file recording where the settings live
        #[arg(short, long)]
        pointer: Option<PathBuf>,
    },
}
