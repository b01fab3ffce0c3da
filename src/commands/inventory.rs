use log::debug;
use serde::Serialize;
use sysinfo::System;

use crate::cli::Commands;
use crate::hardware::types::InventoryCategory;
use crate::hardware::{collect_full_inventory, HostInventory, RamUnit};
use crate::output::{output_data, print_sections};

#[derive(Debug, Serialize)]
struct CategorySummary<'a> {
    category: &'static str,
    node: Option<&'a str>,
    summary: String,
}

/// Target node: the one given on the command line, else the local host name.
pub fn resolve_node(node: Option<&str>) -> Option<String> {
    node.map(str::to_string)
        .or_else(System::host_name)
        .or_else(|| std::env::var("COMPUTERNAME").ok())
}

pub fn handle_inventory_command(
    command: Option<&Commands>,
    node: Option<&str>,
    debug: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let node = resolve_node(node);
    debug!("target node: {:?}", node);
    let host = HostInventory::detect(node, debug);

    let (category, summary) = match command {
        None => return print_inventory(&host, RamUnit::default(), format),
        Some(Commands::Inventory { ram_unit }) => return print_inventory(&host, *ram_unit, format),
        Some(Commands::Cpu { bare }) => (InventoryCategory::Cpu, host.get_cpu(*bare)?),
        Some(Commands::Ram { unit }) => (InventoryCategory::Ram, host.get_ram(*unit)?),
        Some(Commands::Gpu { bare }) => (InventoryCategory::Gpu, host.get_gpu(*bare)?),
        Some(Commands::Nic) => (InventoryCategory::Nic, host.get_nic()?),
        Some(Commands::Motherboard) => (InventoryCategory::Motherboard, host.get_motherboard()?),
        Some(Commands::Disk) => (InventoryCategory::Disk, host.get_disk()?),
        Some(Commands::Os) => (InventoryCategory::Os, host.get_os()?),
        Some(Commands::Hostname) => (InventoryCategory::Hostname, host.get_hostname()?),
        Some(Commands::Settings(_)) => return Err("settings are not an inventory category".into()),
    };

    if format == "text" {
        print_sections([summary.as_str()]);
        return Ok(());
    }
    output_data(
        &CategorySummary {
            category: category.name(),
            node: host.node(),
            summary,
        },
        format,
    )
}

fn print_inventory(host: &HostInventory, ram_unit: RamUnit, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report = collect_full_inventory(host, ram_unit)?;
    if format == "text" {
        print_sections(report.sections());
        return Ok(());
    }
    output_data(&report, format)
}
