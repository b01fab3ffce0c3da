use chrono::Utc;

use crate::error::InventoryError;
use crate::hardware::host::HostInventory;
use crate::hardware::transport::QueryTransport;
use crate::hardware::types::{InventoryReport, RamUnit};

/// Query every category in display order and bundle the summaries.
pub fn collect_full_inventory<T: QueryTransport>(
    host: &HostInventory<T>,
    ram_unit: RamUnit,
) -> Result<InventoryReport, InventoryError> {
    let cpu = host.get_cpu(false)?;
    let disk = host.get_disk()?;
    let gpu = host.get_gpu(false)?;
    let hostname = host.get_hostname()?;
    let motherboard = host.get_motherboard()?;
    let nic = host.get_nic()?;
    let os = host.get_os()?;
    let ram = host.get_ram(ram_unit)?;

    Ok(InventoryReport {
        node: host.node().map(str::to_string),
        platform: host.platform().to_string(),
        collected_at: Utc::now().to_rfc3339(),
        cpu,
        disk,
        gpu,
        hostname,
        motherboard,
        nic,
        os,
        ram,
    })
}
