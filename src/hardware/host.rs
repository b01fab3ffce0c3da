use log::{debug, info};

use crate::error::InventoryError;
use crate::hardware::format;
use crate::hardware::normalize::{normalize_block, normalize_joined};
use crate::hardware::transport::{select_transport, QueryRequest, QueryTransport};
use crate::hardware::types::{Platform, RamUnit};

/// Inventory of one host, queried through a management transport.
///
/// Every accessor re-queries the host; nothing is cached between calls.
/// On platforms without management instrumentation each accessor returns
/// an informational message instead of querying.
pub struct HostInventory<T: QueryTransport = Box<dyn QueryTransport>> {
    platform: Platform,
    node: Option<String>,
    transport: T,
}

impl HostInventory {
    /// Inventory for the current platform with the matching transport.
    pub fn detect(node: Option<String>, debug: bool) -> Self {
        let platform = Platform::detect();
        let transport = select_transport(&platform, debug);
        info!("inventory for {} on {}", node.as_deref().unwrap_or("local host"), platform);
        HostInventory::new(platform, node, transport)
    }
}

impl<T: QueryTransport> HostInventory<T> {
    pub fn new(platform: Platform, node: Option<String>, transport: T) -> Self {
        HostInventory {
            platform,
            node,
            transport,
        }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    fn unavailable(&self) -> Option<String> {
        if self.platform.supports_management_queries() {
            None
        } else {
            Some(format::unavailable(&self.platform))
        }
    }

    fn query(&self, component: &str, property: &str, exclude_extra: bool) -> Result<String, InventoryError> {
        debug!("querying {} {} on {:?}", component, property, self.node);
        self.transport.query(&QueryRequest {
            component,
            property,
            exclude_extra,
            node: self.node.as_deref(),
        })
    }

    fn query_lines(&self, component: &str, property: &str, exclude_extra: bool) -> Result<Vec<String>, InventoryError> {
        let raw = self.query(component, property, exclude_extra)?;
        Ok(normalize_block(&raw, Some(property)))
    }

    pub fn get_cpu(&self, bare: bool) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        // The "CPU " token is removed before whitespace runs are collapsed so
        // that padding after it cannot fuse it onto the next word.
        let raw = self.query("cpu", "name", false)?.replace("CPU ", "");
        format::cpu(&normalize_block(&raw, Some("name")), bare)
    }

    /// Total memory, snapped to the nearest GB boundary.
    pub fn get_ram(&self, unit: RamUnit) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let lines = self.query_lines("OS", "TotalVirtualMemorySize", false)?;
        let raw = lines
            .first()
            .ok_or_else(|| InventoryError::normalization("ram", "no memory size reported"))?;
        let kb: u64 = raw
            .parse()
            .map_err(|_| InventoryError::normalization("ram", format!("'{}' is not a size in KB", raw)))?;
        format::ram(kb, unit)
    }

    pub fn get_gpu(&self, bare: bool) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let lines = self.query_lines("PATH Win32_VideoController", "name", false)?;
        Ok(format::gpu(&lines, bare))
    }

    pub fn get_nic(&self) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let lines = self.query_lines("NIC", "Name", true)?;
        Ok(format::nic(&lines))
    }

    pub fn get_motherboard(&self) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let manufacturer = self.query("BaseBoard", "Manufacturer", false)?;
        let products = self.query_lines("BaseBoard", "Product", false)?;
        format::motherboard(manufacturer.replace('\r', "").trim(), &products)
    }

    pub fn get_disk(&self) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let models = self.query_lines("DiskDrive", "Model", true)?;
        let sizes = self.query_lines("DiskDrive", "Size", false)?;
        format::disk(&models, &sizes)
    }

    pub fn get_os(&self) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let lines = self.query_lines("os", "caption", false)?;
        format::os(&lines)
    }

    pub fn get_hostname(&self) -> Result<String, InventoryError> {
        if let Some(message) = self.unavailable() {
            return Ok(message);
        }
        let host = normalize_joined(&self.query("computersystem", "caption", false)?);
        let domain = normalize_joined(&self.query("computersystem", "domain", false)?);
        Ok(format::hostname(&host, &domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::transport::testing::ScriptedTransport;
    use crate::hardware::transport::UnavailableTransport;

    fn windows(transport: ScriptedTransport) -> HostInventory<ScriptedTransport> {
        HostInventory::new(Platform::Windows, Some("WS-01".to_string()), transport)
    }

    #[test]
    fn non_windows_accessors_return_message() {
        let host = HostInventory::new(Platform::Linux, None, UnavailableTransport::new(Platform::Linux));
        let outputs = [
            host.get_cpu(false).unwrap(),
            host.get_cpu(true).unwrap(),
            host.get_ram(RamUnit::GB).unwrap(),
            host.get_gpu(false).unwrap(),
            host.get_nic().unwrap(),
            host.get_motherboard().unwrap(),
            host.get_disk().unwrap(),
            host.get_os().unwrap(),
            host.get_hostname().unwrap(),
        ];
        for output in outputs {
            assert_eq!(output, "Windows Management Instrumentation is not available on Linux");
        }
    }

    #[test]
    fn cpu_query_is_normalized() {
        let transport = ScriptedTransport::new().respond(
            "cpu",
            "name",
            "Name                                      \r\r\nIntel(R) Core(TM) i7-9700K CPU @ 3.60GHz  \r\r\n\r\r\n",
        );
        let host = windows(transport);
        assert_eq!(host.get_cpu(false).unwrap(), "CPU:\n   Intel(R) Core(TM) i7-9700K @ 3.60GHz");
        assert_eq!(host.get_cpu(true).unwrap(), "Core i7-9700K @ 3.60GHz");
    }

    #[test]
    fn padded_cpu_token_is_stripped_in_bare_mode() {
        let transport = ScriptedTransport::new().respond("cpu", "name", "CPU    Intel(R) Core(TM) i7-9700K\r\n");
        let bare = windows(transport).get_cpu(true).unwrap();
        for token in ["CPU", "(TM)", "(R)", "Intel ", "  "] {
            assert!(!bare.contains(token), "{:?} still contains {:?}", bare, token);
        }
        assert_eq!(bare, "Core i7-9700K");
    }

    #[test]
    fn ram_is_snapped() {
        let transport = ScriptedTransport::new().respond(
            "OS",
            "TotalVirtualMemorySize",
            "TotalVirtualMemorySize  \r\r\n8388100                 \r\r\n",
        );
        let host = windows(transport);
        assert_eq!(host.get_ram(RamUnit::GB).unwrap(), "RAM:\n   8.0 GB");
        assert_eq!(host.get_ram(RamUnit::MB).unwrap(), "RAM:\n   8192 MB");
    }

    #[test]
    fn garbage_ram_is_a_normalization_error() {
        let transport = ScriptedTransport::new().respond("OS", "TotalVirtualMemorySize", "n/a\r\n");
        let err = windows(transport).get_ram(RamUnit::GB).unwrap_err();
        assert!(matches!(err, InventoryError::Normalization { category: "ram", .. }));
    }

    #[test]
    fn gpu_and_nic_are_aggregated() {
        let transport = ScriptedTransport::new()
            .respond(
                "PATH Win32_VideoController",
                "name",
                "Name\r\nNVIDIA GeForce RTX 3090  \r\nNVIDIA GeForce RTX 3090  \r\n",
            )
            .respond(
                "NIC",
                "Name",
                "Name\r\nWAN Miniport (IP)\r\nIntel(R) Ethernet Connection I219-V  \r\nTAP-Windows Adapter V9\r\n",
            );
        let host = windows(transport);
        assert_eq!(host.get_gpu(false).unwrap(), "GPU:\n2x NVIDIA GeForce RTX 3090");
        assert_eq!(host.get_gpu(true).unwrap(), "2x GeForce RTX 3090");
        assert_eq!(host.get_nic().unwrap(), "NIC:\n   Intel(R) Ethernet Connection I219-V");

        let calls = host.transport().calls.borrow();
        let nic_call = calls.iter().find(|call| call.0 == "NIC").unwrap();
        assert!(nic_call.2, "NIC query must request the adapter denylist");
        assert_eq!(nic_call.3.as_deref(), Some("WS-01"));
    }

    #[test]
    fn disk_pairs_models_with_sizes_in_order() {
        let transport = ScriptedTransport::new()
            .respond("DiskDrive", "Model", "Model\r\nST1000DM003-1ER162  \r\nST1000DM003-1ER162  \r\n")
            .respond("DiskDrive", "Size", "Size\r\n1048576  \r\n1048576  \r\n");
        let host = windows(transport);
        assert_eq!(host.get_disk().unwrap(), "Disks:\n2x ST1000DM003-1ER162     1.00 MB");

        let calls = host.transport().calls.borrow();
        let order: Vec<&str> = calls.iter().map(|call| call.1.as_str()).collect();
        assert_eq!(order, vec!["Model", "Size"]);
    }

    #[test]
    fn motherboard_and_os() {
        let transport = ScriptedTransport::new()
            .respond("BaseBoard", "Manufacturer", "Manufacturer\r\nASUSTeK COMPUTER INC.  \r\n")
            .respond("BaseBoard", "Product", "Product\r\nPRIME Z390-A  \r\n")
            .respond("os", "caption", "Caption\r\nMicrosoft Windows 10 Pro  \r\n");
        let host = windows(transport);
        assert_eq!(
            host.get_motherboard().unwrap(),
            "Motherboard:\n   ASUSTeK COMPUTER INC.:\tPRIME Z390-A"
        );
        assert_eq!(host.get_os().unwrap(), "OS:\n   Microsoft Windows 10 Pro");
    }

    #[test]
    fn hostname_joins_caption_and_domain() {
        let transport = ScriptedTransport::new()
            .respond("computersystem", "caption", "Caption\r\nWS-01  \r\n\r\n")
            .respond("computersystem", "domain", "Domain\r\ncorp.example.com  \r\n\r\n");
        assert_eq!(windows(transport).get_hostname().unwrap(), "Host:\n   WS-01.corp.example.com");
    }

    #[test]
    fn transport_failure_propagates() {
        let transport = ScriptedTransport::new().fail("os", "caption", "wmic exited with 1");
        let err = windows(transport).get_os().unwrap_err();
        assert!(matches!(err, InventoryError::TransportFailure { .. }));
    }

    #[test]
    fn every_call_requeries() {
        let transport = ScriptedTransport::new().respond("os", "caption", "Microsoft Windows 11 Pro\r\n");
        let host = windows(transport);
        host.get_os().unwrap();
        host.get_os().unwrap();
        assert_eq!(host.transport().calls.borrow().len(), 2);
    }
}
