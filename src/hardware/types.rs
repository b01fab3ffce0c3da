use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Operating system family the inventory runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Platform {
    Windows,
    Linux,
    Darwin,
    Other(String),
}

impl Platform {
    pub fn detect() -> Self {
        Platform::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os.to_lowercase().as_str() {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::Darwin,
            "freebsd" => Platform::Other("FreeBSD".to_string()),
            "netbsd" => Platform::Other("NetBSD".to_string()),
            "openbsd" => Platform::Other("OpenBSD".to_string()),
            "dragonfly" => Platform::Other("DragonFly".to_string()),
            "solaris" | "illumos" => Platform::Other("SunOS".to_string()),
            "ios" => Platform::Other("iOS".to_string()),
            _ => Platform::Other(capitalize(os)),
        }
    }

    /// Management queries are only issued on Windows hosts.
    pub fn supports_management_queries(&self) -> bool {
        matches!(self, Platform::Windows)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Darwin => write!(f, "Darwin"),
            Platform::Other(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InventoryCategory {
    Cpu,
    Ram,
    Gpu,
    Nic,
    Motherboard,
    Disk,
    Os,
    Hostname,
}

impl InventoryCategory {
    /// Header line printed above the category body.
    pub fn header(&self) -> &'static str {
        match self {
            InventoryCategory::Cpu => "CPU:",
            InventoryCategory::Ram => "RAM:",
            InventoryCategory::Gpu => "GPU:",
            InventoryCategory::Nic => "NIC:",
            InventoryCategory::Motherboard => "Motherboard:",
            InventoryCategory::Disk => "Disks:",
            InventoryCategory::Os => "OS:",
            InventoryCategory::Hostname => "Host:",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InventoryCategory::Cpu => "cpu",
            InventoryCategory::Ram => "ram",
            InventoryCategory::Gpu => "gpu",
            InventoryCategory::Nic => "nic",
            InventoryCategory::Motherboard => "motherboard",
            InventoryCategory::Disk => "disk",
            InventoryCategory::Os => "os",
            InventoryCategory::Hostname => "hostname",
        }
    }
}

/// Binary units used for display, starting at KB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeUnit {
    KB,
    MB,
    GB,
    TB,
    PB,
    EB,
    ZB,
    YB,
}

impl SizeUnit {
    pub const ALL: [SizeUnit; 8] = [
        SizeUnit::KB,
        SizeUnit::MB,
        SizeUnit::GB,
        SizeUnit::TB,
        SizeUnit::PB,
        SizeUnit::EB,
        SizeUnit::ZB,
        SizeUnit::YB,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            SizeUnit::KB => "KB",
            SizeUnit::MB => "MB",
            SizeUnit::GB => "GB",
            SizeUnit::TB => "TB",
            SizeUnit::PB => "PB",
            SizeUnit::EB => "EB",
            SizeUnit::ZB => "ZB",
            SizeUnit::YB => "YB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplaySize {
    pub value: f64,
    pub unit: SizeUnit,
}

impl fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit.symbol())
    }
}

/// A distinct normalized label and how many times it was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedItem {
    pub label: String,
    pub count: usize,
}

/// Unit the RAM summary is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RamUnit {
    MB,
    #[default]
    GB,
}

impl FromStr for RamUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MB" => Ok(RamUnit::MB),
            "GB" => Ok(RamUnit::GB),
            other => Err(format!("unknown RAM unit '{}', expected MB or GB", other)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InventoryReport {
    pub node: Option<String>,
    pub platform: String,
    pub collected_at: String,
    pub cpu: String,
    pub disk: String,
    pub gpu: String,
    pub hostname: String,
    pub motherboard: String,
    pub nic: String,
    pub os: String,
    pub ram: String,
}

impl InventoryReport {
    /// Category summaries in display order.
    pub fn sections(&self) -> [&str; 8] {
        [
            self.cpu.as_str(),
            self.disk.as_str(),
            self.gpu.as_str(),
            self.hostname.as_str(),
            self.motherboard.as_str(),
            self.nic.as_str(),
            self.os.as_str(),
            self.ram.as_str(),
        ]
    }
}
