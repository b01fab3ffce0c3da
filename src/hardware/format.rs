use crate::error::InventoryError;
use crate::hardware::aggregate::aggregate;
use crate::hardware::normalize::normalize_line;
use crate::hardware::types::{AggregatedItem, InventoryCategory, Platform, RamUnit};
use crate::hardware::units::format_bytes;

const INDENT: &str = "   ";

/// Tokens removed from CPU names in bare mode.
const CPU_BARE_TOKENS: [&str; 4] = ["(TM)", "(R)", "Intel ", "AMD "];

/// Tokens removed from GPU names in bare mode.
const GPU_BARE_TOKENS: [&str; 4] = ["NVIDIA ", "AMD ", "INTEL ", "Intel(R)"];

/// RAM boundary-snap search range, in GB.
const RAM_MAX_GB: u64 = 4096;

pub fn unavailable(platform: &Platform) -> String {
    InventoryError::UnsupportedPlatform(platform.to_string()).to_string()
}

fn strip_tokens(value: &str, tokens: &[&str]) -> String {
    let stripped = tokens
        .iter()
        .fold(value.to_string(), |acc, token| acc.replace(token, ""));
    normalize_line(&stripped)
}

fn entry_line(item: &AggregatedItem) -> String {
    if item.count == 1 {
        format!("{}{}", INDENT, item.label)
    } else {
        format!("{}x {}", item.count, item.label)
    }
}

/// Render a header followed by one line per distinct entry.
pub fn device_list(category: InventoryCategory, items: &[AggregatedItem]) -> String {
    let mut out = String::from(category.header());
    for item in items {
        out.push('\n');
        out.push_str(&entry_line(item));
    }
    out
}

/// Render CPU lines.
///
/// More than one reported line is shown as `2x <first line>` regardless of
/// how many sockets or which models were reported.
pub fn cpu(lines: &[String], bare: bool) -> Result<String, InventoryError> {
    let first = lines
        .first()
        .ok_or_else(|| InventoryError::normalization("cpu", "no processor reported"))?;
    let name = first.replace("CPU ", "");
    let value = if lines.len() > 1 {
        format!("2x {}", name)
    } else {
        format!("{}{}", INDENT, name)
    };

    if bare {
        return Ok(strip_tokens(&value, &CPU_BARE_TOKENS));
    }
    Ok(format!("{}\n{}", InventoryCategory::Cpu.header(), value))
}

pub fn gpu(lines: &[String], bare: bool) -> String {
    let items = aggregate(lines);
    if bare {
        return items
            .first()
            .map(|item| strip_tokens(&entry_line(item), &GPU_BARE_TOKENS))
            .unwrap_or_default();
    }
    device_list(InventoryCategory::Gpu, &items)
}

pub fn nic(lines: &[String]) -> String {
    device_list(InventoryCategory::Nic, &aggregate(lines))
}

/// Snap a reported memory size in MB to the nearest whole GB boundary.
///
/// Returns the boundary in MB, or `None` when nothing within the range fits.
pub fn snap_ram_mb(mb: u64) -> Option<u64> {
    (1..=RAM_MAX_GB)
        .map(|g| g * 1024)
        .find(|&boundary| mb > boundary - 512 && mb < boundary + 511)
}

/// Render total memory from a raw size in KB.
pub fn ram(raw_kb: u64, unit: RamUnit) -> Result<String, InventoryError> {
    let boundary = snap_ram_mb(raw_kb / 1024).ok_or_else(|| {
        InventoryError::normalization(
            "ram",
            format!("{} KB does not fall near any GB boundary up to {} GB", raw_kb, RAM_MAX_GB),
        )
    })?;

    let value = match unit {
        RamUnit::MB => format!("{} MB", boundary),
        RamUnit::GB => format!("{:.1} GB", boundary as f64 / 1024.0),
    };
    Ok(format!("{}\n{}{}", InventoryCategory::Ram.header(), INDENT, value))
}

/// Render disks from parallel model and size (bytes) lines.
pub fn disk(models: &[String], sizes: &[String]) -> Result<String, InventoryError> {
    let width = models.iter().map(|m| m.chars().count()).max().unwrap_or(0) + 4;

    let mut rows = Vec::with_capacity(models.len());
    for (index, model) in models.iter().enumerate() {
        let raw_size = sizes.get(index).ok_or_else(|| {
            InventoryError::normalization("disk", format!("no size reported for '{}'", model))
        })?;
        let bytes: f64 = raw_size.parse().map_err(|_| {
            InventoryError::normalization("disk", format!("size '{}' is not a number", raw_size))
        })?;
        rows.push(format!("{:<width$} {}", model, format_bytes(bytes)?, width = width));
    }

    Ok(device_list(InventoryCategory::Disk, &aggregate(&rows)))
}

/// Render the motherboard from its manufacturer and the last product line.
pub fn motherboard(manufacturer: &str, products: &[String]) -> Result<String, InventoryError> {
    let product = products
        .last()
        .ok_or_else(|| InventoryError::normalization("motherboard", "no product reported"))?;
    Ok(format!(
        "{}\n{}{}:\t{}",
        InventoryCategory::Motherboard.header(),
        INDENT,
        manufacturer,
        product
    ))
}

pub fn os(lines: &[String]) -> Result<String, InventoryError> {
    let first = lines
        .first()
        .ok_or_else(|| InventoryError::normalization("os", "no operating system reported"))?;
    let value = if lines.len() > 1 {
        format!("2x {}", first)
    } else {
        first.clone()
    };
    Ok(format!("{}\n{}{}", InventoryCategory::Os.header(), INDENT, value))
}

pub fn hostname(host: &str, domain: &str) -> String {
    format!("{}\n{}{}.{}", InventoryCategory::Hostname.header(), INDENT, host, domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn single_cpu_is_indented() {
        let out = cpu(&lines(&["Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz"]), false).unwrap();
        assert_eq!(out, "CPU:\n   Intel(R) Core(TM) i7-9700K @ 3.60GHz");
    }

    #[test]
    fn multiple_cpu_lines_report_first_doubled() {
        let out = cpu(&lines(&["Intel(R) Xeon(R) Gold 6130 CPU @ 2.10GHz", "AMD EPYC 7302"]), false)
            .unwrap();
        assert_eq!(out, "CPU:\n2x Intel(R) Xeon(R) Gold 6130 @ 2.10GHz");
    }

    #[test]
    fn bare_cpu_strips_vendor_tokens() {
        let out = cpu(&lines(&["Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz"]), true).unwrap();
        assert_eq!(out, "Core i7-9700K @ 3.60GHz");

        let amd = cpu(&lines(&["AMD Ryzen 9 5950X 16-Core Processor"]), true).unwrap();
        assert_eq!(amd, "Ryzen 9 5950X 16-Core Processor");
    }

    #[test]
    fn empty_cpu_is_a_normalization_error() {
        assert!(matches!(cpu(&[], false), Err(InventoryError::Normalization { .. })));
    }

    #[test]
    fn gpu_counts_duplicates() {
        let out = gpu(
            &lines(&["NVIDIA GeForce RTX 3090", "Intel(R) UHD Graphics", "NVIDIA GeForce RTX 3090"]),
            false,
        );
        assert_eq!(out, "GPU:\n2x NVIDIA GeForce RTX 3090\n   Intel(R) UHD Graphics");
    }

    #[test]
    fn bare_gpu_uses_first_entry() {
        let out = gpu(&lines(&["NVIDIA GeForce RTX 3090", "NVIDIA GeForce RTX 3090"]), true);
        assert_eq!(out, "2x GeForce RTX 3090");

        let single = gpu(&lines(&["Intel(R) UHD Graphics 630"]), true);
        assert_eq!(single, "UHD Graphics 630");

        assert_eq!(gpu(&[], true), "");
    }

    #[test]
    fn empty_nic_renders_header_only() {
        assert_eq!(nic(&[]), "NIC:");
    }

    #[test]
    fn nic_lists_distinct_adapters() {
        let out = nic(&lines(&["Intel(R) Ethernet Connection I219-V", "Realtek USB GbE"]));
        assert_eq!(out, "NIC:\n   Intel(R) Ethernet Connection I219-V\n   Realtek USB GbE");
    }

    #[test]
    fn ram_snaps_to_gb_boundary() {
        assert_eq!(ram(8_388_100, RamUnit::MB).unwrap(), "RAM:\n   8192 MB");
        assert_eq!(ram(8_388_100, RamUnit::GB).unwrap(), "RAM:\n   8.0 GB");
        assert_eq!(ram(16 * 1024 * 1024 + 300 * 1024, RamUnit::GB).unwrap(), "RAM:\n   16.0 GB");
    }

    #[test]
    fn ram_snap_band_is_exclusive() {
        assert_eq!(snap_ram_mb(8192 - 511), Some(8192));
        assert_eq!(snap_ram_mb(8192 + 510), Some(8192));
        assert_eq!(snap_ram_mb(8192 + 511), None);
        assert_eq!(snap_ram_mb(100), None);
    }

    #[test]
    fn ram_outside_range_is_an_error() {
        let err = ram(10 * 1024, RamUnit::GB).unwrap_err();
        assert!(matches!(err, InventoryError::Normalization { category: "ram", .. }));
        assert!(ram(5000 * 1024 * 1024, RamUnit::MB).is_err());
    }

    #[test]
    fn disks_are_aligned_and_counted() {
        let out = disk(&lines(&["Model A", "Model A"]), &lines(&["1048576", "1048576"])).unwrap();
        assert_eq!(out, "Disks:\n2x Model A     1.00 MB");

        let mixed = disk(
            &lines(&["Samsung SSD 970 EVO 1TB", "WDC WD20EZRZ"]),
            &lines(&["1000202273280", "2000396321280"]),
        )
        .unwrap();
        assert_eq!(
            mixed,
            "Disks:\n   Samsung SSD 970 EVO 1TB     931.51 GB\n   WDC WD20EZRZ                1.82 TB"
        );
    }

    #[test]
    fn disk_without_size_is_an_error() {
        assert!(disk(&lines(&["Model A", "Model B"]), &lines(&["1024"])).is_err());
        assert!(disk(&lines(&["Model A"]), &lines(&["unknown"])).is_err());
    }

    #[test]
    fn motherboard_uses_last_product_line() {
        let out = motherboard("ASUSTeK COMPUTER INC.", &lines(&["PRIME Z390-A", "ROG STRIX"])).unwrap();
        assert_eq!(out, "Motherboard:\n   ASUSTeK COMPUTER INC.:\tROG STRIX");
    }

    #[test]
    fn os_and_hostname() {
        assert_eq!(
            os(&lines(&["Microsoft Windows 10 Pro"])).unwrap(),
            "OS:\n   Microsoft Windows 10 Pro"
        );
        assert_eq!(
            os(&lines(&["Microsoft Windows 10 Pro", "Microsoft Windows 10 Pro"])).unwrap(),
            "OS:\n   2x Microsoft Windows 10 Pro"
        );
        assert_eq!(hostname("WS-01", "corp.local"), "Host:\n   WS-01.corp.local");
    }

    #[test]
    fn unavailable_names_platform() {
        let msg = unavailable(&Platform::Linux);
        assert!(msg.contains("Linux"));
        assert!(msg.contains("Windows Management Instrumentation is not available"));
    }
}
