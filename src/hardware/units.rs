use crate::error::InventoryError;
use crate::hardware::types::{DisplaySize, SizeUnit};

const STEP: f64 = 1024.0;

/// Scale a size expressed in KB to the largest binary unit it fills.
///
/// Division stops at YB, so anything beyond that is shown as a large YB value.
pub fn convert(size: f64) -> Result<DisplaySize, InventoryError> {
    if size.is_nan() || size < 0.0 {
        return Err(InventoryError::InvalidInput(format!(
            "size must be a non-negative number, got {}",
            size
        )));
    }

    let mut value = size;
    let mut index = 0;
    while value >= STEP && index < SizeUnit::ALL.len() - 1 {
        value /= STEP;
        index += 1;
    }

    Ok(DisplaySize {
        value,
        unit: SizeUnit::ALL[index],
    })
}

/// Format a raw byte count as reported by disk queries.
pub fn format_bytes(bytes: f64) -> Result<String, InventoryError> {
    Ok(convert(bytes / STEP)?.to_string())
}
