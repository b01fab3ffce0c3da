// Host inventory: query, normalize, aggregate, format
pub mod types;
pub mod units;
pub mod normalize;
pub mod aggregate;
pub mod format;
pub mod transport;
pub mod host;
pub mod collector;

pub use collector::collect_full_inventory;
pub use host::HostInventory;
pub use types::RamUnit;
