pub mod inventory;
pub mod settings;

pub use inventory::handle_inventory_command;
pub use settings::handle_settings_command;
