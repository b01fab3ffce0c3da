use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    /// The management query could not be run or its output could not be read.
    #[error("management query `{component} GET {property}` failed: {reason}")]
    TransportFailure {
        component: String,
        property: String,
        reason: String,
    },

    #[error("Windows Management Instrumentation is not available on {0}")]
    UnsupportedPlatform(String),

    /// Query output was read but does not have the expected shape.
    #[error("could not normalize {category} output: {reason}")]
    Normalization {
        category: &'static str,
        reason: String,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl InventoryError {
    pub fn transport(component: &str, property: &str, reason: impl Into<String>) -> Self {
        InventoryError::TransportFailure {
            component: component.to_string(),
            property: property.to_string(),
            reason: reason.into(),
        }
    }

    pub fn normalization(category: &'static str, reason: impl Into<String>) -> Self {
        InventoryError::Normalization {
            category,
            reason: reason.into(),
        }
    }
}
