use thiserror::Error;
use types::InstanceId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read snapshot store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Snapshot store is not a valid preferences document: {0}")]
    Format(#[from] serde_json::Error),
}

/// Faults raised while updating a single widget instance. None of these
/// escape the batch.
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Malformed snapshot: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Snapshot is not a JSON object")]
    NotAnObject,
    #[error("Snapshot store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("Widget instance {0} no longer exists")]
    MissingInstance(InstanceId),
    #[error("Widget instance {0} has no known variant")]
    UnsupportedVariant(InstanceId),
}

impl WidgetError {
    /// Whether the widget still shows something after this fault
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnsupportedVariant(_))
    }
}
