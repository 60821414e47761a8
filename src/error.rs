use std::path::PathBuf;

use thiserror::Error;

pub type TrayResult<T> = Result<T, TrayError>;

#[derive(Error, Debug)]
pub enum TrayError {
    /// The hidden window or the notification entry could not be created.
    #[error("Failed to create tray: {reason}")]
    Attach { reason: String },

    #[error("Native menu operation failed: {reason}")]
    Menu { reason: String },

    #[error("Tray icon error: {reason}")]
    Icon { reason: String },

    #[error("Failed to write default icon: {0}")]
    DefaultIcon(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(PathBuf),
}

impl TrayError {
    pub fn menu(reason: impl ToString) -> Self {
        Self::Menu { reason: reason.to_string() }
    }

    pub fn attach(reason: impl ToString) -> Self {
        Self::Attach { reason: reason.to_string() }
    }

    pub fn icon(reason: impl ToString) -> Self {
        Self::Icon { reason: reason.to_string() }
    }
}
