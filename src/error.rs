// Asset errors: embedded files that are absent or cannot be decoded

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("Asset '{0}' is not embedded")]
    Missing(String),
    #[error("Failed to decode asset '{name}': {message}")]
    Decode { name: String, message: String },
}
