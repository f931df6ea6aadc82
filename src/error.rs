//! Error types for the sketch shell and host tooling.
//!
//! The subdivision core itself never fails; these cover configuration files and
//! image export.

use thiserror::Error;

/// Result type alias for fallible sketch operations
pub type Result<T> = std::result::Result<T, SketchError>;

#[derive(Error, Debug)]
pub enum SketchError {
    /// Configuration text could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Canvas dimensions that cannot hold a frame
    #[error("Invalid canvas size {width}x{height}")]
    CanvasSize { width: u32, height: u32 },

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing or encoding an exported frame failed
    #[error("Export failed: {0}")]
    Export(String),
}

#[cfg(target_arch = "wasm32")]
impl From<SketchError> for wasm_bindgen::JsValue {
    fn from(err: SketchError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
