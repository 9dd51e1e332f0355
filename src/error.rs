// Crate error type. Every variant states *where* things went wrong.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("window init failed: {0}")]
    WindowInit(String),

    /// Pushing a frame to the window failed
    #[error("window update failed: {0}")]
    WindowUpdate(String),

    /// Config file could not be read
    #[error("config read failed: {0}")]
    ConfigRead(String),

    /// Config file could not be parsed as TOML
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// Config parsed but a value is out of range
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Writing a template record to disk failed
    #[error("template save failed: {0}")]
    TemplateSave(String),

    /// Encoding or writing a canvas snapshot failed
    #[error("snapshot export failed: {0}")]
    Snapshot(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
