//! Error types for pulldown-reveal.
//!
//! Almost every failure here is cosmetic. Callers decide whether an error is
//! fatal; the animator itself only logs missing elements and moves on.

/// Errors raised by hosts, configuration loading and mounting.
#[derive(Debug, thiserror::Error)]
pub enum RevealError {
    /// An element the panel expects (clock, container, close button) is absent.
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// The font stylesheet could not be loaded. Text falls back to the default font.
    #[error("stylesheet {url} failed to load: {reason}")]
    Stylesheet { url: String, reason: String },

    /// A configuration value is out of range or inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A TOML configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Terminal I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RevealError>;
