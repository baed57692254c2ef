//! Error types for deck generation.
//!
//! Only structural failures surface as [`Error`]: unreadable configuration,
//! an unresolvable template reference, or a package that cannot be written.
//! Problems local to a single placeholder are reported as
//! [`Warning`](crate::Warning) values instead and never abort a slide.
use thiserror::Error;

/// Main error type for deckgen operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Malformed JSON content or legacy template
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error while writing the package
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Two placeholders in one template share a name
    #[error("Duplicate placeholder '{name}' in template '{template}'")]
    DuplicatePlaceholder { template: String, name: String },

    /// The template reference is neither a catalog name nor a legacy template
    #[error(
        "Unknown template reference '{0}'. Pass a template name defined in the \
         template catalog, or a legacy object with 'placeholders'."
    )]
    InvalidTemplateReference(String),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

/// Result type for deckgen operations.
pub type Result<T> = std::result::Result<T, Error>;
