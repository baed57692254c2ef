//! Non-fatal diagnostics raised while placing content.
use thiserror::Error;

/// A problem confined to one placeholder.
///
/// The placeholder is skipped and its siblings still render. Each warning is
/// logged when raised and also handed back to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// No image path was supplied for an image placeholder
    #[error("no image path given for placeholder '{placeholder}'")]
    MissingImagePath { placeholder: String },

    /// The image path does not exist
    #[error("image not found for placeholder '{placeholder}': {path}")]
    ImageNotFound { placeholder: String, path: String },

    /// The image exists but could not be read or is not a supported format
    #[error("unreadable image for placeholder '{placeholder}' ({path}): {reason}")]
    UnreadableImage {
        placeholder: String,
        path: String,
        reason: String,
    },

    /// The placeholder kind is not text, image or table
    #[error("unknown placeholder type '{kind}' for placeholder '{placeholder}'")]
    UnknownKind { placeholder: String, kind: String },
}

impl Warning {
    /// Name of the placeholder the warning concerns.
    pub fn placeholder(&self) -> &str {
        match self {
            Self::MissingImagePath { placeholder }
            | Self::ImageNotFound { placeholder, .. }
            | Self::UnreadableImage { placeholder, .. }
            | Self::UnknownKind { placeholder, .. } => placeholder,
        }
    }

    /// Log the warning and pass it through.
    pub(crate) fn emit(self) -> Self {
        log::warn!("{}", self);
        self
    }
}
