//! Common types and utilities shared by the engine and the PPTX writer.

pub mod color;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use color::RGBColor;
pub use unit::{EMUS_PER_INCH, emu_to_inches, inches_to_emu};
