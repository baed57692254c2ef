//! XML text helpers for part generation.

mod escape;

pub use escape::{escape_xml, strip_invalid_xml_chars};
