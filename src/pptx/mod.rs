//! PowerPoint (.pptx) output.
//!
//! A deliberately small PresentationML writer: blank slides carrying text
//! boxes, pictures and tables, serialized with one master, one blank layout
//! and one theme. Geometry is in EMUs throughout.
//!
//! ```rust
//! use deckgen::pptx::{Frame, Insets, Paragraph, Presentation, TextAlign, TextAnchor, TextBox, TextFormat};
//!
//! let mut pres = Presentation::new();
//! pres.add_slide().add_text_box(TextBox {
//!     name: "Title".to_string(),
//!     frame: Frame::new(457200, 457200, 8229600, 914400),
//!     paragraphs: vec![Paragraph {
//!         text: "Quarterly review".to_string(),
//!         align: TextAlign::Center,
//!         line_spacing: None,
//!     }],
//!     format: TextFormat::default(),
//!     anchor: TextAnchor::Middle,
//!     insets: Insets::default(),
//! });
//! let bytes = pres.to_bytes()?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), deckgen::Error>(())
//! ```

pub mod constants;
pub mod format;
pub mod package;
pub mod presentation;
pub mod shape;
pub mod slide;
pub mod template;

pub use format::{ImageFormat, TextAlign, TextAnchor, TextFormat};
pub use package::PackageWriter;
pub use presentation::Presentation;
pub use shape::{
    Crop, Frame, Insets, Paragraph, Picture, Shape, ShapeKind, Table, TableCell, TableRow, TextBox,
};
pub use slide::Slide;
