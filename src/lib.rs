//! deckgen - template-driven PowerPoint deck generation
//!
//! A template names a set of placeholders: text, image and table regions with
//! a position, a size and styling options. Content keyed by placeholder name
//! is mapped into those regions and written out as a `.pptx` file.
//!
//! # Features
//!
//! - **Template catalog**: templates defined in TOML, kept in file order
//! - **Brand profile**: shared typography and colors applied to every region
//! - **Text**: alignment, anchoring, soft-wrapping of long tokens and
//!   length-based shrinking
//! - **Images**: stretch to fit, or center-crop to the region's aspect ratio
//! - **Tables**: from rows, CSV/TSV files or JSON, with header and zebra
//!   styling and proportional column widths
//! - **Legacy templates**: loosely keyed JSON placeholder lists
//!
//! # Example
//!
//! ```no_run
//! use deckgen::{ContentMap, DeckBuilder, Config};
//!
//! # fn main() -> deckgen::Result<()> {
//! let builder = DeckBuilder::from_config(&Config::default())?;
//!
//! let content = ContentMap::new()
//!     .with("Title", "Q3 review")
//!     .with("Chart_1", "charts/revenue.png")
//!     .with("Table_1", "data/regions.csv");
//!
//! let warnings = builder.create_deck("q3.pptx", &"Title_And_Table".into(), &content)?;
//! for warning in &warnings {
//!     eprintln!("skipped {}: {}", warning.placeholder(), warning);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Assembling slides by hand
//!
//! ```rust
//! use deckgen::{BrandProfile, ContentMap, Presentation, SlideAssembler, TemplateCatalog};
//!
//! # fn main() -> deckgen::Result<()> {
//! let catalog = TemplateCatalog::from_toml_str(r#"
//!     [Commentary_Only]
//!     placeholders = [
//!         { name = "Title", type = "text", x = 0.5, y = 0.3, w = 9, h = 0.8, role = "title" },
//!         { name = "Body", type = "text", x = 0.5, y = 1.3, w = 9, h = 5.5 },
//!     ]
//! "#)?;
//! let brand = BrandProfile::default();
//! let assembler = SlideAssembler::new(&catalog, &brand);
//!
//! let mut pres = Presentation::new();
//! for week in 1..=3 {
//!     let content = ContentMap::new()
//!         .with("Title", format!("Week {week}"))
//!         .with("Body", "On track.");
//!     assembler.add_slide(&mut pres, "Commentary_Only", &content);
//! }
//! assert_eq!(pres.slide_count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod brand;
pub mod catalog;
pub mod common;
pub mod config;
pub mod content;
pub mod deck;
pub mod engine;
pub mod error;
pub mod legacy;
pub mod pptx;
pub mod table;
pub mod warning;

pub use assembler::SlideAssembler;
pub use brand::{BrandProfile, ColorRef, TextRole};
pub use catalog::{
    FitMode, ImageOptions, PlaceholderKind, PlaceholderSpec, TableOptions, Template,
    TemplateCatalog, TextOptions,
};
pub use config::Config;
pub use content::{Cell, ContentMap, ContentValue};
pub use deck::{DeckBuilder, TemplateRef, create_deck};
pub use engine::PlacementEngine;
pub use error::{Error, Result};
pub use legacy::{LegacyPlaceholder, LegacyTemplate, normalize, render_legacy};
pub use pptx::Presentation;
pub use table::TableRows;
pub use warning::Warning;
