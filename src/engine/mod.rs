//! Placement engine: renders one content value into one slide region.
//!
//! The engine holds nothing but a borrowed [`BrandProfile`]. Each render
//! call appends at most one shape to the slide and reports per-placeholder
//! problems as a [`Warning`] rather than an error, so sibling placeholders
//! always get their turn.

mod picture;
mod table;
mod text;

pub use picture::cover_crop;
pub use table::{column_widths, zebra_rows};
pub use text::{SHRINK_STEP_CHARS, SHRINK_THRESHOLD_CHARS, shrink_size, soft_wrap};

use crate::brand::BrandProfile;
use crate::catalog::{PlaceholderKind, PlaceholderSpec};
use crate::common::inches_to_emu;
use crate::content::ContentValue;
use crate::pptx::{Insets, Slide};
use crate::warning::Warning;

/// Inner padding of text boxes and table cells, in inches.
pub const TEXT_INSET_INCHES: f64 = 0.05;

pub(crate) fn text_insets() -> Insets {
    Insets::uniform(inches_to_emu(TEXT_INSET_INCHES))
}

/// Renders placeholders against a brand profile.
#[derive(Debug, Clone, Copy)]
pub struct PlacementEngine<'a> {
    brand: &'a BrandProfile,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(brand: &'a BrandProfile) -> Self {
        Self { brand }
    }

    pub fn brand(&self) -> &BrandProfile {
        self.brand
    }

    /// Render `value` into the region described by `spec`.
    pub fn place(
        &self,
        slide: &mut Slide,
        spec: &PlaceholderSpec,
        value: Option<&ContentValue>,
    ) -> Option<Warning> {
        match &spec.kind {
            PlaceholderKind::Text(options) => {
                self.render_text(slide, spec, options, value);
                None
            },
            PlaceholderKind::Image(options) => {
                self.render_image(slide, spec, options, value).err()
            },
            PlaceholderKind::Table(options) => {
                self.render_table(slide, spec, options, value);
                None
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::{PlaceholderKind, PlaceholderSpec};

    pub fn spec(name: &str, w: f64, h: f64, kind: PlaceholderKind) -> PlaceholderSpec {
        PlaceholderSpec {
            name: name.to_string(),
            x: 0.5,
            y: 0.5,
            w,
            h,
            kind,
        }
    }

    /// A solid PNG of the given pixel size, written to a temp file.
    pub fn png_file(width: u32, height: u32) -> tempfile::NamedTempFile {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([37, 99, 235]));
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        img.save_with_format(file.path(), image::ImageFormat::Png)
            .unwrap();
        file
    }
}
