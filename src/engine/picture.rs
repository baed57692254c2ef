//! Picture placement.

use super::PlacementEngine;
use crate::catalog::{FitMode, ImageOptions, PlaceholderSpec};
use crate::content::ContentValue;
use crate::pptx::{Crop, ImageFormat, Picture, Slide};
use crate::warning::Warning;
use std::path::Path;

/// Symmetric center crop that gives an `img_w`×`img_h` source the aspect
/// ratio of a `box_w`×`box_h` box.
///
/// Fractions are of the source's width and height. Degenerate sizes yield no
/// crop.
pub fn cover_crop(img_w: f64, img_h: f64, box_w: f64, box_h: f64) -> Crop {
    if img_w <= 0.0 || img_h <= 0.0 || box_w <= 0.0 || box_h <= 0.0 {
        return Crop::default();
    }
    let img_ratio = img_w / img_h;
    let box_ratio = box_w / box_h;

    if img_ratio > box_ratio {
        let side = ((1.0 - box_ratio / img_ratio) / 2.0).clamp(0.0, 1.0);
        Crop {
            left: side,
            right: side,
            ..Crop::default()
        }
    } else if img_ratio < box_ratio {
        let side = ((1.0 - img_ratio / box_ratio) / 2.0).clamp(0.0, 1.0);
        Crop {
            top: side,
            bottom: side,
            ..Crop::default()
        }
    } else {
        Crop::default()
    }
}

impl PlacementEngine<'_> {
    /// Render an image placeholder from a file path.
    ///
    /// On any failure nothing is added to the slide and the warning is
    /// returned.
    pub fn render_image(
        &self,
        slide: &mut Slide,
        spec: &PlaceholderSpec,
        options: &ImageOptions,
        value: Option<&ContentValue>,
    ) -> Result<(), Warning> {
        let placeholder = || spec.name.clone();

        let path = match value.and_then(ContentValue::as_text).map(str::trim) {
            Some(p) if !p.is_empty() => Path::new(p),
            _ => {
                return Err(Warning::MissingImagePath {
                    placeholder: placeholder(),
                }
                .emit());
            },
        };

        if !path.is_file() {
            return Err(Warning::ImageNotFound {
                placeholder: placeholder(),
                path: path.display().to_string(),
            }
            .emit());
        }

        let unreadable = |reason: String| {
            Warning::UnreadableImage {
                placeholder: placeholder(),
                path: path.display().to_string(),
                reason,
            }
            .emit()
        };

        let data = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| unreadable("unsupported image format".to_string()))?;

        let crop = match options.fit {
            FitMode::Contain => Crop::default(),
            FitMode::Cover => match image::image_dimensions(path) {
                Ok((w, h)) => cover_crop(w as f64, h as f64, spec.w, spec.h),
                Err(e) => {
                    log::debug!(
                        "placeholder '{}': cannot read size of {}, placing uncropped: {}",
                        spec.name,
                        path.display(),
                        e
                    );
                    Crop::default()
                },
            },
        };

        slide.add_picture(Picture {
            name: spec.name.clone(),
            frame: spec.frame(),
            description: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            data,
            format,
            crop,
        });
        Ok(())
    }
}
