//! Placeholder specifications.

use crate::brand::{ColorRef, TextRole};
use crate::common::inches_to_emu;
use crate::pptx::{Frame, TextAlign, TextAnchor};
use crate::warning::Warning;
use serde::Deserialize;

/// Default table row height in inches.
pub const DEFAULT_ROW_HEIGHT: f64 = 0.3;

/// One named region of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderSpec {
    pub name: String,
    /// Left edge in inches
    pub x: f64,
    /// Top edge in inches
    pub y: f64,
    /// Width in inches
    pub w: f64,
    /// Height in inches
    pub h: f64,
    pub kind: PlaceholderKind,
}

impl PlaceholderSpec {
    /// The region in EMUs.
    pub fn frame(&self) -> Frame {
        Frame::new(
            inches_to_emu(self.x),
            inches_to_emu(self.y),
            inches_to_emu(self.w),
            inches_to_emu(self.h),
        )
    }
}

/// What a placeholder renders, with the options that apply to it.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderKind {
    Text(TextOptions),
    Image(ImageOptions),
    Table(TableOptions),
}

impl PlaceholderKind {
    /// The configuration tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Table(_) => "table",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub align: TextAlign,
    pub valign: TextAnchor,
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<ColorRef>,
    /// Line-height multiplier override
    pub line_spacing: Option<f64>,
    pub shrink_to_min: bool,
    pub role: TextRole,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            align: TextAlign::Left,
            valign: TextAnchor::Top,
            font_size: None,
            bold: None,
            color: None,
            line_spacing: None,
            shrink_to_min: true,
            role: TextRole::Body,
        }
    }
}

/// How an image is reconciled with its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Stretch to the box, ignoring aspect ratio.
    #[default]
    Contain,
    /// Center-crop the source to the box's aspect ratio, then fill the box.
    Cover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageOptions {
    pub fit: FitMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    pub header: bool,
    pub zebra: bool,
    /// Row height in inches
    pub row_height: f64,
    /// Relative column widths
    pub columns: Option<Vec<f64>>,
    pub font_size: Option<f64>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            header: true,
            zebra: true,
            row_height: DEFAULT_ROW_HEIGHT,
            columns: None,
            font_size: None,
        }
    }
}

/// Placeholder as written in configuration, before the kind is resolved.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawPlaceholder {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub font_size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<String>,
    pub line_spacing: Option<f64>,
    pub shrink_to_min: Option<bool>,
    pub role: Option<String>,
    pub fit: Option<String>,
    pub header: Option<bool>,
    pub zebra: Option<bool>,
    pub row_height: Option<f64>,
    pub columns: Option<Vec<f64>>,
}

impl RawPlaceholder {
    /// Resolve the kind tag into a typed specification.
    pub(crate) fn into_spec(self) -> Result<PlaceholderSpec, Warning> {
        let kind = match self.kind.trim().to_ascii_lowercase().as_str() {
            "text" => PlaceholderKind::Text(self.text_options()),
            "image" => PlaceholderKind::Image(ImageOptions {
                fit: parse_fit(&self.name, self.fit.as_deref()),
            }),
            "table" => PlaceholderKind::Table(TableOptions {
                header: self.header.unwrap_or(true),
                zebra: self.zebra.unwrap_or(true),
                row_height: self
                    .row_height
                    .filter(|h| *h > 0.0)
                    .unwrap_or(DEFAULT_ROW_HEIGHT),
                columns: self.columns.clone(),
                font_size: self.font_size,
            }),
            _ => {
                return Err(Warning::UnknownKind {
                    placeholder: self.name,
                    kind: self.kind,
                }
                .emit());
            },
        };

        Ok(PlaceholderSpec {
            name: self.name,
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            kind,
        })
    }

    fn text_options(&self) -> TextOptions {
        let color = self.color.as_deref().and_then(|c| match c.parse::<ColorRef>() {
            Ok(color) => Some(color),
            Err(e) => {
                log::warn!("placeholder '{}': ignoring color: {}", self.name, e);
                None
            },
        });

        TextOptions {
            align: self
                .align
                .as_deref()
                .map(TextAlign::from_name)
                .unwrap_or_default(),
            valign: self
                .valign
                .as_deref()
                .map(TextAnchor::from_name)
                .unwrap_or_default(),
            font_size: self.font_size,
            bold: self.bold,
            color,
            line_spacing: self.line_spacing,
            shrink_to_min: self.shrink_to_min.unwrap_or(true),
            role: parse_role(self.role.as_deref()),
        }
    }
}

fn parse_fit(placeholder: &str, fit: Option<&str>) -> FitMode {
    match fit.map(|f| f.trim().to_ascii_lowercase()) {
        None => FitMode::Contain,
        Some(f) if f == "contain" => FitMode::Contain,
        Some(f) if f == "cover" => FitMode::Cover,
        Some(other) => {
            log::warn!(
                "placeholder '{}': unknown fit mode '{}', using contain",
                placeholder,
                other
            );
            FitMode::Contain
        },
    }
}

fn parse_role(role: Option<&str>) -> TextRole {
    match role.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
        Some("title") => TextRole::Title,
        Some("caption") => TextRole::Caption,
        _ => TextRole::Body,
    }
}
