//! Brand profile: shared typography and color defaults.
//!
//! A [`BrandProfile`] is built once per run and handed to the placement
//! engine explicitly. Every value a placeholder does not override comes from
//! here.
//!
//! ```toml
//! [typography]
//! font_family = "Calibri"
//! body_size = 14
//! title_size = 28
//! caption_size = 10
//! min_size = 9
//! title_line_height = 1.0
//! body_line_height = 1.15
//!
//! [colors]
//! text = "1F2937"
//! muted = "6B7280"
//! accent = "2563EB"
//! table_header_bg = "E5E7EB"
//! table_zebra_bg = "F3F4F6"
//! ```

use crate::common::RGBColor;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// Typographic role of a text placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRole {
    Title,
    #[default]
    Body,
    Caption,
}

/// A color given either as a brand palette name or as hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRef {
    Text,
    Muted,
    Accent,
    Rgb(RGBColor),
}

impl FromStr for ColorRef {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "muted" => Ok(Self::Muted),
            "accent" => Ok(Self::Accent),
            _ => s.parse::<RGBColor>().map(Self::Rgb),
        }
    }
}

/// Immutable typography and color defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandProfile {
    font_family: String,
    body_size: f64,
    title_size: f64,
    caption_size: f64,
    min_size: f64,
    title_line_height: f64,
    body_line_height: f64,
    text: RGBColor,
    muted: RGBColor,
    accent: RGBColor,
    table_header_bg: RGBColor,
    table_zebra_bg: RGBColor,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            body_size: 14.0,
            title_size: 28.0,
            caption_size: 10.0,
            min_size: 9.0,
            title_line_height: 1.0,
            body_line_height: 1.15,
            text: RGBColor::new(0x1F, 0x29, 0x37),
            muted: RGBColor::new(0x6B, 0x72, 0x80),
            accent: RGBColor::new(0x25, 0x63, 0xEB),
            table_header_bg: RGBColor::new(0xE5, 0xE7, 0xEB),
            table_zebra_bg: RGBColor::new(0xF3, 0xF4, 0xF6),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBrand {
    typography: RawTypography,
    colors: RawColors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTypography {
    font_family: Option<String>,
    body_size: Option<f64>,
    title_size: Option<f64>,
    caption_size: Option<f64>,
    min_size: Option<f64>,
    title_line_height: Option<f64>,
    body_line_height: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColors {
    text: Option<RGBColor>,
    muted: Option<RGBColor>,
    accent: Option<RGBColor>,
    table_header_bg: Option<RGBColor>,
    table_zebra_bg: Option<RGBColor>,
}

impl BrandProfile {
    /// Parse a brand profile from TOML. Absent keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawBrand = toml::from_str(s)?;
        let defaults = Self::default();
        let t = raw.typography;
        let c = raw.colors;

        Ok(Self {
            font_family: t.font_family.unwrap_or(defaults.font_family),
            body_size: t.body_size.unwrap_or(defaults.body_size),
            title_size: t.title_size.unwrap_or(defaults.title_size),
            caption_size: t.caption_size.unwrap_or(defaults.caption_size),
            min_size: t.min_size.unwrap_or(defaults.min_size),
            title_line_height: t.title_line_height.unwrap_or(defaults.title_line_height),
            body_line_height: t.body_line_height.unwrap_or(defaults.body_line_height),
            text: c.text.unwrap_or(defaults.text),
            muted: c.muted.unwrap_or(defaults.muted),
            accent: c.accent.unwrap_or(defaults.accent),
            table_header_bg: c.table_header_bg.unwrap_or(defaults.table_header_bg),
            table_zebra_bg: c.table_zebra_bg.unwrap_or(defaults.table_zebra_bg),
        })
    }

    /// Load a brand profile from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a brand profile, falling back to the defaults.
    ///
    /// A missing file is silent; an unreadable or malformed one is logged.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!(
                    "brand configuration {} unusable, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            },
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn body_size(&self) -> f64 {
        self.body_size
    }

    pub fn title_size(&self) -> f64 {
        self.title_size
    }

    pub fn caption_size(&self) -> f64 {
        self.caption_size
    }

    /// Smallest size the text shrink heuristic may reach.
    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn title_line_height(&self) -> f64 {
        self.title_line_height
    }

    pub fn body_line_height(&self) -> f64 {
        self.body_line_height
    }

    pub fn text_color(&self) -> RGBColor {
        self.text
    }

    pub fn muted_color(&self) -> RGBColor {
        self.muted
    }

    pub fn accent_color(&self) -> RGBColor {
        self.accent
    }

    pub fn table_header_bg(&self) -> RGBColor {
        self.table_header_bg
    }

    pub fn table_zebra_bg(&self) -> RGBColor {
        self.table_zebra_bg
    }

    /// Default point size for a text role.
    pub fn size_for(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Title => self.title_size,
            TextRole::Body => self.body_size,
            TextRole::Caption => self.caption_size,
        }
    }

    /// Default line-height multiplier for a text role.
    pub fn line_height_for(&self, role: TextRole) -> f64 {
        match role {
            TextRole::Title => self.title_line_height,
            TextRole::Body | TextRole::Caption => self.body_line_height,
        }
    }

    /// Default text color for a text role.
    pub fn color_for(&self, role: TextRole) -> RGBColor {
        match role {
            TextRole::Caption => self.muted,
            TextRole::Title | TextRole::Body => self.text,
        }
    }

    /// Resolve a palette reference against this profile.
    pub fn resolve(&self, color: ColorRef) -> RGBColor {
        match color {
            ColorRef::Text => self.text,
            ColorRef::Muted => self.muted,
            ColorRef::Accent => self.accent,
            ColorRef::Rgb(rgb) => rgb,
        }
    }
}
