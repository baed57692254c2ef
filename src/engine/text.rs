//! Text placement.

use super::{PlacementEngine, text_insets};
use crate::brand::TextRole;
use crate::catalog::{PlaceholderSpec, TextOptions};
use crate::content::{Cell, ContentValue};
use crate::pptx::{Paragraph, Slide, TextBox, TextFormat};

/// Tokens longer than this get break opportunities.
const LONG_TOKEN_CHARS: usize = 30;
/// Distance between inserted break opportunities.
const SOFT_BREAK_EVERY: usize = 15;
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Text longer than this (in chars) starts to shrink.
pub const SHRINK_THRESHOLD_CHARS: usize = 280;
/// One point is taken off per started run of this many chars over the threshold.
pub const SHRINK_STEP_CHARS: usize = 40;

/// Insert zero-width spaces into long unbroken tokens so the renderer can
/// wrap them. Whitespace is preserved as is.
pub fn soft_wrap(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut token = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            push_token(&mut out, &token);
            token.clear();
            out.push(ch);
        } else {
            token.push(ch);
        }
    }
    push_token(&mut out, &token);
    out
}

fn push_token(out: &mut String, token: &str) {
    if token.chars().count() <= LONG_TOKEN_CHARS {
        out.push_str(token);
        return;
    }
    for (i, ch) in token.chars().enumerate() {
        if i > 0 && i % SOFT_BREAK_EVERY == 0 {
            out.push(ZERO_WIDTH_SPACE);
        }
        out.push(ch);
    }
}

/// Font size after the length-based shrink.
///
/// Never returns less than `min_size` unless `size` already was.
pub fn shrink_size(size: f64, char_count: usize, min_size: f64) -> f64 {
    if char_count <= SHRINK_THRESHOLD_CHARS || size <= min_size {
        return size;
    }
    let steps = (char_count - SHRINK_THRESHOLD_CHARS).div_ceil(SHRINK_STEP_CHARS);
    (size - steps as f64).max(min_size)
}

impl PlacementEngine<'_> {
    /// Render a text placeholder. Absent content yields an empty box.
    pub fn render_text(
        &self,
        slide: &mut Slide,
        spec: &PlaceholderSpec,
        options: &TextOptions,
        value: Option<&ContentValue>,
    ) {
        let text = match value {
            Some(ContentValue::Text(s)) => s.clone(),
            Some(ContentValue::Rows(rows)) => {
                log::debug!("placeholder '{}': flattening rows into text", spec.name);
                rows.iter()
                    .map(|row| {
                        row.iter()
                            .cloned()
                            .map(Cell::into_text)
                            .collect::<Vec<_>>()
                            .join("\t")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            },
            None => String::new(),
        };

        let brand = self.brand;
        let role = options.role;
        let mut size = options.font_size.unwrap_or_else(|| brand.size_for(role));
        if options.shrink_to_min {
            size = shrink_size(size, text.chars().count(), brand.min_size());
        }
        let line_spacing = options
            .line_spacing
            .unwrap_or_else(|| brand.line_height_for(role));

        let paragraphs = text
            .split('\n')
            .map(|line| Paragraph {
                text: soft_wrap(line.strip_suffix('\r').unwrap_or(line)),
                align: options.align,
                line_spacing: Some(line_spacing),
            })
            .collect();

        slide.add_text_box(TextBox {
            name: spec.name.clone(),
            frame: spec.frame(),
            paragraphs,
            format: TextFormat {
                font: Some(brand.font_family().to_string()),
                size: Some(size),
                bold: Some(options.bold.unwrap_or(role == TextRole::Title)),
                color: Some(
                    options
                        .color
                        .map_or_else(|| brand.color_for(role), |c| brand.resolve(c)),
                ),
            },
            anchor: options.valign,
            insets: text_insets(),
        });
    }
}
