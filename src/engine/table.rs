//! Table placement.

use super::{PlacementEngine, soft_wrap, text_insets};
use crate::catalog::{PlaceholderSpec, TableOptions};
use crate::common::inches_to_emu;
use crate::content::ContentValue;
use crate::pptx::{Frame, Slide, Table, TableCell, TableRow, TextFormat};
use crate::table::TableRows;

/// Split `total` EMUs across `count` columns.
///
/// Weights past `count` are ignored and missing ones count as 1. Negative or
/// non-finite weights count as 0. When the weights do not sum to a positive
/// value the columns are equal. The last column takes the rounding
/// remainder so the widths always add up to `total`.
pub fn column_widths(total: i64, count: usize, weights: Option<&[f64]>) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }

    let mut weights: Vec<f64> = (0..count)
        .map(|i| {
            let w = weights.and_then(|ws| ws.get(i).copied()).unwrap_or(1.0);
            if w.is_finite() && w > 0.0 { w } else { 0.0 }
        })
        .collect();
    let mut sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        weights.fill(1.0);
        sum = count as f64;
    }

    let mut widths: Vec<i64> = weights[..count - 1]
        .iter()
        .map(|w| (total as f64 * w / sum).floor() as i64)
        .collect();
    let used: i64 = widths.iter().sum();
    widths.push(total - used);
    widths
}

/// Indices of the rows that get the zebra fill.
///
/// Only tables with more than two rows are striped. Data rows start after
/// the header, and every second data row is filled.
pub fn zebra_rows(row_count: usize, header: bool) -> Vec<usize> {
    if row_count <= 2 {
        return Vec::new();
    }
    let first_data = usize::from(header);
    (first_data..row_count)
        .filter(|i| (i - first_data) % 2 == 1)
        .collect()
}

impl PlacementEngine<'_> {
    /// Render a table placeholder. Content that yields no rows renders
    /// nothing.
    pub fn render_table(
        &self,
        slide: &mut Slide,
        spec: &PlaceholderSpec,
        options: &TableOptions,
        value: Option<&ContentValue>,
    ) {
        let rows = value.map(TableRows::from_content).unwrap_or_default();
        if rows.is_empty() {
            log::debug!("placeholder '{}': no table rows, skipping", spec.name);
            return;
        }

        let brand = self.brand;
        let region = spec.frame();
        let row_height = inches_to_emu(options.row_height);
        let columns = column_widths(region.width, rows.column_count(), options.columns.as_deref());
        let striped = if options.zebra {
            zebra_rows(rows.row_count(), options.header)
        } else {
            Vec::new()
        };

        let table_rows = rows
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let is_header = options.header && r == 0;
                let fill = if is_header {
                    Some(brand.table_header_bg())
                } else if striped.contains(&r) {
                    Some(brand.table_zebra_bg())
                } else {
                    None
                };
                let format = TextFormat {
                    font: Some(brand.font_family().to_string()),
                    size: Some(options.font_size.unwrap_or(brand.body_size())),
                    bold: Some(is_header),
                    color: Some(brand.text_color()),
                };

                TableRow {
                    height: row_height,
                    cells: row
                        .iter()
                        .map(|text| TableCell {
                            text: soft_wrap(text),
                            format: format.clone(),
                            fill,
                        })
                        .collect(),
                }
            })
            .collect::<Vec<_>>();

        slide.add_table(Table {
            name: spec.name.clone(),
            frame: Frame::new(
                region.x,
                region.y,
                region.width,
                row_height * table_rows.len() as i64,
            ),
            columns,
            rows: table_rows,
            first_row: options.header,
            band_rows: !striped.is_empty(),
            cell_insets: text_insets(),
        });
    }
}
