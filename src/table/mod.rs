//! Table rows and their normalization from content values.

pub mod delimited;

pub use delimited::{DelimitedReader, Dialect};

use crate::content::{Cell, ContentValue};
use std::path::Path;

/// Rectangular table text. Every row has the first row's width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRows {
    rows: Vec<Vec<String>>,
}

impl TableRows {
    /// Build from ragged rows. Short rows are padded with empty cells and
    /// cells past the first row's width are dropped.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { rows }
    }

    /// Normalize a content value into rows.
    ///
    /// Structured rows pass through. A string naming an existing `.csv` or
    /// `.tsv` file is read from disk. Otherwise the string is tried as a JSON
    /// array of rows, and failing that becomes a single cell.
    pub fn from_content(value: &ContentValue) -> Self {
        match value {
            ContentValue::Rows(rows) => Self::from_cells(rows.clone()),
            ContentValue::Text(text) => Self::from_text(text),
        }
    }

    fn from_cells(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::into_text).collect())
                .collect(),
        )
    }

    fn from_text(text: &str) -> Self {
        let path = Path::new(text.trim());
        if let Some(dialect) = Dialect::for_path(path)
            && path.is_file()
        {
            match delimited::read_file(path, dialect) {
                Ok(rows) => return Self::new(rows),
                Err(e) => log::debug!("table file {} unreadable: {}", path.display(), e),
            }
        }

        match serde_json::from_str::<Vec<Vec<Cell>>>(text) {
            Ok(rows) => Self::from_cells(rows),
            Err(e) => {
                log::debug!("table content is not JSON rows, using a single cell: {}", e);
                Self::new(vec![vec![text.to_string()]])
            },
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0 || self.column_count() == 0
    }
}
