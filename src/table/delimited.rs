//! Reader for comma- and tab-separated table files.

use crate::error::Result;
use std::path::Path;

/// Dialect of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    /// Escape byte honored inside quoted fields, off for plain CSV and TSV
    pub escape: Option<u8>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::csv()
    }
}

impl Dialect {
    pub fn csv() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
        }
    }

    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::csv()
        }
    }

    /// Pick the dialect from a `.csv` or `.tsv` extension.
    pub fn for_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::csv()),
            "tsv" => Some(Self::tsv()),
            _ => None,
        }
    }
}

/// Row-at-a-time parser over an in-memory buffer.
pub struct DelimitedReader<'a> {
    data: &'a [u8],
    pos: usize,
    dialect: Dialect,
}

impl<'a> DelimitedReader<'a> {
    pub fn new(data: &'a [u8], dialect: Dialect) -> Self {
        // Skip a UTF-8 byte order mark
        let data = data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data);
        Self { data, pos: 0, dialect }
    }

    /// Parse the next row, or `None` at end of input.
    pub fn next_row(&mut self) -> Option<Vec<String>> {
        let mut fields = Vec::new();
        let mut current = Vec::new();
        let mut field_start = true;
        let mut in_quotes = false;

        loop {
            let Some(&byte) = self.data.get(self.pos) else {
                if !fields.is_empty() || !current.is_empty() {
                    self.finish_field(&mut current, &mut fields);
                    return Some(fields);
                }
                return None;
            };
            self.pos += 1;

            match byte {
                b'\n' if !in_quotes => {
                    if field_start && fields.is_empty() && current.is_empty() {
                        // Blank line
                        continue;
                    }
                    self.finish_field(&mut current, &mut fields);
                    return Some(fields);
                },
                b'\r' if !in_quotes => continue,
                q if q == self.dialect.quote && (in_quotes || field_start) => {
                    if !in_quotes {
                        in_quotes = true;
                        field_start = false;
                    } else if self.peek() == Some(q) {
                        current.push(q);
                        self.pos += 1;
                    } else {
                        in_quotes = false;
                    }
                },
                d if d == self.dialect.delimiter && !in_quotes => {
                    self.finish_field(&mut current, &mut fields);
                    field_start = true;
                },
                e if in_quotes && self.dialect.escape == Some(e) => match self.peek() {
                    Some(next) => {
                        self.pos += 1;
                        match next {
                            b'n' => current.push(b'\n'),
                            b't' => current.push(b'\t'),
                            b'r' => current.push(b'\r'),
                            q if q == e || q == self.dialect.quote => current.push(q),
                            other => current.extend_from_slice(&[e, other]),
                        }
                    },
                    None => current.push(byte),
                },
                _ => {
                    current.push(byte);
                    field_start = false;
                },
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn finish_field(&self, current: &mut Vec<u8>, fields: &mut Vec<String>) {
        let bytes = std::mem::take(current);
        let text = String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        fields.push(text);
    }
}

impl Iterator for DelimitedReader<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row()
    }
}

/// Parse every row of a delimited buffer.
pub fn parse(data: &[u8], dialect: Dialect) -> Vec<Vec<String>> {
    DelimitedReader::new(data, dialect).collect()
}

/// Read every row of a delimited file.
pub fn read_file(path: &Path, dialect: Dialect) -> Result<Vec<Vec<String>>> {
    let data = std::fs::read(path)?;
    Ok(parse(&data, dialect))
}
