//! Static company-name / ticker-code lookup table.
//!
//! The table is loaded once from a CSV file with a header row (plain or
//! gzip-compressed) and queried in memory. Row order is preserved so search
//! results come back in table order.

use crate::error::Result;
use crate::models::TickerRow;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

/// In-memory ticker lookup table.
#[derive(Debug, Clone, Default)]
pub struct TickerTable {
    rows: Vec<TickerRow>,
}

impl TickerTable {
    /// Build a table from rows already in memory.
    pub fn from_rows(rows: Vec<TickerRow>) -> Self {
        Self { rows }
    }

    /// Parse a CSV table from any reader.
    ///
    /// Rows with a blank company name or code are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<TickerRow>() {
            let row = record?;
            if row.company_name.is_empty() || row.ticker_code.is_empty() {
                continue;
            }
            rows.push(row);
        }
        Ok(Self { rows })
    }

    /// Load a table from disk, decompressing `.gz` files transparently.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = BufReader::new(File::open(path)?);

        let table = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
            Self::from_reader(GzDecoder::new(file))?
        } else {
            Self::from_reader(file)?
        };

        info!(path = %path.display(), rows = table.len(), "loaded ticker table");
        Ok(table)
    }

    /// Rows whose company name contains `text`, ignoring case.
    ///
    /// Exact substring match, in table order. An empty needle matches every row.
    pub fn search(&self, text: &str) -> Vec<&TickerRow> {
        let needle = text.to_lowercase();
        self.rows
            .iter()
            .filter(|row| row.company_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact ticker-code lookup (ASCII case-insensitive).
    pub fn get_by_code(&self, code: &str) -> Option<&TickerRow> {
        let code = code.trim();
        self.rows
            .iter()
            .find(|row| row.ticker_code.eq_ignore_ascii_case(code))
    }

    pub fn rows(&self) -> &[TickerRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
