pub mod loader;

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Non-numeric value {value:?} in column {column}")]
    Numeric { column: String, value: String },
    #[error("Column length {0} does not match index length")]
    LengthMismatch(usize),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// A per-symbol price table: one row per timestamp, named numeric columns.
///
/// Rows are sorted ascending by timestamp at construction; the series is
/// immutable afterwards. The timestamp index is held separately and is not a
/// data column.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    index: Vec<NaiveDateTime>,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceSeries {
    /// Build a series from an index and (name, values) columns, sorting rows
    /// by timestamp. All columns must match the index length.
    pub fn from_columns(
        index: Vec<NaiveDateTime>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self> {
        for (_, values) in &columns {
            if values.len() != index.len() {
                return Err(DataError::LengthMismatch(values.len()));
            }
        }

        // Sort rows by timestamp via a permutation of row positions
        let mut order: Vec<usize> = (0..index.len()).collect();
        order.sort_by_key(|&i| index[i]);

        let sorted_index = order.iter().map(|&i| index[i]).collect();
        let mut names = Vec::with_capacity(columns.len());
        let mut sorted_columns = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            sorted_columns.push(order.iter().map(|&i| values[i]).collect());
            names.push(name);
        }

        Ok(Self {
            index: sorted_index,
            names,
            columns: sorted_columns,
        })
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Sum of the `volume` column.
    pub fn total_volume(&self) -> Result<f64> {
        Ok(self.column("volume")?.iter().sum())
    }

    /// Iterate (name, values) pairs in CSV column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}
