use crate::data::PriceSeries;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReturnsError {
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, ReturnsError>;

/// Which columns a returns computation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    All,
    Named(String),
}

/// Result of a percentage-change computation, shaped like its selection.
#[derive(Debug, Clone)]
pub enum PercentChange {
    Table(PriceSeries),
    Column(Vec<f64>),
}

/// Percentage change `(v[t] / v[t-1]) - 1` per column, first row dropped.
///
/// Output length is input length minus one; zero- and one-row input yield an
/// empty result.
pub fn percent_change(series: &PriceSeries, selection: &ColumnSelection) -> Result<PercentChange> {
    match selection {
        ColumnSelection::Named(name) => {
            let values = series
                .column(name)
                .map_err(|_| ReturnsError::MissingColumn(name.clone()))?;
            Ok(PercentChange::Column(pct_change(values)))
        }
        ColumnSelection::All => {
            let index = series.index().iter().skip(1).copied().collect();
            let columns = series
                .iter_columns()
                .map(|(name, values)| (name.to_string(), pct_change(values)))
                .collect();
            // Columns all shrink by the same one row, so this cannot fail
            let table = PriceSeries::from_columns(index, columns)
                .expect("derived columns match derived index");
            Ok(PercentChange::Table(table))
        }
    }
}

fn pct_change(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| (pair[1] / pair[0]) - 1.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pct_change_values() {
        let changes = pct_change(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 2);
        assert_relative_eq!(changes[0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(changes[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_pct_change_short_input() {
        assert!(pct_change(&[]).is_empty());
        assert!(pct_change(&[42.0]).is_empty());
    }
}
