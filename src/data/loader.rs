use super::{DataError, PriceSeries, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;

const TIMESTAMP_COLUMN: &str = "timestamp";

/// Symbols in a corpus directory: every file name minus its extension, in
/// directory-listing order. No ordering guarantee.
pub fn list_symbols<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let mut symbols = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            symbols.push(stem.to_string());
        }
    }
    Ok(symbols)
}

/// Load `{dir}/{symbol}.csv` into a timestamp-indexed price series.
///
/// The file must carry a `timestamp` header (matched case-insensitively);
/// every other column is parsed as f64. Rows come back sorted by timestamp.
pub fn load_price_series<P: AsRef<Path>>(symbol: &str, dir: P) -> Result<PriceSeries> {
    let path = dir.as_ref().join(format!("{symbol}.csv"));
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
    let ts_pos = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(TIMESTAMP_COLUMN))
        .ok_or_else(|| DataError::MissingColumn(TIMESTAMP_COLUMN.to_string()))?;

    let value_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != ts_pos)
        .map(|(_, h)| h.clone())
        .collect();

    let mut index: Vec<NaiveDateTime> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); value_names.len()];
    for record in rdr.records() {
        let record = record?;
        let raw_ts = record.get(ts_pos).unwrap_or("");
        index.push(parse_timestamp(raw_ts)?);

        let mut col = 0;
        for (i, field) in record.iter().enumerate() {
            if i == ts_pos {
                continue;
            }
            let value = field.parse::<f64>().map_err(|_| DataError::Numeric {
                column: value_names[col].clone(),
                value: field.to_string(),
            })?;
            columns[col].push(value);
            col += 1;
        }
    }

    PriceSeries::from_columns(index, value_names.into_iter().zip(columns).collect())
}

/// Total traded volume per symbol for the first `limit` symbols.
///
/// Pairs are sorted ascending by symbol name (the documented sort key), not by
/// volume, then truncated to `limit`. Any unreadable file fails the call.
pub fn top_n_by_total_volume<P: AsRef<Path>>(dir: P, limit: usize) -> Result<Vec<(String, f64)>> {
    let mut totals = Vec::new();
    for symbol in list_symbols(&dir)? {
        let series = load_price_series(&symbol, &dir)?;
        totals.push((symbol, series.total_volume()?));
    }

    totals.sort_by(|a, b| a.0.cmp(&b.0));
    totals.truncate(limit);
    Ok(totals)
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    // Bare dates land at midnight
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = parse_timestamp("2023-01-05").expect("bare date");
        assert_eq!(midnight.format("%H:%M:%S").to_string(), "00:00:00");

        let spaced = parse_timestamp("2023-01-05 09:30:00").expect("spaced datetime");
        let tee = parse_timestamp("2023-01-05T09:30:00").expect("T-separated datetime");
        assert_eq!(spaced, tee);

        assert!(parse_timestamp("05/01/2023").is_err());
    }
}
