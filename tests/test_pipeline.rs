use approx::assert_relative_eq;
use market_toolkit::analysis::regression::linear_regression;
use market_toolkit::analysis::returns::{percent_change, ColumnSelection, PercentChange, ReturnsError};
use market_toolkit::analysis::risk::sharpe_ratio;
use market_toolkit::analysis::stats::{mode, Mode};
use market_toolkit::data::loader::load_price_series;
use market_toolkit::plot::Figure;

const PRICES_DIR: &str = "tests/data/prices";

#[test]
fn test_close_returns_from_loaded_series() {
    let series = load_price_series("AAPL", PRICES_DIR).expect("Failed to load AAPL");
    let selection = ColumnSelection::Named("close".to_string());

    let PercentChange::Column(returns) =
        percent_change(&series, &selection).expect("returns failed")
    else {
        panic!("named selection must yield a column");
    };

    assert_eq!(returns.len(), series.len() - 1);
    assert_relative_eq!(returns[0], 0.10, epsilon = 1e-12);
    assert_relative_eq!(returns[1], -0.10, epsilon = 1e-12);
}

#[test]
fn test_all_columns_returns_table() {
    let series = load_price_series("AAPL", PRICES_DIR).expect("Failed to load AAPL");

    let PercentChange::Table(table) =
        percent_change(&series, &ColumnSelection::All).expect("returns failed")
    else {
        panic!("all selection must yield a table");
    };

    assert_eq!(table.len(), series.len() - 1);
    assert_eq!(table.column_names(), series.column_names());
    assert_eq!(table.index(), &series.index()[1..]);

    let close = table.column("close").expect("close column");
    assert_relative_eq!(close[0], 0.10, epsilon = 1e-12);
}

#[test]
fn test_unknown_column_is_rejected() {
    let series = load_price_series("AAPL", PRICES_DIR).expect("Failed to load AAPL");
    let selection = ColumnSelection::Named("vwap".to_string());

    let result = percent_change(&series, &selection);
    assert!(matches!(result, Err(ReturnsError::MissingColumn(name)) if name == "vwap"));
}

#[test]
fn test_sharpe_on_loaded_returns() {
    let series = load_price_series("MSFT", PRICES_DIR).expect("Failed to load MSFT");
    let selection = ColumnSelection::Named("close".to_string());

    let PercentChange::Column(returns) =
        percent_change(&series, &selection).expect("returns failed")
    else {
        panic!("named selection must yield a column");
    };

    let sharpe = sharpe_ratio(&returns, 0.0);
    assert!(sharpe.is_finite());
}

#[test]
fn test_modal_volume() {
    let series = load_price_series("MSFT", PRICES_DIR).expect("Failed to load MSFT");
    let volumes: Vec<i64> = series
        .column("volume")
        .expect("volume column")
        .iter()
        .map(|&v| v as i64)
        .collect();

    // Every MSFT fixture row trades 50 shares
    assert_eq!(mode(&volumes), Mode::Values(vec![50]));
}

#[test]
fn test_regression_renders_figure() {
    let series = load_price_series("AAPL", PRICES_DIR).expect("Failed to load AAPL");
    let open = series.column("open").expect("open column");
    let close = series.column("close").expect("close column");

    let mut figure = Figure::new();
    let summary = linear_regression(open, close, &mut figure).expect("fit failed");
    assert_eq!(summary.n_obs, 3);
    assert_eq!(figure.layer_count(), 2);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("fit.svg");
    figure
        .render_svg(&path, 640, 480)
        .expect("render failed");
    assert!(path.exists());

    let text = format!("{}", summary);
    assert!(text.contains("OLS Regression Results"));
    assert!(text.contains("R-squared"));
}
