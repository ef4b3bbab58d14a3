use market_toolkit::analysis::regression::linear_regression;
use market_toolkit::analysis::returns::{percent_change, ColumnSelection, PercentChange};
use market_toolkit::analysis::risk::sharpe_ratio;
use market_toolkit::analysis::stats::{mode, Mode};
use market_toolkit::config::Config;
use market_toolkit::data::loader::{list_symbols, load_price_series, top_n_by_total_volume};
use market_toolkit::plot::Figure;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load_or_default("config/toolkit.yaml")?;

    // Get data directory from command line or use the configured default
    let data_dir = env::args().nth(1).unwrap_or_else(|| config.data_dir.clone());

    println!("Loading corpus from: {}", data_dir);
    let symbols = list_symbols(&data_dir)?;
    println!("Found {} symbols", symbols.len());

    println!("\n=== Total traded volume (first {}, by symbol) ===", config.ranking_limit);
    let ranking = top_n_by_total_volume(&data_dir, config.ranking_limit)?;
    for (symbol, total) in &ranking {
        println!("{}: {:.0}", symbol, total);
    }

    // Per-symbol close returns and Sharpe ratios
    println!("\n=== Daily close returns ===");
    let selection = ColumnSelection::Named("close".to_string());
    let mut return_series = Vec::new();
    for (symbol, _) in ranking.iter().take(2) {
        let series = load_price_series(symbol, &data_dir)?;
        // A named selection always yields the column variant
        let PercentChange::Column(returns) = percent_change(&series, &selection)? else {
            continue;
        };
        println!(
            "{}: {} returns, Sharpe {:.4}",
            symbol,
            returns.len(),
            sharpe_ratio(&returns, config.risk_free_rate)
        );

        // Most common daily move, in basis points
        let bps: Vec<i64> = returns.iter().map(|r| (r * 10_000.0).round() as i64).collect();
        match mode(&bps) {
            Mode::Values(values) => println!("  modal move (bps): {:?}", values),
            Mode::NoMode => println!("  no modal move"),
        }

        return_series.push((symbol.clone(), returns));
    }

    // Regress the second symbol's returns on the first's
    if let [(x_symbol, x_returns), (y_symbol, y_returns)] = &return_series[..] {
        let n = x_returns.len().min(y_returns.len());
        println!("\n=== OLS: {} returns vs {} returns ===", y_symbol, x_symbol);

        let mut figure = Figure::new();
        let summary = linear_regression(&x_returns[..n], &y_returns[..n], &mut figure)?;
        println!("{}", summary);

        figure.render_svg(&config.plot.output, config.plot.width, config.plot.height)?;
        println!("Wrote {}", config.plot.output);
    }

    Ok(())
}
