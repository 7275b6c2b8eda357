//! Text and JSON renderings of projection, chart and portfolio results.

use std::fmt;

use serde::Serialize;

use crate::{chart::ChartData, portfolio::PortfolioTrend, service::ProjectionOutcome};

/// Human-readable projection summary, one fact per line.
pub struct ProjectionText<'a>(pub &'a ProjectionOutcome);

impl fmt::Display for ProjectionText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let report = &outcome.report;
        let risk = &report.risk;
        let currency = currency_suffix(outcome.currency.as_deref());

        writeln!(f, "Ticker: {}", report.symbol)?;
        writeln!(f, "Last close: {}", report.as_of.format("%Y-%m-%d"))?;
        writeln!(
            f,
            "Simulated {} paths over {} days (daily volatility {:.4}, seed {})",
            report.params.path_count,
            report.params.horizon_steps,
            report.volatility.value(),
            outcome.seed
        )?;
        writeln!(f, "Current stock price is: {:.2}{currency}", risk.last_observed_price)?;
        writeln!(
            f,
            "{} Percentile of the Future Price: {:.2}{currency}",
            ordinal(risk.percentile),
            risk.percentile_price
        )?;
        writeln!(
            f,
            "VaR at {}% confidence interval is: {:.2}{currency}",
            trim_float(risk.confidence_level()),
            risk.value_at_risk
        )
    }
}

/// Bars and overlays as a fixed-width table.
pub struct ChartText<'a>(pub &'a ChartData);

impl fmt::Display for ChartText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chart = self.0;
        writeln!(
            f,
            "{} ({} bars){}",
            chart.symbol,
            chart.interval,
            currency_suffix(chart.currency.as_deref())
        )?;
        writeln!(
            f,
            "{:<16} {:>12} {:>12} {:>12} {:>12} {:>14} {:>12} {:>10} {:>10} {:>10}",
            "time", "open", "high", "low", "close", "volume", "sma50", "macd", "signal", "hist"
        )?;
        for row in &chart.rows {
            writeln!(
                f,
                "{:<16} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>14.0} {:>12} {:>10.2} {:>10.2} {:>10.2}",
                row.timestamp.format("%Y-%m-%d %H:%M"),
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume,
                optional(row.sma50),
                row.macd,
                row.signal,
                row.hist
            )?;
        }
        Ok(())
    }
}

/// Date-aligned closes as comma-separated values.
pub struct PortfolioText<'a>(pub &'a PortfolioTrend);

impl fmt::Display for PortfolioText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trend = self.0;
        write!(f, "date")?;
        for ticker in &trend.tickers {
            write!(f, ",{ticker}")?;
        }
        writeln!(f)?;
        for row in &trend.rows {
            write!(f, "{}", row.date)?;
            for close in &row.closes {
                match close {
                    Some(c) => write!(f, ",{c}")?,
                    None => write!(f, ",")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Text projection report.
pub fn render_text(outcome: &ProjectionOutcome) -> String {
    ProjectionText(outcome).to_string()
}

/// Text chart table.
pub fn render_chart_text(chart: &ChartData) -> String {
    ChartText(chart).to_string()
}

/// Portfolio trend as CSV.
pub fn render_portfolio_text(trend: &PortfolioTrend) -> String {
    PortfolioText(trend).to_string()
}

/// Pretty-printed JSON of any result; projection output includes the full
/// ensemble and histogram.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn currency_suffix(currency: Option<&str>) -> String {
    currency.map(|c| format!(" {c}")).unwrap_or_default()
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

/// `5.0` -> `5th`, `2.5` -> `2.5th`, `1.0` -> `1st`.
fn ordinal(value: f64) -> String {
    if value.fract() != 0.0 {
        return format!("{}th", trim_float(value));
    }
    let n = value as u64;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use price_projection::{
        models::price_series::{PricePoint, PriceSeries},
        pipeline::{SimulationParams, project},
    };
    use rand::{SeedableRng, rngs::StdRng};

    fn flat_outcome(currency: Option<&str>) -> ProjectionOutcome {
        let points = (1..=3)
            .map(|d| PricePoint {
                timestamp: Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap(),
                close: 25_000.0,
            })
            .collect();
        let series = PriceSeries::new("HPG.VN", points).unwrap();
        let params = SimulationParams {
            horizon_steps: 5,
            path_count: 10,
            ..SimulationParams::default()
        };
        let report = project(&series, &params, &mut StdRng::seed_from_u64(1)).unwrap();
        ProjectionOutcome {
            report,
            seed: 1,
            currency: currency.map(str::to_string),
        }
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1.0), "1st");
        assert_eq!(ordinal(2.0), "2nd");
        assert_eq!(ordinal(3.0), "3rd");
        assert_eq!(ordinal(5.0), "5th");
        assert_eq!(ordinal(11.0), "11th");
        assert_eq!(ordinal(22.0), "22nd");
        assert_eq!(ordinal(2.5), "2.5th");
    }

    #[test]
    fn text_report_lines() {
        let text = render_text(&flat_outcome(Some("VND")));
        assert!(text.contains("Current stock price is: 25000.00 VND"));
        assert!(text.contains("5th Percentile of the Future Price: 25000.00 VND"));
        assert!(text.contains("VaR at 95% confidence interval is: 0.00 VND"));
    }

    #[test]
    fn text_report_without_currency() {
        let text = render_text(&flat_outcome(None));
        assert!(text.contains("VaR at 95% confidence interval is: 0.00\n"));
    }

    #[test]
    fn chart_table_marks_missing_sma() {
        use crate::chart::{ChartData, ChartRow};
        use market_data_ingestor::models::timeframe::TimeFrame;

        let chart = ChartData {
            symbol: "FPT.VN".into(),
            interval: TimeFrame::day(),
            currency: Some("VND".into()),
            rows: vec![ChartRow {
                timestamp: Utc.with_ymd_and_hms(2025, 6, 2, 2, 0, 0).unwrap(),
                open: 120.0,
                high: 122.5,
                low: 119.0,
                close: 121.0,
                volume: 1_500_000.0,
                sma50: None,
                macd: 0.0,
                signal: 0.0,
                hist: 0.0,
            }],
        };
        let text = render_chart_text(&chart);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "FPT.VN (1 day bars) VND");
        assert!(lines[1].starts_with("time"));
        assert!(lines[2].starts_with("2025-06-02 02:00"));
        assert!(lines[2].contains("121.00"));
        assert!(lines[2].contains(" - "));
    }

    #[test]
    fn portfolio_csv_leaves_gaps_empty() {
        use crate::portfolio::{PortfolioTrend, TrendRow};
        use chrono::NaiveDate;

        let trend = PortfolioTrend {
            tickers: vec!["HPG.VN".into(), "FPT.VN".into()],
            skipped: vec![],
            rows: vec![
                TrendRow {
                    date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
                    closes: vec![Some(26.5), Some(121.0)],
                },
                TrendRow {
                    date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
                    closes: vec![None, Some(122.0)],
                },
            ],
        };
        assert_eq!(
            render_portfolio_text(&trend),
            "date,HPG.VN,FPT.VN\n2025-06-02,26.5,121\n2025-06-03,,122\n"
        );
    }

    #[test]
    fn json_report_carries_seed_and_ensemble() {
        let json = render_json(&flat_outcome(Some("VND"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 1);
        assert_eq!(value["symbol"], "HPG.VN");
        assert_eq!(value["terminal_prices"].as_array().unwrap().len(), 10);
        assert!(value["ensemble"].is_object());
        assert!(value["histogram"]["counts"].is_array());
    }
}
