mod common;
use common::daily_series;

use price_projection::{
    DataShortfall, ProjectionError,
    pipeline::{SimulationParams, project, project_parallel},
};
use rand::{SeedableRng, rngs::StdRng};

fn params(horizon_steps: usize, path_count: usize) -> SimulationParams {
    SimulationParams {
        horizon_steps,
        path_count,
        ..Default::default()
    }
}

#[test]
fn flat_history_projects_flat_paths() {
    // unchanged closes -> zero returns -> zero volatility
    let prices = daily_series("VIC.VN", &[100.0, 100.0, 100.0, 100.0]);
    let report = project(&prices, &params(30, 10), &mut StdRng::seed_from_u64(1)).unwrap();

    assert_eq!(report.volatility.value(), 0.0);
    assert_eq!(report.ensemble.shape(), (30, 10));
    for path in report.ensemble.paths() {
        assert!(path.iter().all(|&p| p == 100.0));
        assert_eq!(path.len(), 30);
    }
    assert_eq!(report.risk.percentile_price, 100.0);
    assert_eq!(report.risk.value_at_risk, 0.0);
    assert_eq!(report.histogram.total(), 10);
}

#[test]
fn report_is_consistent_with_its_parts() {
    let prices = daily_series("FPT.VN", &[100.0, 110.0, 99.0, 108.0, 104.0, 107.5]);
    let report = project(&prices, &params(60, 500), &mut StdRng::seed_from_u64(2024)).unwrap();

    assert_eq!(report.symbol, "FPT.VN");
    assert_eq!(report.last_observed_price, 107.5);
    assert_eq!(report.return_count, 5);
    assert_eq!(report.terminal_prices, report.ensemble.terminal_prices());
    assert_eq!(report.terminal_prices.len(), 500);
    assert_eq!(
        report.risk.value_at_risk,
        report.risk.last_observed_price - report.risk.percentile_price
    );
    assert_eq!(report.histogram.bins(), 50);
    assert_eq!(report.histogram.total(), 500);
    assert_eq!(report.risk.confidence_level(), 95.0);
}

#[test]
fn seeded_runs_are_bit_identical() {
    let prices = daily_series("MWG.VN", &[50.0, 51.0, 49.5, 52.0, 53.1]);
    let p = params(90, 200);

    let a = project(&prices, &p, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = project(&prices, &p, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);

    let c = project_parallel(&prices, &p, 7).unwrap();
    let d = project_parallel(&prices, &p, 7).unwrap();
    assert_eq!(c, d);
}

#[test]
fn single_close_is_insufficient() {
    let prices = daily_series("SSI.VN", &[23.4]);
    let err = project(&prices, &params(30, 200), &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert_eq!(
        err,
        ProjectionError::InsufficientData {
            symbol: "SSI.VN".into(),
            cause: DataShortfall::TooFewPoints { found: 1, required: 2 },
        }
    );
}

#[test]
fn bad_parameters_fail_before_estimation() {
    // an empty series would otherwise be InsufficientData
    let prices = daily_series("SSI.VN", &[]);
    let err = project(&prices, &params(0, 200), &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::InvalidParameter { name: "horizon_steps", .. }
    ));

    let bad = SimulationParams {
        percentile: 101.0,
        ..Default::default()
    };
    let err = project_parallel(&prices, &bad, 1).unwrap_err();
    assert!(matches!(
        err,
        ProjectionError::InvalidParameter { name: "percentile", .. }
    ));
}

#[test]
fn report_serializes_for_renderers() {
    let prices = daily_series("HPG.VN", &[25.0, 25.5, 25.2]);
    let report = project(&prices, &params(3, 2), &mut StdRng::seed_from_u64(5)).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["symbol"], "HPG.VN");
    assert_eq!(json["ensemble"]["horizon_steps"], 3);
    assert_eq!(json["ensemble"]["paths"].as_array().unwrap().len(), 2);
    assert_eq!(json["histogram"]["edges"].as_array().unwrap().len(), 51);
    assert!(json["risk"]["value_at_risk"].is_number());
}
