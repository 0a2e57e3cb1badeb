//! 기록 이동 창과 초기화 동작.
use steam_enthalpy_toolbox::app::Calculator;
use steam_enthalpy_toolbox::steam::{ReferenceTable, DEFAULT_MAX_DATA_POINTS};

#[test]
fn keeps_most_recent_points_in_order() {
    let mut calc = Calculator::new(ReferenceTable::steam(), DEFAULT_MAX_DATA_POINTS);
    let total = DEFAULT_MAX_DATA_POINTS + 5;
    for i in 0..total {
        calc.calculate(200.0 + i as f64, 10.0).expect("in range");
    }
    let history = calc.history();
    assert_eq!(history.len(), DEFAULT_MAX_DATA_POINTS);
    let temps: Vec<f64> = history.entries().map(|e| e.query.temperature).collect();
    let expected: Vec<f64> = (5..total).map(|i| 200.0 + i as f64).collect();
    assert_eq!(temps, expected);
    let first = history.entries().next().expect("entry");
    assert_eq!(first.sequence, 6);
}

#[test]
fn stats_follow_the_window() {
    let mut calc = Calculator::new(ReferenceTable::steam(), 2);
    calc.calculate(200.0, 10.0).expect("ok");
    calc.calculate(250.0, 10.0).expect("ok");
    calc.calculate(600.0, 10.0).expect("ok");
    let stats = calc.stats();
    assert_eq!(stats.count, 2);
    let avg = stats.average.expect("average");
    assert!((avg - (2957.2 + 3723.4) / 2.0).abs() < 1e-9);
}

#[test]
fn chart_points_use_sequence_and_enthalpy() {
    let mut calc = Calculator::new(ReferenceTable::steam(), 10);
    calc.calculate(200.0, 10.0).expect("ok");
    calc.calculate(225.0, 10.0).expect("ok");
    let points = calc.history().points();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0], [1.0, 2827.4]);
    assert_eq!(points[1][0], 2.0);
    assert!((points[1][1] - 2892.3).abs() < 1e-9);
}

#[test]
fn reset_twice_is_a_no_op() {
    let mut calc = Calculator::new(ReferenceTable::steam(), 10);
    calc.calculate(300.0, 20.0).expect("ok");
    calc.reset_all();
    let after_first = calc.history().snapshot();
    calc.reset_all();
    assert_eq!(calc.history().snapshot(), after_first);
    assert_eq!(calc.stats().count, 0);
    assert!(calc.stats().average.is_none());
}
