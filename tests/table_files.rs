//! TOML 기준 표 로딩과 설정 기반 세션 구성.
use std::path::PathBuf;

use steam_enthalpy_toolbox::app::Calculator;
use steam_enthalpy_toolbox::config::Config;
use steam_enthalpy_toolbox::steam::{estimate, Medium, Method, ReferenceTable, TableError};

fn air_table_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/air.toml")
}

#[test]
fn bundled_air_table_loads() {
    let table = ReferenceTable::load(air_table_path()).expect("air table");
    assert_eq!(table.medium(), Medium::Air);
    assert_eq!(table.levels().collect::<Vec<_>>(), vec![0.0]);
    let est = estimate(&table, 126.85, 0.0).expect("in range");
    assert_eq!(est.method, Method::Exact);
    assert_eq!(est.enthalpy, 400.98);
}

#[test]
fn air_table_ignores_requested_pressure() {
    let table = ReferenceTable::load(air_table_path()).expect("air table");
    let est = estimate(&table, 100.0, 7.0).expect("in range");
    assert_eq!(est.pressure_used, 0.0);
    assert!(est.used_nearest(7.0));
    assert!(est.enthalpy > 350.49 && est.enthalpy < 400.98);
}

#[test]
fn session_from_config_uses_table_path() {
    let cfg = Config {
        table_path: Some(air_table_path()),
        max_data_points: 3,
        ..Config::default()
    };
    let mut calc = Calculator::from_config(&cfg).expect("session");
    let result = calc.calculate(200.0, 0.0).expect("ok");
    // 공기 표는 IF97 비교 대상이 아니다.
    assert!(result.reference.is_none());
    assert_eq!(calc.history().max_points(), 3);
}

#[test]
fn missing_table_file_is_an_io_error() {
    let err = ReferenceTable::load("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = ReferenceTable::from_toml_str("name = 3").unwrap_err();
    assert!(matches!(err, TableError::Parse(_)));
}
