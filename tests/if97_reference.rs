//! IF97 비교값 회귀 테스트. seuif97 결과를 1 MPa 증기표 값과 비교한다.
use steam_enthalpy_toolbox::steam::if97::{check, enthalpy_kj_per_kg};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.3} got {actual:.3} (diff {diff:.3}, tol {rel_tol})"
    );
}

#[test]
fn superheated_steam_near_one_megapascal() {
    // 9.1638 kgf/cm²G ≈ 1 MPa(abs). 증기표: 300 °C 에서 약 3051 kJ/kg.
    let h = enthalpy_kj_per_kg(9.1638, 300.0).expect("IF97");
    assert_close("h(1MPa,300C)", h, 3051.6, 2e-3);
}

#[test]
fn deviation_sign_follows_estimate() {
    let c = check(3100.0, 9.1638, 300.0).expect("IF97");
    assert!(c.deviation > 0.0);
    assert_close("deviation", c.deviation, 3100.0 - c.if97_enthalpy, 1e-12);
}

#[test]
fn vacuum_pressure_has_no_reference() {
    // -1.1 kgf/cm²G 는 절대압이 음수가 된다.
    assert!(enthalpy_kj_per_kg(-1.1, 200.0).is_none());
}

#[test]
fn pressure_beyond_if97_domain_has_no_reference() {
    // 3000 kgf/cm²G ≈ 294 MPa 로 IF97 상한(100 MPa)을 넘는다.
    assert!(enthalpy_kj_per_kg(3000.0, 600.0).is_none());
    assert!(enthalpy_kj_per_kg(1500.0, 600.0).is_none());
    assert!(enthalpy_kj_per_kg(1e6, 600.0).is_none());
    assert!(check(3633.7, 3000.0, 600.0).is_none());
}

#[test]
fn reference_values_are_physical_inside_domain() {
    for p in [0.0, 10.0, 90.0, 500.0] {
        let h = enthalpy_kj_per_kg(p, 600.0).expect("inside IF97 domain");
        assert!(h > 0.0, "h({p}, 600) = {h}");
    }
}
