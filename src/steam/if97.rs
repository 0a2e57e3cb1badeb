//! IAPWS-IF97 비엔탈피 계산을 seuif97 크레이트로 위임한 래퍼.
//! 표 기반 추정값과 비교하는 진단용이며 추정 자체에는 쓰이지 않는다.

use seuif97::{pt, OH};

use crate::units::{pressure_to_bar_abs, PressureUnit};

// IF97 적용 범위: 0~800 °C 는 100 MPa 이하, 800~2000 °C 는 50 MPa 이하.
const MAX_P_MPA: f64 = 100.0;
const MAX_P_MPA_HIGH_T: f64 = 50.0;
const MAX_T_C: f64 = 800.0;
const MAX_T_C_HIGH: f64 = 2000.0;

/// (p[MPa abs], T[°C]) 가 IF97 적용 범위 안인지 판정한다.
fn in_if97_domain(p_mpa: f64, temperature_c: f64) -> bool {
    if !(p_mpa > 0.0 && temperature_c >= 0.0) {
        return false;
    }
    if temperature_c <= MAX_T_C {
        p_mpa <= MAX_P_MPA
    } else {
        temperature_c <= MAX_T_C_HIGH && p_mpa <= MAX_P_MPA_HIGH_T
    }
}

/// 압력(kgf/cm²G)·온도(°C)에서 IF97 비엔탈피(kJ/kg)를 계산한다.
/// 적용 범위 밖이거나 seuif97 가 오류 값(음수 코드)을 돌려주면 None.
pub fn enthalpy_kj_per_kg(pressure_kg_cm2_g: f64, temperature_c: f64) -> Option<f64> {
    let p_mpa = pressure_to_bar_abs(pressure_kg_cm2_g, PressureUnit::KgPerCm2) / 10.0;
    if !in_if97_domain(p_mpa, temperature_c) {
        return None;
    }
    let h = pt(p_mpa, temperature_c, OH);
    if h.is_finite() && h > 0.0 {
        Some(h)
    } else {
        tracing::debug!(p_mpa, temperature_c, h, "IF97 계산 실패");
        None
    }
}

/// 표 추정값과 IF97 값의 비교 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCheck {
    /// IF97 비엔탈피(kJ/kg)
    pub if97_enthalpy: f64,
    /// 추정값 - IF97 (kJ/kg)
    pub deviation: f64,
}

impl ReferenceCheck {
    /// 편차를 IF97 값 대비 백분율로 반환한다.
    pub fn deviation_percent(&self) -> f64 {
        self.deviation / self.if97_enthalpy * 100.0
    }
}

/// 추정값을 IF97 값과 비교한다.
pub fn check(estimated: f64, pressure_kg_cm2_g: f64, temperature_c: f64) -> Option<ReferenceCheck> {
    let if97_enthalpy = enthalpy_kj_per_kg(pressure_kg_cm2_g, temperature_c)?;
    Some(ReferenceCheck {
        if97_enthalpy,
        deviation: estimated - if97_enthalpy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_boundaries() {
        assert!(in_if97_domain(100.0, 800.0));
        assert!(!in_if97_domain(100.1, 600.0));
        assert!(in_if97_domain(50.0, 2000.0));
        assert!(!in_if97_domain(60.0, 900.0));
        assert!(!in_if97_domain(1.0, 2000.1));
        assert!(!in_if97_domain(1.0, -5.0));
        assert!(!in_if97_domain(0.0, 300.0));
        assert!(!in_if97_domain(f64::NAN, 300.0));
    }
}
