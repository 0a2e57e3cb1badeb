//! 기준 표 위에서 비엔탈피를 추정한다.
//!
//! 요청 압력에 가장 가까운 압력 단계를 고른 뒤, 그 곡선에서 온도로 정확히
//! 일치하는 샘플을 찾거나 인접 두 샘플 사이를 선형 보간한다. 상태가 없는 순수
//! 함수이며 표 범위 밖으로 외삽하지 않는다.

use thiserror::Error;

use super::reference_table::{Curve, ReferenceTable};

/// 추정 입력(온도 °C, 게이지 압력 kgf/cm²G).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub temperature: f64,
    pub pressure: f64,
}

/// 보간에 사용된 인접 샘플 쌍.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub t1: f64,
    pub t2: f64,
    pub h1: f64,
    pub h2: f64,
}

/// 추정 방식.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// 표의 샘플과 온도가 정확히 일치
    Exact,
    /// 인접 샘플 사이 선형 보간
    Interpolated(Bracket),
}

impl Method {
    pub fn bracket(&self) -> Option<&Bracket> {
        match self {
            Method::Exact => None,
            Method::Interpolated(b) => Some(b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Exact => "exact",
            Method::Interpolated(_) => "interpolated",
        }
    }
}

/// 한 번의 추정 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// 비엔탈피(kJ/kg)
    pub enthalpy: f64,
    /// 실제 사용한 압력 단계
    pub pressure_used: f64,
    pub method: Method,
}

impl Estimate {
    /// 요청 압력과 다른 압력 단계를 사용했는지 여부.
    pub fn used_nearest(&self, requested_pressure: f64) -> bool {
        self.pressure_used != requested_pressure
    }
}

/// 추정 시 발생 가능한 오류. 모두 호출 단위로 복구 가능하다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// 선택된 곡선의 온도 범위 밖
    #[error(
        "온도 {temperature}°C 는 {pressure_level} kgf/cm²G 곡선의 범위({min}~{max}°C) 밖입니다"
    )]
    OutOfRange {
        temperature: f64,
        pressure_level: f64,
        min: f64,
        max: f64,
    },
    /// NaN/무한대/음수 입력
    #[error("잘못된 입력: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// 요청 압력과의 절대 차이가 가장 작은 압력 단계를 고른다.
///
/// 동률이면 먼저 만난(가장 낮은) 단계를 유지한다.
pub fn nearest_level(table: &ReferenceTable, pressure: f64) -> (f64, &Curve) {
    let entries = table.level_entries();
    let mut best = &entries[0];
    let mut best_diff = (best.pressure() - pressure).abs();
    for entry in &entries[1..] {
        let diff = (entry.pressure() - pressure).abs();
        if diff < best_diff {
            best = entry;
            best_diff = diff;
        }
    }
    (best.pressure(), best.curve())
}

/// 온도/압력으로 비엔탈피를 추정한다.
pub fn estimate(
    table: &ReferenceTable,
    temperature: f64,
    pressure: f64,
) -> Result<Estimate, EstimateError> {
    check_input("temperature", temperature)?;
    check_input("pressure", pressure)?;

    let (level, curve) = nearest_level(table, pressure);
    let (min, max) = curve.range();
    if temperature < min || temperature > max {
        return Err(EstimateError::OutOfRange {
            temperature,
            pressure_level: level,
            min,
            max,
        });
    }

    let (enthalpy, method) = interpolate(curve, temperature);
    tracing::debug!(
        temperature,
        pressure,
        pressure_used = level,
        enthalpy,
        method = method.as_str(),
        "비엔탈피 추정"
    );
    Ok(Estimate {
        enthalpy,
        pressure_used: level,
        method,
    })
}

fn check_input(field: &'static str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::InvalidInput { field, value })
    }
}

// 호출 전에 temperature 가 곡선 범위 안임이 보장되어야 한다.
fn interpolate(curve: &Curve, temperature: f64) -> (f64, Method) {
    let temps = curve.temperatures();
    let hs = curve.enthalpies();
    let mut i = 0;
    while i < temps.len() - 1 && temps[i + 1] <= temperature {
        i += 1;
    }
    if temps[i] == temperature {
        return (hs[i], Method::Exact);
    }
    let bracket = Bracket {
        t1: temps[i],
        t2: temps[i + 1],
        h1: hs[i],
        h2: hs[i + 1],
    };
    // 검증된 곡선은 온도가 엄격히 증가하므로 이 분기에는 도달하지 않는다.
    let enthalpy = if bracket.t1 == bracket.t2 {
        bracket.h1
    } else {
        let ratio = (temperature - bracket.t1) / (bracket.t2 - bracket.t1);
        bracket.h1 + ratio * (bracket.h2 - bracket.h1)
    };
    (enthalpy, Method::Interpolated(bracket))
}
