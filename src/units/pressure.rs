use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 압력 단위. 내부 기준은 bar(게이지)이며, 표 단위는 kgf/cm²G 이다.
/// 절대압 단위(barA, atm)는 대기압을 보정해 게이지로 환산한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum PressureUnit {
    #[value(name = "kgcm2", alias = "kgf")]
    KgPerCm2,
    #[value(name = "bar")]
    Bar,
    #[value(name = "bara")]
    BarA,
    #[value(name = "kpa")]
    KiloPascal,
    #[value(name = "mpa")]
    MegaPascal,
    #[value(name = "psi")]
    Psi,
    #[value(name = "atm")]
    Atm,
}

const ATM_BAR: f64 = 1.01325;
const BAR_PER_KGF_CM2: f64 = 0.980665;

impl PressureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::KgPerCm2 => "kgf/cm²G",
            PressureUnit::Bar => "bar(g)",
            PressureUnit::BarA => "bar(a)",
            PressureUnit::KiloPascal => "kPa(g)",
            PressureUnit::MegaPascal => "MPa(g)",
            PressureUnit::Psi => "psig",
            PressureUnit::Atm => "atm",
        }
    }
}

/// 주어진 압력을 bar(게이지)로 변환한다.
pub fn to_bar(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::KgPerCm2 => value * BAR_PER_KGF_CM2,
        PressureUnit::Bar => value,
        PressureUnit::BarA => value - ATM_BAR,
        PressureUnit::KiloPascal => value / 100.0,
        PressureUnit::MegaPascal => value * 10.0,
        PressureUnit::Psi => value * 0.0689476,
        // atm 은 절대압으로 간주
        PressureUnit::Atm => value * ATM_BAR - ATM_BAR,
    }
}

/// bar(게이지) 값을 원하는 단위로 변환한다.
pub fn from_bar(value_bar: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::KgPerCm2 => value_bar / BAR_PER_KGF_CM2,
        PressureUnit::Bar => value_bar,
        PressureUnit::BarA => value_bar + ATM_BAR,
        PressureUnit::KiloPascal => value_bar * 100.0,
        PressureUnit::MegaPascal => value_bar / 10.0,
        PressureUnit::Psi => value_bar / 0.0689476,
        PressureUnit::Atm => (value_bar + ATM_BAR) / ATM_BAR,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    if from == to {
        return value;
    }
    from_bar(to_bar(value, from), to)
}

/// 압력을 bar(abs)로 변환한다. IF97 계산 입력용.
pub fn pressure_to_bar_abs(value: f64, unit: PressureUnit) -> f64 {
    to_bar(value, unit) + ATM_BAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kgf_per_cm2_gauge_to_bar_abs() {
        let bar_abs = pressure_to_bar_abs(10.0, PressureUnit::KgPerCm2);
        assert!((bar_abs - 10.81990).abs() < 1e-5);
    }

    #[test]
    fn absolute_atmosphere_is_zero_gauge() {
        let kg = convert_pressure(1.0, PressureUnit::Atm, PressureUnit::KgPerCm2);
        assert!(kg.abs() < 1e-12);
        let bara = convert_pressure(0.0, PressureUnit::KgPerCm2, PressureUnit::BarA);
        assert!((bara - ATM_BAR).abs() < 1e-12);
    }

    #[test]
    fn same_unit_conversion_is_identity() {
        for v in [19.75, 0.1, 123.456] {
            assert_eq!(
                convert_pressure(v, PressureUnit::KgPerCm2, PressureUnit::KgPerCm2),
                v
            );
            assert_eq!(convert_pressure(v, PressureUnit::Psi, PressureUnit::Psi), v);
        }
    }

    #[test]
    fn one_megapascal_gauge_in_kgf() {
        let kg = convert_pressure(1.0, PressureUnit::MegaPascal, PressureUnit::KgPerCm2);
        assert!((kg - 10.19716).abs() < 1e-4);
    }
}
