use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 비엔탈피 단위. 내부 기준은 kJ/kg이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SpecificEnthalpyUnit {
    #[value(name = "kj")]
    KjPerKg,
    #[value(name = "kcal")]
    KcalPerKg,
    #[value(name = "btu")]
    BtuPerPound,
}

impl SpecificEnthalpyUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SpecificEnthalpyUnit::KjPerKg => "kJ/kg",
            SpecificEnthalpyUnit::KcalPerKg => "kcal/kg",
            SpecificEnthalpyUnit::BtuPerPound => "Btu/lb",
        }
    }

    fn kj_per_unit(&self) -> f64 {
        match self {
            SpecificEnthalpyUnit::KjPerKg => 1.0,
            SpecificEnthalpyUnit::KcalPerKg => 4.1868,
            SpecificEnthalpyUnit::BtuPerPound => 2.326,
        }
    }
}

/// 비엔탈피를 변환한다.
pub fn convert_specific_enthalpy(
    value: f64,
    from: SpecificEnthalpyUnit,
    to: SpecificEnthalpyUnit,
) -> f64 {
    value * from.kj_per_unit() / to.kj_per_unit()
}
