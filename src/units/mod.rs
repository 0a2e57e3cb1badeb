//! 입력/출력 단위 변환. 기준 표는 kgf/cm²G, °C, kJ/kg 단위이다.

pub mod pressure;
pub mod specific_enthalpy;
pub mod temperature;

pub use pressure::{convert_pressure, pressure_to_bar_abs, PressureUnit};
pub use specific_enthalpy::{convert_specific_enthalpy, SpecificEnthalpyUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
