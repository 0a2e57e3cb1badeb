use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::steam::DEFAULT_MAX_DATA_POINTS;
use crate::units::{PressureUnit, SpecificEnthalpyUnit, TemperatureUnit};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력/출력 기본 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
    pub specific_enthalpy: SpecificEnthalpyUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            pressure: PressureUnit::KgPerCm2,
            specific_enthalpy: SpecificEnthalpyUnit::KjPerKg,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en)
    pub language: String,
    /// 기록 이동 창 크기
    pub max_data_points: usize,
    /// tracing 필터(RUST_LOG 가 없을 때 사용)
    pub log_filter: String,
    /// 내장 증기표 대신 사용할 TOML 표 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,
    pub units: DefaultUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            max_data_points: DEFAULT_MAX_DATA_POINTS,
            log_filter: "info".to_string(),
            table_path: None,
            units: DefaultUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    Config::load_or_create(DEFAULT_CONFIG_PATH)
}

impl Config {
    /// 지정 경로의 설정을 읽는다.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// 설정 파일이 있으면 읽고, 없으면 기본값을 저장한 뒤 반환한다.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            let cfg = Config::default();
            cfg.save_to(path)?;
            tracing::info!(path = %path.display(), "기본 설정 파일 생성");
            Ok(cfg)
        }
    }

    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(DEFAULT_CONFIG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("max_data_points = 20\n").expect("parse");
        assert_eq!(cfg.max_data_points, 20);
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.units, DefaultUnits::default());
        assert!(cfg.table_path.is_none());
    }

    #[test]
    fn units_section_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.units.pressure = PressureUnit::BarA;
        cfg.table_path = Some(PathBuf::from("data/air.toml"));
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn malformed_file_is_reported_and_left_untouched() {
        let dir = std::env::temp_dir().join(format!("steam-enthalpy-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("config.toml");
        let original = "max_data_points = \"many\"\ntable_path = \"data/air.toml\"\n";
        fs::write(&path, original).expect("write");
        assert!(matches!(
            Config::load_or_create(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(fs::read_to_string(&path).expect("read"), original);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_or_create_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("steam-enthalpy-cfg-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("tmp dir");
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);
        let cfg = Config::load_or_create(&path).expect("create");
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).expect("reload"), cfg);
        let _ = fs::remove_dir_all(&dir);
    }
}
