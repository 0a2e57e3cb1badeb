//! 압력 단계별 온도-비엔탈피 기준 곡선 표.
//!
//! 표는 생성 시 한 번만 검증되며 이후에는 읽기 전용이다. 압력 단위는 게이지
//! 압력(kgf/cm²G), 온도는 °C, 비엔탈피는 kJ/kg 이다.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 표가 다루는 매질.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    Steam,
    Air,
}

/// 표 생성/로드 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum TableError {
    /// 압력 단계가 하나도 없음
    #[error("압력 단계가 하나 이상 필요합니다")]
    NoLevels,
    /// 곡선에 샘플이 없음
    #[error("{level} 압력 단계의 곡선이 비어 있습니다")]
    EmptyCurve { level: f64 },
    /// 온도/엔탈피 배열 길이 불일치
    #[error("{level} 압력 단계: 온도 {temperatures}개, 엔탈피 {enthalpies}개로 길이가 다릅니다")]
    LengthMismatch {
        level: f64,
        temperatures: usize,
        enthalpies: usize,
    },
    /// 온도가 엄격히 증가하지 않음
    #[error("{level} 압력 단계: {index}번째 온도 {value}가 이전 값 이하입니다")]
    NotIncreasing { level: f64, index: usize, value: f64 },
    /// 유한하지 않은 값(NaN/무한대)
    #[error("{level} 압력 단계에 유한하지 않은 값이 있습니다")]
    NonFinite { level: f64 },
    /// 같은 압력 단계가 두 번 선언됨
    #[error("{level} 압력 단계가 중복 선언되었습니다")]
    DuplicateLevel { level: f64 },
    /// 파일 입출력 오류
    #[error("표 파일을 읽을 수 없습니다: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 파싱 오류
    #[error("표 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 하나의 압력 단계에 대응하는 (온도, 비엔탈피) 샘플 열.
///
/// `Curve::new` 로만 만들 수 있으므로 모든 곡선은 비어 있지 않고 온도가 엄격히
/// 증가한다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    // 온도(°C), 엄격히 증가
    temperatures: Vec<f64>,
    // 비엔탈피(kJ/kg), temperatures 와 인덱스 정렬
    enthalpies: Vec<f64>,
}

impl Curve {
    /// 곡선을 만들고 형태를 검증한다.
    pub fn new(
        level: f64,
        temperatures: Vec<f64>,
        enthalpies: Vec<f64>,
    ) -> Result<Self, TableError> {
        let curve = Self {
            temperatures,
            enthalpies,
        };
        curve.validate(level)?;
        Ok(curve)
    }

    fn validate(&self, level: f64) -> Result<(), TableError> {
        if self.temperatures.len() != self.enthalpies.len() {
            return Err(TableError::LengthMismatch {
                level,
                temperatures: self.temperatures.len(),
                enthalpies: self.enthalpies.len(),
            });
        }
        if self.temperatures.is_empty() {
            return Err(TableError::EmptyCurve { level });
        }
        let all_finite = self
            .temperatures
            .iter()
            .chain(self.enthalpies.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(TableError::NonFinite { level });
        }
        for (index, pair) in self.temperatures.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TableError::NotIncreasing {
                    level,
                    index: index + 1,
                    value: pair[1],
                });
            }
        }
        Ok(())
    }

    /// 온도 샘플(°C), 오름차순.
    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    /// 비엔탈피 샘플(kJ/kg).
    pub fn enthalpies(&self) -> &[f64] {
        &self.enthalpies
    }

    /// 샘플 개수.
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    /// 유효 온도 범위 `(Tmin, Tmax)`.
    ///
    /// 검증된 곡선은 비어 있지 않으므로 인덱싱이 안전하다.
    pub fn range(&self) -> (f64, f64) {
        (self.temperatures[0], self.temperatures[self.len() - 1])
    }
}

/// 압력 단계 하나와 그 곡선.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureLevel {
    pressure: f64,
    curve: Curve,
}

impl PressureLevel {
    pub fn new(pressure: f64, curve: Curve) -> Self {
        Self { pressure, curve }
    }

    /// 게이지 압력(kgf/cm²G).
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

/// 검증된 불변 기준 표.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    name: String,
    medium: Medium,
    // 압력 오름차순
    levels: Vec<PressureLevel>,
}

impl ReferenceTable {
    /// 압력 단계 목록으로 표를 만든다. 단계는 압력 오름차순으로 정렬된다.
    pub fn new(
        name: impl Into<String>,
        medium: Medium,
        mut levels: Vec<PressureLevel>,
    ) -> Result<Self, TableError> {
        if levels.is_empty() {
            return Err(TableError::NoLevels);
        }
        for level in &levels {
            if !level.pressure.is_finite() {
                return Err(TableError::NonFinite {
                    level: level.pressure,
                });
            }
        }
        levels.sort_by(|a, b| a.pressure.total_cmp(&b.pressure));
        if let Some(pair) = levels.windows(2).find(|w| w[0].pressure == w[1].pressure) {
            return Err(TableError::DuplicateLevel {
                level: pair[0].pressure,
            });
        }
        Ok(Self {
            name: name.into(),
            medium,
            levels,
        })
    }

    /// 내장 과열 증기 표(10/20/30/50/90 kgf/cm²G).
    pub fn steam() -> Self {
        // STEAM_LEVELS 는 오름차순·단조 증가로 작성되어 있다(단위 테스트로 검증).
        Self {
            name: "steam".to_string(),
            medium: Medium::Steam,
            levels: steam_levels(),
        }
    }

    /// TOML 문자열에서 표를 읽는다.
    pub fn from_toml_str(src: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(src)?;
        let levels = file
            .level
            .into_iter()
            .map(|l| {
                let curve = Curve::new(l.pressure, l.temperatures, l.enthalpies)?;
                Ok(PressureLevel::new(l.pressure, curve))
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Self::new(file.name, file.medium, levels)
    }

    /// TOML 파일에서 표를 읽는다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let content = fs::read_to_string(path.as_ref())?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            levels = table.levels.len(),
            "기준 표 로드"
        );
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn medium(&self) -> Medium {
        self.medium
    }

    /// 사용 가능한 압력 단계(오름차순).
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().map(|l| l.pressure)
    }

    /// 지정한 압력 단계의 곡선. 정확히 일치하는 단계가 없으면 None.
    pub fn curve(&self, level: f64) -> Option<&Curve> {
        self.levels
            .iter()
            .find(|l| l.pressure == level)
            .map(|l| &l.curve)
    }

    /// `(압력 단계, 곡선)` 쌍을 오름차순으로 순회한다.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Curve)> + '_ {
        self.levels.iter().map(|l| (l.pressure, &l.curve))
    }

    pub(crate) fn level_entries(&self) -> &[PressureLevel] {
        &self.levels
    }
}

#[derive(Debug, Deserialize)]
struct TableFile {
    name: String,
    medium: Medium,
    level: Vec<LevelFile>,
}

#[derive(Debug, Deserialize)]
struct LevelFile {
    pressure: f64,
    temperatures: Vec<f64>,
    enthalpies: Vec<f64>,
}

type LevelRow = (f64, &'static [f64], &'static [f64]);

// 상수 표는 검증 없이 그대로 옮긴다. 유효성은 단위 테스트가 보장한다.
fn steam_levels() -> Vec<PressureLevel> {
    STEAM_LEVELS
        .iter()
        .map(|(pressure, temperatures, enthalpies)| PressureLevel {
            pressure: *pressure,
            curve: Curve {
                temperatures: temperatures.to_vec(),
                enthalpies: enthalpies.to_vec(),
            },
        })
        .collect()
}

// 과열 증기 근사 표. 압력은 kgf/cm²G, 각 곡선은 포화 온도 위에서 시작한다.
const STEAM_LEVELS: [LevelRow; 5] = [
    (
        10.0,
        &[200.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0, 600.0],
        &[
            2827.4, 2957.2, 3061.5, 3165.8, 3269.4, 3376.1, 3490.2, 3605.9, 3723.4,
        ],
    ),
    (
        20.0,
        &[250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0, 600.0],
        &[2903.2, 3024.2, 3137.7, 3248.4, 3357.5, 3467.3, 3577.8, 3690.7],
    ),
    (
        30.0,
        &[250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 550.0, 600.0],
        &[2856.5, 2994.3, 3116.1, 3231.7, 3344.0, 3456.2, 3568.4, 3682.8],
    ),
    (
        50.0,
        &[300.0, 350.0, 400.0, 450.0, 500.0, 550.0, 600.0],
        &[2925.7, 3069.3, 3196.7, 3317.2, 3434.7, 3550.3, 3666.9],
    ),
    (
        90.0,
        &[350.0, 400.0, 450.0, 500.0, 550.0, 600.0],
        &[2957.3, 3118.8, 3258.0, 3387.4, 3512.0, 3633.7],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_steam_levels_pass_validation() {
        let levels = STEAM_LEVELS
            .iter()
            .map(|(p, ts, hs)| {
                let curve = Curve::new(*p, ts.to_vec(), hs.to_vec()).expect("builtin curve");
                PressureLevel::new(*p, curve)
            })
            .collect();
        let validated = ReferenceTable::new("steam", Medium::Steam, levels)
            .expect("builtin table must validate");
        assert_eq!(validated, ReferenceTable::steam());
    }

    #[test]
    fn builtin_steam_table_levels_are_ascending() {
        let table = ReferenceTable::steam();
        let levels: Vec<f64> = table.levels().collect();
        assert_eq!(levels, vec![10.0, 20.0, 30.0, 50.0, 90.0]);
        assert_eq!(table.medium(), Medium::Steam);
    }

    #[test]
    fn ten_kg_curve_spans_200_to_600() {
        let table = ReferenceTable::steam();
        let curve = table.curve(10.0).expect("10 kgf/cm2G curve");
        assert_eq!(curve.range(), (200.0, 600.0));
        assert_eq!(curve.enthalpies()[0], 2827.4);
        assert_eq!(curve.enthalpies()[1], 2957.2);
        assert_eq!(curve.enthalpies()[curve.len() - 1], 3723.4);
    }

    #[test]
    fn rejects_non_increasing_temperatures() {
        let err = Curve::new(5.0, vec![100.0, 150.0, 150.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            TableError::NotIncreasing { index: 2, value, .. } if value == 150.0
        ));
    }

    #[test]
    fn rejects_length_mismatch_and_empty_curve() {
        assert!(matches!(
            Curve::new(5.0, vec![100.0, 150.0], vec![1.0]),
            Err(TableError::LengthMismatch { .. })
        ));
        assert!(matches!(
            Curve::new(5.0, vec![], vec![]),
            Err(TableError::EmptyCurve { .. })
        ));
    }

    #[test]
    fn rejects_empty_and_duplicate_levels() {
        assert!(matches!(
            ReferenceTable::new("t", Medium::Steam, vec![]),
            Err(TableError::NoLevels)
        ));
        let level = |p: f64| {
            PressureLevel::new(p, Curve::new(p, vec![100.0], vec![2700.0]).expect("curve"))
        };
        assert!(matches!(
            ReferenceTable::new("t", Medium::Steam, vec![level(3.0), level(3.0)]),
            Err(TableError::DuplicateLevel { .. })
        ));
    }

    #[test]
    fn curve_accessors_expose_validated_samples() {
        let curve = Curve::new(7.0, vec![100.0, 150.0], vec![2676.0, 2776.4]).expect("curve");
        assert_eq!(curve.temperatures(), &[100.0, 150.0]);
        assert_eq!(curve.enthalpies(), &[2676.0, 2776.4]);
        assert_eq!(curve.range(), (100.0, 150.0));
        let level = PressureLevel::new(7.0, curve.clone());
        assert_eq!(level.pressure(), 7.0);
        assert_eq!(level.curve(), &curve);
    }

    #[test]
    fn rejects_nan_samples() {
        assert!(matches!(
            Curve::new(1.0, vec![100.0, f64::NAN], vec![1.0, 2.0]),
            Err(TableError::NonFinite { .. })
        ));
    }

    #[test]
    fn sorts_levels_declared_out_of_order() {
        let src = r#"
name = "custom"
medium = "steam"

[[level]]
pressure = 20.0
temperatures = [250.0, 300.0]
enthalpies = [2900.0, 3020.0]

[[level]]
pressure = 10.0
temperatures = [200.0, 250.0]
enthalpies = [2827.4, 2957.2]
"#;
        let table = ReferenceTable::from_toml_str(src).expect("parse");
        assert_eq!(table.levels().collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(table.name(), "custom");
    }

    #[test]
    fn toml_loading_runs_validation() {
        let src = r#"
name = "bad"
medium = "air"

[[level]]
pressure = 0.0
temperatures = [300.0, 200.0]
enthalpies = [1.0, 2.0]
"#;
        assert!(matches!(
            ReferenceTable::from_toml_str(src),
            Err(TableError::NotIncreasing { .. })
        ));
    }
}
