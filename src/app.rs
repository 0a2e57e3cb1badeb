//! 기준 표와 계산 기록을 소유하는 계산 세션.
//!
//! CLI 와 GUI 는 이 세션만 통해 추정·기록·초기화를 수행한다.

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::steam::if97::{self, ReferenceCheck};
use crate::steam::{
    estimate, Estimate, EstimateError, History, HistoryStats, Medium, Query, ReferenceTable,
    TableError,
};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 기준 표 오류
    #[error("기준 표 오류: {0}")]
    Table(#[from] TableError),
    /// 비엔탈피 추정 오류
    #[error("추정 오류: {0}")]
    Estimate(#[from] EstimateError),
}

/// 한 번의 계산 결과(추정값 + 호출자 진단 정보).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    pub query: Query,
    pub estimate: Estimate,
    /// 요청 압력 대신 가장 가까운 압력 단계를 사용했는지
    pub nearest_pressure_notice: bool,
    /// 증기 표일 때 IF97 비교값
    pub reference: Option<ReferenceCheck>,
}

/// 기준 표 + 계산 기록.
#[derive(Debug, Clone)]
pub struct Calculator {
    table: ReferenceTable,
    history: History,
}

impl Calculator {
    pub fn new(table: ReferenceTable, max_data_points: usize) -> Self {
        Self {
            table,
            history: History::new(max_data_points),
        }
    }

    /// 설정에 지정된 표(없으면 내장 증기표)로 세션을 만든다.
    pub fn from_config(cfg: &Config) -> Result<Self, AppError> {
        let table = match &cfg.table_path {
            Some(path) => ReferenceTable::load(path)?,
            None => ReferenceTable::steam(),
        };
        Ok(Self::new(table, cfg.max_data_points))
    }

    /// 추정하고, 성공한 경우에만 기록에 추가한다.
    pub fn calculate(
        &mut self,
        temperature: f64,
        pressure: f64,
    ) -> Result<Calculation, EstimateError> {
        let query = Query {
            temperature,
            pressure,
        };
        let estimate = estimate(&self.table, temperature, pressure).map_err(|err| {
            tracing::warn!(temperature, pressure, error = %err, "추정 실패");
            err
        })?;
        let reference = match self.table.medium() {
            Medium::Steam => if97::check(estimate.enthalpy, pressure, temperature),
            Medium::Air => None,
        };
        let entry = self.history.record(query, estimate);
        tracing::info!(
            sequence = entry.sequence,
            temperature,
            pressure,
            pressure_used = estimate.pressure_used,
            enthalpy = estimate.enthalpy,
            "계산 기록"
        );
        Ok(Calculation {
            query,
            estimate,
            nearest_pressure_notice: estimate.used_nearest(pressure),
            reference,
        })
    }

    /// 기록을 모두 지운다. 이미 비어 있으면 아무 일도 하지 않는다.
    pub fn reset_all(&mut self) {
        if !self.history.is_empty() {
            tracing::debug!(cleared = self.history.len(), "기록 초기화");
        }
        self.history.reset();
    }

    pub fn stats(&self) -> HistoryStats {
        self.history.stats()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }
}
