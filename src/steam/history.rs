//! 최근 추정값의 이동 창(rolling window)과 통계.

use std::collections::VecDeque;

use super::estimator::{Estimate, Query};

/// 기본 보관 개수.
pub const DEFAULT_MAX_DATA_POINTS: usize = 50;

/// 기록 한 건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryEntry {
    /// 1부터 시작하는 기록 순번. 오래된 항목이 밀려나도 계속 증가한다.
    pub sequence: u64,
    pub query: Query,
    pub estimate: Estimate,
}

/// 기록 통계.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryStats {
    pub count: usize,
    /// 비엔탈피 산술 평균. 기록이 없으면 None.
    pub average: Option<f64>,
}

/// 최대 개수를 넘으면 가장 오래된 항목부터 버리는 기록 열.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_points: usize,
    next_sequence: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DATA_POINTS)
    }
}

impl History {
    /// 최대 보관 개수를 지정해 만든다. 0은 1로 취급한다.
    pub fn new(max_points: usize) -> Self {
        let max_points = max_points.max(1);
        Self {
            entries: VecDeque::with_capacity(max_points),
            max_points,
            next_sequence: 1,
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// 추정 결과를 기록하고, 창을 넘치면 가장 오래된 항목을 제거한다.
    pub fn record(&mut self, query: Query, estimate: Estimate) -> &HistoryEntry {
        self.entries.push_back(HistoryEntry {
            sequence: self.next_sequence,
            query,
            estimate,
        });
        self.next_sequence += 1;
        while self.entries.len() > self.max_points {
            self.entries.pop_front();
        }
        &self.entries[self.entries.len() - 1]
    }

    /// 모든 기록을 지운다. 순번도 1부터 다시 시작한다.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.next_sequence = 1;
    }

    pub fn stats(&self) -> HistoryStats {
        let count = self.entries.len();
        let average = if count == 0 {
            None
        } else {
            let sum: f64 = self.entries.iter().map(|e| e.estimate.enthalpy).sum();
            Some(sum / count as f64)
        };
        HistoryStats { count, average }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 기록 순서대로 순회한다.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// 현재 기록의 복사본.
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.iter().copied().collect()
    }

    /// 차트용 `[순번, 비엔탈피]` 점 목록.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.entries
            .iter()
            .map(|e| [e.sequence as f64, e.estimate.enthalpy])
            .collect()
    }
}
