//! 증기(또는 공기) 비엔탈피를 기준 표에서 찾거나 보간해 추정하는 라이브러리.
//! CLI 와 GUI 는 같은 계산 세션(`app::Calculator`)을 공유한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod logging;
pub mod steam;
pub mod ui_cli;
pub mod units;
