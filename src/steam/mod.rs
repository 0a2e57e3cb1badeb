//! 증기(및 공기) 비엔탈피 추정 모듈 모음.

pub mod estimator;
pub mod history;
pub mod if97;
pub mod reference_table;

pub use estimator::*;
pub use history::*;
pub use reference_table::*;
