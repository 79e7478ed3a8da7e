//! 전동기 진단용 계산 모듈 모음.

pub mod insulation;
pub mod voltage_unbalance;

pub use insulation::*;
pub use voltage_unbalance::*;
