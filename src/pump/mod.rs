//! 펌프 카탈로그와 기종 선정 모듈 모음.

pub mod catalog;
pub mod selection;

pub use catalog::*;
pub use selection::*;
