//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 이메일 정규화, ObjectId 파싱, 선택 문자열 정리
//! - [`time_utils`] - BSON/chrono 시각 변환

pub mod string_utils;
pub mod time_utils;
