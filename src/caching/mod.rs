//! 캐시 및 키-값 저장소
//!
//! - [`store`]: OTP 상태와 요청 카운터가 사용하는 `KeyValueStore` trait
//! - [`redis`]: Redis 기반 구현과 리포지토리 캐시 헬퍼

pub mod redis;
pub mod store;

pub use store::KeyValueStore;
