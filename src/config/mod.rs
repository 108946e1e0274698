//! 애플리케이션 설정
//!
//! 모든 설정은 환경 변수에서 읽습니다. `main`에서 `PROFILE`에 따라
//! `.env.dev` / `.env.prod`를 먼저 로드합니다.
//!
//! - [`auth_config`]: JWT, Google OAuth, OTP 정책
//! - [`data_config`]: 실행 환경, 서버, bcrypt, 메일, 요청 제한
//! - [`plan_config`]: 요금제별 Gmail 계정 한도

pub mod data_config;
pub mod auth_config;
pub mod plan_config;

pub use data_config::*;
pub use auth_config::*;
pub use plan_config::*;
