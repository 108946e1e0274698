//! HTTP 핸들러 모듈
//!
//! 요청 DTO를 검증하고 서비스를 호출한 뒤 결과를 [`ApiResponse`]로 감쌉니다.
//! 에러는 `AppError`의 `ResponseError` 구현이 JSON으로 변환합니다.
//!
//! - [`auth`]: 로그인(비밀번호, OTP, Google), 토큰 갱신
//! - [`users`]: 현재 사용자 조회, 프로필 완성
//! - [`gmail`]: Gmail 계정 연결/목록/기본 지정/해제
//!
//! [`ApiResponse`]: crate::domain::dto::ApiResponse

use validator::Validate;

use crate::core::errors::{AppError, AppResult};

pub mod auth;
pub mod users;
pub mod gmail;

/// DTO 검증 실패를 `ValidationError` 하나로 모읍니다.
pub(crate) fn validate_request<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field))
                })
            })
            .collect();
        messages.sort();
        messages.dedup();
        AppError::ValidationError(messages.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::users::request::LoginRequest;

    #[test]
    fn test_validate_request_uses_field_messages() {
        let request = LoginRequest {
            email: "nope".to_string(),
            password: String::new(),
        };

        let err = validate_request(&request).unwrap_err();
        match err {
            AppError::ValidationError(message) => {
                assert!(message.contains("유효한 이메일 주소를 입력해주세요"));
                assert!(message.contains("비밀번호를 입력해주세요"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
