use serde::Deserialize;
use validator::Validate;

/// 토큰 갱신 요청 DTO
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}
