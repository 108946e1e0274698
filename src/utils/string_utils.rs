//! # 문자열 유틸리티
//!
//! 요청 값 정리와 식별자 파싱에 쓰는 공통 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::core::errors::AppError;

/// 이메일 정규화 (trim + 소문자)
///
/// 저장, 조회, OTP 키 생성 모두 이 값을 기준으로 합니다.
///
/// ```rust,ignore
/// assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 경로/클레임의 ID 문자열을 `ObjectId`로 변환합니다.
///
/// # Errors
///
/// 24자리 hex가 아니면 `ValidationError`
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("Invalid {}", field_name)))
}

/// 빈 문자열이나 공백만 있는 값은 `None`, 나머지는 trim해서 `Some`
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// `#[serde(default, deserialize_with = "deserialize_optional_string")]`와 함께 씁니다.
///
/// ```rust,ignore
/// // {"companyName": "  Acme  "} → Some("Acme")
/// // {"companyName": ""}         → None
/// // {"companyName": null}       → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
