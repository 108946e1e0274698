use serde::Deserialize;
use validator::Validate;

use crate::core::errors::AppResult;
use crate::domain::entities::users::{HrType, ProfileUpdate, UserRole};
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /auth/complete-profile`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileRequest {
    #[validate(length(min = 2, max = 100, message = "이름은 2자 이상 100자 이하여야 합니다"))]
    pub name: String,
    pub role: Option<UserRole>,
    pub hr_type: Option<HrType>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub agency_name: Option<String>,
    pub company_names: Option<Vec<String>>,
}

impl CompleteProfileRequest {
    /// HR 역할 규칙까지 검사한 갱신 값으로 변환합니다.
    pub fn into_update(self) -> AppResult<ProfileUpdate> {
        ProfileUpdate::new(
            &self.name,
            self.role,
            self.hr_type,
            self.company_name,
            self.agency_name,
            self.company_names,
        )
    }
}
