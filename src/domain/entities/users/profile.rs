//! 프로필 완성도 평가와 프로필 갱신
//!
//! [`is_profile_complete`]는 사용자 스냅샷만 보고 판단하는 순수 함수입니다.
//! 클라이언트가 보낸 완성 여부는 절대 신뢰하지 않으며, 이름/역할/HR 필드가 바뀔 때마다
//! [`User::refresh_profile_completion`]을 통해 다시 계산합니다.

use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::users::user::{HrDetails, HrType, User, UserRole};

fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn has_any_text(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

/// 프로필이 완성되었는지 판단합니다.
///
/// - 이름이 비어 있으면 미완성
/// - `hr` 역할은 `hr_type`이 있고 그 유형에 맞는 필드만 채워져 있어야 완성
///   - company → `company_name`
///   - agency → `agency_name`
///   - freelance → `company_names` (하나 이상)
/// - 그 외 역할은 HR 필드를 보지 않음
pub fn is_profile_complete(user: &User) -> bool {
    if user.name.trim().is_empty() {
        return false;
    }

    if user.role != UserRole::Hr {
        return true;
    }

    let company = has_text(user.company_name.as_deref());
    let agency = has_text(user.agency_name.as_deref());
    let freelance = has_any_text(&user.company_names);

    match user.hr_type {
        Some(HrType::Company) => company && !agency && !freelance,
        Some(HrType::Agency) => agency && !company && !freelance,
        Some(HrType::Freelance) => freelance && !company && !agency,
        None => false,
    }
}

/// 검증된 프로필 갱신 요청
///
/// 생성 시점에 모든 규칙을 검사하므로, 만들어진 값은 그대로 적용해도 안전합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: String,
    role: UserRole,
    hr_details: Option<HrDetails>,
}

impl ProfileUpdate {
    pub const NAME_MIN_CHARS: usize = 2;
    pub const NAME_MAX_CHARS: usize = 100;

    /// 입력을 검증하고 정규화합니다.
    ///
    /// # Errors
    ///
    /// * 이름이 2~100자가 아닐 때
    /// * `hr` 역할인데 `hr_type`이 없거나 유형에 맞는 필드가 비어 있을 때
    pub fn new(
        name: &str,
        role: Option<UserRole>,
        hr_type: Option<HrType>,
        company_name: Option<String>,
        agency_name: Option<String>,
        company_names: Option<Vec<String>>,
    ) -> AppResult<Self> {
        let name = name.trim().to_string();
        let length = name.chars().count();
        if !(Self::NAME_MIN_CHARS..=Self::NAME_MAX_CHARS).contains(&length) {
            return Err(AppError::ValidationError(format!(
                "Name must be between {} and {} characters",
                Self::NAME_MIN_CHARS,
                Self::NAME_MAX_CHARS
            )));
        }

        let role = role.unwrap_or_default();

        let hr_details = match hr_type {
            None if role == UserRole::Hr => {
                return Err(AppError::ValidationError(
                    "HR type is required for HR role".to_string(),
                ));
            }
            None => None,
            Some(HrType::Company) => {
                let company_name = company_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| AppError::ValidationError("Company name is required for company HR".to_string()))?;
                Some(HrDetails::Company { company_name })
            }
            Some(HrType::Agency) => {
                let agency_name = agency_name
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| AppError::ValidationError("Agency name is required for agency HR".to_string()))?;
                Some(HrDetails::Agency { agency_name })
            }
            Some(HrType::Freelance) => {
                let company_names: Vec<String> = company_names
                    .unwrap_or_default()
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect();
                if company_names.is_empty() {
                    return Err(AppError::ValidationError(
                        "At least one company name is required for freelance HR".to_string(),
                    ));
                }
                Some(HrDetails::Freelance { company_names })
            }
        };

        Ok(Self { name, role, hr_details })
    }
}

impl User {
    /// 프로필 갱신을 하나의 변경으로 적용하고 완성도를 다시 계산합니다.
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        self.name = update.name;
        self.role = update.role;
        self.set_hr_details(update.hr_details);
        self.refresh_profile_completion();
        self.updated_at = mongodb::bson::DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hr_company(name: &str, company: Option<&str>) -> User {
        let mut user = User::new_verified_email("hr@x.com");
        user.name = name.to_string();
        user.role = UserRole::Hr;
        user.hr_type = Some(HrType::Company);
        user.company_name = company.map(str::to_string);
        user
    }

    #[test]
    fn test_hr_company_with_name_is_complete() {
        assert!(is_profile_complete(&hr_company("Alice", Some("Acme"))));
    }

    #[test]
    fn test_hr_company_without_company_name_is_incomplete() {
        assert!(!is_profile_complete(&hr_company("Alice", None)));
        assert!(!is_profile_complete(&hr_company("Alice", Some("   "))));
    }

    #[test]
    fn test_viewer_with_name_is_complete_regardless_of_hr_type() {
        let mut user = User::new_verified_email("bob@x.com");
        user.name = "Bob".to_string();
        user.role = UserRole::Viewer;
        assert!(is_profile_complete(&user));

        user.hr_type = Some(HrType::Agency);
        assert!(is_profile_complete(&user));
    }

    #[test]
    fn test_blank_name_is_incomplete() {
        assert!(!is_profile_complete(&hr_company("  ", Some("Acme"))));

        let mut admin = User::new_verified_email("admin@x.com");
        admin.role = UserRole::Admin;
        assert!(!is_profile_complete(&admin));
    }

    #[test]
    fn test_hr_without_hr_type_is_incomplete() {
        let mut user = hr_company("Alice", Some("Acme"));
        user.hr_type = None;
        assert!(!is_profile_complete(&user));
    }

    #[test]
    fn test_mismatched_subtype_field_is_incomplete() {
        let mut user = hr_company("Alice", None);
        user.agency_name = Some("Talent Co".to_string());
        assert!(!is_profile_complete(&user));
    }

    #[test]
    fn test_freelance_requires_non_empty_list() {
        let mut user = hr_company("Alice", None);
        user.hr_type = Some(HrType::Freelance);
        assert!(!is_profile_complete(&user));

        user.company_names = vec!["Acme".to_string()];
        assert!(is_profile_complete(&user));
    }

    #[test]
    fn test_profile_update_rejects_short_name() {
        let result = ProfileUpdate::new("A", Some(UserRole::Viewer), None, None, None, None);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_profile_update_requires_matching_hr_field() {
        let result = ProfileUpdate::new(
            "Alice",
            Some(UserRole::Hr),
            Some(HrType::Agency),
            Some("Acme".to_string()),
            None,
            None,
        );
        assert!(matches!(result, Err(AppError::ValidationError(_))));

        let missing_type = ProfileUpdate::new("Alice", None, None, None, None, None);
        assert!(matches!(missing_type, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_apply_profile_update_switches_subtype_and_recomputes() {
        let mut user = hr_company("Alice", Some("Acme"));
        user.refresh_profile_completion();
        assert!(user.is_profile_complete);

        let update = ProfileUpdate::new(
            "Alice Kim",
            Some(UserRole::Hr),
            Some(HrType::Agency),
            Some("Ignored Corp".to_string()),
            Some("Talent Co".to_string()),
            None,
        )
        .unwrap();
        user.apply_profile_update(update);

        assert_eq!(user.name, "Alice Kim");
        assert_eq!(user.hr_type, Some(HrType::Agency));
        assert!(user.company_name.is_none());
        assert_eq!(user.agency_name.as_deref(), Some("Talent Co"));
        assert!(user.is_profile_complete);
    }
}
