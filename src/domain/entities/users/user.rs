//! User Entity Implementation
//!
//! 세 가지 로그인 경로(비밀번호, OTP, Google)가 공유하는 사용자 모델입니다.
//!
//! # 불변 조건
//! - 이메일은 소문자/trim 정규화된 값으로 저장되며 전체 사용자 사이에서 유일합니다.
//! - `password_hash`는 `provider == Email`인 계정에만 존재합니다.
//! - HR 세부 필드(`company_name`, `agency_name`, `company_names`)는 서로 배타적이며
//!   [`User::set_hr_details`]를 통해서만 함께 변경됩니다.
//! - `is_profile_complete`는 캐시된 파생 값이며 [`User::refresh_profile_completion`]으로만 갱신됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::{AuthProvider, PlanType};
use crate::domain::entities::users::profile::is_profile_complete;
use crate::utils::string_utils::normalize_email;

/// 사용자 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Hr,
    Viewer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Hr => "hr",
            UserRole::Viewer => "viewer",
        }
    }
}

/// HR 사용자 세부 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HrType {
    Company,
    Agency,
    Freelance,
}

/// HR 세부 유형과 그에 대응하는 단 하나의 필드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HrDetails {
    Company { company_name: String },
    Agency { agency_name: String },
    Freelance { company_names: Vec<String> },
}

impl HrDetails {
    pub fn hr_type(&self) -> HrType {
        match self {
            HrDetails::Company { .. } => HrType::Company,
            HrDetails::Agency { .. } => HrType::Agency,
            HrDetails::Freelance { .. } => HrType::Freelance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    /// 표시 이름 (프로필 완성 전에는 비어 있을 수 있음)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub role: UserRole,

    pub provider: AuthProvider,

    /// 외부 제공자(Google) 사용자 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_type: Option<HrType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub company_names: Vec<String>,

    #[serde(default)]
    pub plan_type: PlanType,

    #[serde(default)]
    pub is_email_verified: bool,

    #[serde(default)]
    pub is_profile_complete: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,

    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    fn blank(email: &str, provider: AuthProvider) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            email: normalize_email(email),
            password_hash: None,
            name: String::new(),
            role: UserRole::default(),
            provider,
            provider_id: None,
            avatar: None,
            hr_type: None,
            company_name: None,
            agency_name: None,
            company_names: Vec::new(),
            plan_type: PlanType::default(),
            is_email_verified: false,
            is_profile_complete: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 비밀번호 로그인에서 처음 본 이메일로 만드는 최소 계정
    pub fn new_with_password(email: &str, password_hash: String) -> Self {
        Self {
            password_hash: Some(password_hash),
            ..Self::blank(email, AuthProvider::Email)
        }
    }

    /// OTP 로그인으로 만드는 계정. 검증된 OTP는 메일함 소유를 증명합니다.
    pub fn new_verified_email(email: &str) -> Self {
        Self {
            is_email_verified: true,
            ..Self::blank(email, AuthProvider::Email)
        }
    }

    /// Google 로그인으로 만드는 계정
    pub fn new_google(email: &str, provider_id: String, name: Option<String>, avatar: Option<String>) -> Self {
        Self {
            provider_id: Some(provider_id),
            name: name.map(|n| n.trim().to_string()).unwrap_or_default(),
            avatar,
            is_email_verified: true,
            ..Self::blank(email, AuthProvider::Google)
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.provider == AuthProvider::Email && self.password_hash.is_some()
    }

    /// HR 세부 유형을 한 번에 교체합니다.
    ///
    /// 선택한 유형의 필드만 채우고 나머지 두 필드는 비웁니다.
    /// `None`이면 유형과 세 필드를 모두 비웁니다.
    pub fn set_hr_details(&mut self, details: Option<HrDetails>) {
        self.hr_type = details.as_ref().map(HrDetails::hr_type);
        self.company_name = None;
        self.agency_name = None;
        self.company_names = Vec::new();

        match details {
            Some(HrDetails::Company { company_name }) => self.company_name = Some(company_name),
            Some(HrDetails::Agency { agency_name }) => self.agency_name = Some(agency_name),
            Some(HrDetails::Freelance { company_names }) => self.company_names = company_names,
            None => {}
        }
    }

    /// 프로필 완성 여부를 현재 필드로부터 다시 계산합니다.
    pub fn refresh_profile_completion(&mut self) {
        self.is_profile_complete = is_profile_complete(self);
    }

    pub fn touch_login(&mut self) {
        let now = DateTime::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }
}
