use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::models::oauth::OAuthCredential;
use crate::utils::string_utils::deserialize_optional_string;

/// `POST /gmail-accounts/connect`
///
/// 클라이언트는 Google 액세스 토큰(`token`) 또는 인가 코드(`code`) 중 하나를 보냅니다.
/// 둘 다 오면 인가 코드를 우선합니다. refresh token은 코드 교환에서만 받을 수 있습니다.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_credential_present"))]
pub struct ConnectGmailRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

fn validate_credential_present(request: &ConnectGmailRequest) -> Result<(), ValidationError> {
    if request.credential().is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("credential_required")
            .with_message("Google token or authorization code is required".into()))
    }
}

impl ConnectGmailRequest {
    pub fn credential(&self) -> Option<OAuthCredential> {
        self.code
            .clone()
            .map(OAuthCredential::AuthorizationCode)
            .or_else(|| self.token.clone().map(OAuthCredential::AccessToken))
    }
}
