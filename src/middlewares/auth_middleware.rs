//! JWT 인증 미들웨어
//!
//! `Authorization: Bearer <access token>`을 검증하고 [`AuthenticatedUser`]를
//! request extensions에 넣습니다. 핸들러는 `AuthenticatedUser` extractor로 꺼내 씁니다.
//! 토큰이 없거나 유효하지 않으면 핸들러까지 가지 않고 401을 돌려줍니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::TokenService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// `None`이면 요청 시점에 전역 `TokenService`를 사용
    token_service: Option<Arc<TokenService>>,
}

impl AuthMiddleware {
    /// 유효한 토큰이 없으면 401
    pub fn required() -> Self {
        Self { token_service: None }
    }

    /// 지정한 토큰 서비스로 검증하는 필수 인증
    pub fn with_token_service(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service: Some(token_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            token_service: self.token_service.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{json, Value};

    use crate::config::JwtSettings;
    use crate::domain::entities::users::{User, UserRole};
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::domain::models::token::UserClaims;
    use crate::testing::InMemoryUserStore;

    fn settings(secret: &str, access_ttl: chrono::Duration) -> JwtSettings {
        JwtSettings {
            secret: secret.to_string(),
            access_ttl,
            refresh_ttl: chrono::Duration::days(7),
        }
    }

    fn token_service(secret: &str, access_ttl: chrono::Duration) -> Arc<TokenService> {
        Arc::new(TokenService::new(
            Arc::new(InMemoryUserStore::default()),
            settings(secret, access_ttl),
        ))
    }

    fn claims() -> UserClaims {
        let mut user = User::new_verified_email("alice@x.com");
        user.id = Some(ObjectId::new());
        user.role = UserRole::Viewer;
        UserClaims::from_user(&user).unwrap()
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(json!({ "userId": user.user_id, "role": user.role }))
    }

    async fn call(tokens: Arc<TokenService>, authorization: Option<String>) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new().service(
                web::scope("/private")
                    .wrap(AuthMiddleware::with_token_service(tokens))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/private/whoami");
        if let Some(value) = authorization {
            req = req.insert_header(("Authorization", value));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler_with_user() {
        let tokens = token_service("test-secret", chrono::Duration::minutes(15));
        let claims = claims();
        let pair = tokens.issue(&claims).unwrap();

        let (status, body) = call(tokens, Some(format!("Bearer {}", pair.access_token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], claims.sub);
        assert_eq!(body["role"], "viewer");
    }

    #[actix_web::test]
    async fn test_missing_header_is_unauthorized() {
        let tokens = token_service("test-secret", chrono::Duration::minutes(15));

        let (status, body) = call(tokens, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Missing or malformed authorization header");
    }

    #[actix_web::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let tokens = token_service("test-secret", chrono::Duration::minutes(15));

        let (status, body) = call(tokens, Some("Basic YWxpY2U6c2VjcmV0".to_string())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[actix_web::test]
    async fn test_expired_token_is_unauthorized() {
        let tokens = token_service("test-secret", chrono::Duration::minutes(15));
        let expired = token_service("test-secret", chrono::Duration::seconds(-60))
            .issue(&claims())
            .unwrap();

        let (status, body) = call(tokens, Some(format!("Bearer {}", expired.access_token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid or expired token");
    }

    #[actix_web::test]
    async fn test_token_from_other_secret_is_unauthorized() {
        let tokens = token_service("test-secret", chrono::Duration::minutes(15));
        let forged = token_service("other-secret", chrono::Duration::minutes(15))
            .issue(&claims())
            .unwrap();

        let (status, _) = call(tokens, Some(format!("Bearer {}", forged.access_token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
