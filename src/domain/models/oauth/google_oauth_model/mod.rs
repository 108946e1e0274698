//! Google OAuth 2.0 모델

pub mod google_user;

pub use google_user::{GoogleTokenResponse, GoogleUserInfo};
