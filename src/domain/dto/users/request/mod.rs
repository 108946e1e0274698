pub mod auth_request;
pub mod profile_request;

pub use auth_request::{GoogleLoginRequest, GoogleUrlQuery, LoginRequest, SendOtpRequest, VerifyOtpRequest};
pub use profile_request::CompleteProfileRequest;
