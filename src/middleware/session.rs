use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::clients::AUTH_COOKIE_HEADER;
use crate::error::AppError;

/// Cookie set by the storefront admin session
pub const AUTH_COOKIE_NAME: &str = "VtexIdclientAutCookie";

/// Caller's opaque session token, forwarded untouched to upstream services
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_request_parts(req: &HttpRequest) -> Option<String> {
        let from_header = req
            .headers()
            .get(AUTH_COOKIE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        from_header
            .or_else(|| req.cookie(AUTH_COOKIE_NAME).map(|c| c.value().to_string()))
            .filter(|token| !token.is_empty())
    }
}

impl FromRequest for SessionToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = Self::from_request_parts(req)
            .map(SessionToken)
            .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()));

        ready(result)
    }
}
