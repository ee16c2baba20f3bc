// Admin session gate
//
// Every admin-surface handler takes AdminSession as its first extractor, so
// an unauthenticated request is rejected with 401 before the handler body or
// any data access runs. Session issuance happens outside this service; only
// the single recognized marker value is accepted here.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::ApiError;

/// Cookie carrying the admin session marker
pub const ADMIN_COOKIE: &str = "admin_auth";

/// The single recognized authenticated state
pub const ADMIN_COOKIE_VALUE: &str = "authenticated";

/// Proof that the request carries a valid admin session
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match jar.get(ADMIN_COOKIE) {
            Some(cookie) if cookie.value() == ADMIN_COOKIE_VALUE => Ok(AdminSession),
            _ => Err(ApiError::Unauthorized),
        }
    }
}
