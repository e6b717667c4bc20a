//! Caller identity extracted from gateway headers.
//!
//! The gateway authenticates the request and forwards the subject as
//! `x-user-id` and its role as `x-user-role`. No id means an anonymous
//! caller; an id without a role is a customer.

use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderValue};
use axum::http::request::Parts;

use estore_domain::access::{AccessContext, Role};
use estore_domain::error::ValidationError;
use estore_domain::id::UserId;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor wrapping the [`AccessContext`] of the current request.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub AccessContext);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        context_from_headers(&parts.headers).map(Self)
    }
}

fn header<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<Option<&'h str>, ApiError> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map(str::trim)
                .map_err(|_| ApiError::from(unreadable(name, value)))
        })
        .transpose()
}

fn unreadable(name: &'static str, value: &HeaderValue) -> ValidationError {
    if name == USER_ROLE_HEADER {
        ValidationError::InvalidRole(String::from_utf8_lossy(value.as_bytes()).into_owned())
    } else {
        ValidationError::InvalidId(name)
    }
}

fn context_from_headers(headers: &HeaderMap) -> Result<AccessContext, ApiError> {
    let Some(raw_id) = header(headers, USER_ID_HEADER)? else {
        return Ok(AccessContext::anonymous());
    };
    let user_id = UserId::from_str(raw_id).map_err(|_| ValidationError::InvalidId(USER_ID_HEADER))?;
    let role = match header(headers, USER_ROLE_HEADER)? {
        Some(raw) => Role::from_str(raw).map_err(|err| ValidationError::InvalidRole(err.0))?,
        None => Role::Customer,
    };
    Ok(AccessContext::user(user_id, role))
}
