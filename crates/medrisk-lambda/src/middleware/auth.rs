use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use medrisk_core::models::user::UserContext;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Identity middleware.
///
/// Token verification happens in the upstream authorizer, which forwards the
/// verified identity as headers. A request without a user id is rejected;
/// otherwise the `UserContext` is inserted into request extensions for
/// handlers to use.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user = user_from_headers(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing user identity".to_string()))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

pub fn user_from_headers(headers: &HeaderMap) -> Option<UserContext> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    };

    let id = header(USER_ID_HEADER);
    if id.is_empty() {
        return None;
    }
    Some(UserContext {
        id,
        name: header(USER_NAME_HEADER),
        email: header(USER_EMAIL_HEADER),
    })
}
