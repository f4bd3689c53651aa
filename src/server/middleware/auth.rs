use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::server::error::{auth::AuthError, AppError};

/// Checks the admin bearer token on a request.
///
/// Every admin endpoint calls `require` before touching state. The token is configured
/// once through `ADMIN_API_TOKEN`; there are no per-user sessions.
pub struct AuthGuard<'a> {
    admin_token: &'a str,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(admin_token: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            admin_token,
            headers,
        }
    }

    /// # Returns
    /// - `Ok(())` - Request carries `Authorization: Bearer <admin token>`
    /// - `Err(AuthError::MissingToken)` - No bearer token on the request
    /// - `Err(AuthError::InvalidToken)` - Token does not match
    pub fn require(&self) -> Result<(), AppError> {
        let Some(token) = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
        else {
            return Err(AuthError::MissingToken.into());
        };

        if !constant_time_eq(token.as_bytes(), self.admin_token.as_bytes()) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
