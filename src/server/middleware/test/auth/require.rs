use super::*;

/// Tests access with the configured token.
///
/// Expected: Ok(())
#[test]
fn accepts_matching_bearer_token() {
    let headers = headers_with(&format!("Bearer {}", ADMIN_TOKEN));

    let result = AuthGuard::new(ADMIN_TOKEN, &headers).require();

    assert!(result.is_ok());
}

/// Tests access without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_missing_header() {
    let headers = HeaderMap::new();

    let result = AuthGuard::new(ADMIN_TOKEN, &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests access with a non-bearer scheme.
///
/// Expected: Err(AuthError::MissingToken)
#[test]
fn rejects_other_schemes() {
    let headers = headers_with(&format!("Basic {}", ADMIN_TOKEN));

    let result = AuthGuard::new(ADMIN_TOKEN, &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
}

/// Tests access with the wrong token.
///
/// Expected: Err(AuthError::InvalidToken)
#[test]
fn rejects_wrong_token() {
    let headers = headers_with("Bearer not-the-token");

    let result = AuthGuard::new(ADMIN_TOKEN, &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));
}

/// Tests access with a token that only shares a prefix.
///
/// Expected: Err(AuthError::InvalidToken)
#[test]
fn rejects_token_prefix() {
    let headers = headers_with(&format!("Bearer {}", &ADMIN_TOKEN[..6]));

    let result = AuthGuard::new(ADMIN_TOKEN, &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));
}
