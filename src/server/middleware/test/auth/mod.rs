use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
};
use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

mod require;

const ADMIN_TOKEN: &str = "s3cret-admin-token";

fn headers_with(authorization: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
    headers
}
