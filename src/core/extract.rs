//! Estrattori che rispondono con il corpo JSON di `AppError` invece del testo
//! semplice delle rejection di axum

use crate::core::AppError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum_macros::{FromRequest, FromRequestParts};
use tracing::warn;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        // 400 sintassi, 415 content-type, 422 campi errati
        AppError::new(rejection.status(), "Invalid request body").with_details(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!("Rejected path parameters: {}", rejection.body_text());
        AppError::new(rejection.status(), "Invalid path parameters")
            .with_details(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        AppError::bad_request("Invalid query parameters").with_details(rejection.body_text())
    }
}
