use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

// struct che codifica il contenuto del token jwt (emesso dal servizio di autenticazione)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i32,
    pub username: String,
}

/// Utente che sta eseguendo la richiesta, ricavato dal token
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub user_id: i32,
    pub username: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.id,
            username: claims.username,
        }
    }
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(
    jwt_token: &str,
    secret: &str,
) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .inspect(|data| debug!("JWT token decoded for user: {}", data.claims.username))
    .inspect_err(|e| warn!("Failed to decode JWT token: {:?}", e))
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden(
                "Please add the JWT token to the header",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();
    let token = match (header.next(), header.next()) {
        (Some(bearer), Some(token)) if bearer.eq_ignore_ascii_case("bearer") => token,
        _ => {
            warn!("Malformed authorization header");
            return Err(AppError::unauthorized("Expected a Bearer token"));
        }
    };

    let token_data = decode_jwt(token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    // l'anagrafica utenti è esterna: ci fidiamo dell'id firmato nel token
    let current_user = CurrentUser::from(token_data.claims);
    debug!("User authenticated: {}", current_user.user_id);
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}
