use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{AccessTokenRequest, RefreshRequest, TokenResponse},
    jwt::JwtKeys,
    password::verify_password,
};
use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/access-token", post(issue_tokens))
        .route("/auth/refresh-token", post(refresh_tokens))
}

fn token_pair(keys: &JwtKeys, user_id: i64) -> ApiResult<TokenResponse> {
    let access_token = keys.sign_access(user_id)?;
    let refresh_token = keys.sign_refresh(user_id)?;
    Ok(TokenResponse::bearer(access_token, refresh_token))
}

#[instrument(skip(state, payload))]
pub async fn issue_tokens(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AccessTokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let Some(user) = state.users.find_by_id(payload.user_id).await? else {
        warn!(user_id = payload.user_id, "login for unknown user");
        return Err(ApiError::Unauthorized("Invalid credentials"));
    };

    if !verify_password(&payload.password, &user.hashed_password)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials"));
    }

    let tokens = token_pair(&JwtKeys::from_ref(&state), user.id)?;
    info!(user_id = user.id, "user logged in");
    Ok(Json(tokens))
}

#[instrument(skip(state, payload))]
pub async fn refresh_tokens(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&payload.refresh_token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::Unauthorized("Invalid or expired token")
    })?;

    if state.users.find_by_id(claims.sub).await?.is_none() {
        warn!(user_id = claims.sub, "refresh for deleted user");
        return Err(ApiError::Unauthorized("Could not validate credentials"));
    }

    Ok(Json(token_pair(&keys, claims.sub)?))
}
