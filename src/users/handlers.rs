use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument, warn};

use super::dto::{GroupQuery, ResetPasswordRequest, TeamQuery, TeamResponse, UserResponse};
use crate::{
    auth::{
        extractors::CurrentUser,
        password::{check_password_strength, hash_password},
    },
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(read_current_user).delete(delete_current_user))
        .route("/reset-password", post(reset_current_user_password))
}

pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/team", get(team_users))
        .route("/by-user-group", get(users_by_group))
        .route("/by-user-group/", get(users_by_group))
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn read_current_user(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn delete_current_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<StatusCode> {
    if !state.users.delete(user.id).await? {
        warn!("user vanished before delete");
        return Err(ApiError::Unauthorized("Could not validate credentials"));
    }
    info!("user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(user_id = user.id))]
pub async fn reset_current_user_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(payload): ApiJson<ResetPasswordRequest>,
) -> ApiResult<StatusCode> {
    check_password_strength(&payload.password)
        .map_err(|msg| ApiError::Unprocessable(msg.to_string()))?;

    let hashed = hash_password(&payload.password)?;
    if !state.users.update_password_hash(user.id, &hashed).await? {
        warn!("user vanished before password reset");
        return Err(ApiError::Unauthorized("Could not validate credentials"));
    }
    info!("password reset");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn team_users(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<TeamQuery>,
) -> ApiResult<Json<TeamResponse>> {
    let users = state.users.find_by_name(&q.name).await?;
    debug!(count = users.len(), "team lookup");
    Ok(Json(TeamResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

#[instrument(skip(state))]
pub async fn users_by_group(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<GroupQuery>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let group_id = q
        .group_id
        .ok_or_else(|| ApiError::Validation("group_id is required".into()))?;

    let users = state.users.find_by_group(group_id).await?;
    if users.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
