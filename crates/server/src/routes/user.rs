use crate::{
    dtos::user::{SignInRequest, SignUpRequest, UserResponse},
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::AppUserService;

/// Create an account
#[utoipa::path(
    post,
    path = "/users/sign_up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 409, description = "Username taken", body = ErrorResponse),
        (status = 422, description = "Invalid sign-up form", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = AppUserService::sign_up(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Check a username and password
#[utoipa::path(
    post,
    path = "/users/sign_in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Credentials are valid", body = UserResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    AppUserService::authenticate(&state.db, &request.username, &request.password)
        .await?
        .map(|user| Json(user.into()))
        .ok_or(ApiError::InvalidCredentials)
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All accounts", body = Vec<UserResponse>)
    ),
    tag = "Users"
)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = AppUserService::get_all_app_users(&state.db).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// Get an account by username
#[utoipa::path(
    get,
    path = "/users/{user}",
    params(
        ("user" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Account found", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    match AppUserService::get_app_user(&state.db, &username).await? {
        Some(user) => Ok(Json(user.into())),
        None => Err(ApiError::not_found("User", username)),
    }
}

/// Activate an inactive account or deactivate an active one
#[utoipa::path(
    post,
    path = "/users/{user}/activation",
    params(
        ("user" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Account updated", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn toggle_activation(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = AppUserService::toggle_user_activation(&state.db, user_id).await?;
    Ok(Json(user.into()))
}
