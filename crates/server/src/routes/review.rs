use crate::{
    dtos::{
        review::{CreateReviewRequest, ReviewListParams, ReviewResponse},
        user::UserResponse,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::{LikeService, ReviewService, review::ReviewOrder};

/// Post a review and update the course's statistics
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored", body = ReviewResponse),
        (status = 404, description = "Course or user not found", body = ErrorResponse),
        (status = 409, description = "The user already reviewed this course", body = ErrorResponse),
        (status = 422, description = "Invalid review", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn post_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let review = ReviewService::post_review(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

/// All reviews, newest or most liked first
#[utoipa::path(
    get,
    path = "/reviews",
    params(ReviewListParams),
    responses(
        (status = 200, description = "Reviews", body = Vec<ReviewResponse>),
        (status = 400, description = "Unknown sort order", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn get_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let order = match params.sort.as_deref() {
        None => ReviewOrder::default(),
        Some(key) => ReviewOrder::from_key(key)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown review order: {key}")))?,
    };

    let reviews = ReviewService::get_reviews(&state.db, None, order).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Delete a review and take it out of the course's statistics
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    params(
        ("id" = i32, Path, description = "Review identifier")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ReviewService::delete_review(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Users who liked a review
#[utoipa::path(
    get,
    path = "/reviews/{id}/likers",
    params(
        ("id" = i32, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "Users who liked the review", body = Vec<UserResponse>),
        (status = 404, description = "Review not found", body = ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn get_review_likers(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    if ReviewService::get_review(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Review", id));
    }

    let users = LikeService::users_who_liked(&state.db, id).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}
