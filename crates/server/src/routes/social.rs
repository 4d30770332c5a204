use crate::{
    dtos::{
        course::CourseResponse,
        review::ReviewResponse,
        social::{FollowResponse, LikeResponse, LikedReviewsParams},
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::{FollowService, LikeService};

/// Courses a user follows
#[utoipa::path(
    get,
    path = "/users/{user}/follows",
    params(
        ("user" = i32, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Followed courses", body = Vec<CourseResponse>),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn get_follows(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = FollowService::courses_followed_by(&state.db, user_id).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Whether a user follows a course
#[utoipa::path(
    get,
    path = "/users/{user}/follows/{course_id}",
    params(
        ("user" = i32, Path, description = "User identifier"),
        ("course_id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Follow state", body = FollowResponse)
    ),
    tag = "Social"
)]
pub async fn is_following(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(i32, i32)>,
) -> Result<Json<FollowResponse>, ApiError> {
    let following = FollowService::is_following(&state.db, user_id, course_id).await?;

    Ok(Json(FollowResponse {
        user_id,
        course_id,
        following,
    }))
}

/// Follow a course; following it again changes nothing
#[utoipa::path(
    put,
    path = "/users/{user}/follows/{course_id}",
    params(
        ("user" = i32, Path, description = "User identifier"),
        ("course_id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Course followed", body = FollowResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn follow(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(i32, i32)>,
) -> Result<Json<FollowResponse>, ApiError> {
    let state_after = FollowService::follow(&state.db, user_id, course_id).await?;
    Ok(Json(FollowResponse::new(user_id, course_id, state_after)))
}

/// Stop following a course; unfollowing it again changes nothing
#[utoipa::path(
    delete,
    path = "/users/{user}/follows/{course_id}",
    params(
        ("user" = i32, Path, description = "User identifier"),
        ("course_id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Course unfollowed", body = FollowResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn unfollow(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(i32, i32)>,
) -> Result<Json<FollowResponse>, ApiError> {
    let state_after = FollowService::unfollow(&state.db, user_id, course_id).await?;
    Ok(Json(FollowResponse::new(user_id, course_id, state_after)))
}

/// Follow a course if the user doesn't yet, otherwise unfollow it
#[utoipa::path(
    post,
    path = "/users/{user}/follows/{course_id}/toggle",
    params(
        ("user" = i32, Path, description = "User identifier"),
        ("course_id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "New follow state", body = FollowResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn toggle_follow(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(i32, i32)>,
) -> Result<Json<FollowResponse>, ApiError> {
    let state_after = FollowService::toggle_follow(&state.db, user_id, course_id).await?;
    Ok(Json(FollowResponse::new(user_id, course_id, state_after)))
}

/// Reviews a user liked, optionally only those of one course
#[utoipa::path(
    get,
    path = "/users/{user}/likes",
    params(
        ("user" = i32, Path, description = "User identifier"),
        LikedReviewsParams
    ),
    responses(
        (status = 200, description = "Liked reviews", body = Vec<ReviewResponse>),
        (status = 404, description = "No such user", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn get_likes(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(params): Query<LikedReviewsParams>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let reviews = match params.course_id {
        Some(course_id) => {
            LikeService::liked_reviews_by_user_for_course(&state.db, user_id, course_id).await?
        }
        None => LikeService::liked_reviews_by_user(&state.db, user_id).await?,
    };
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// Like a review, or take the like back
#[utoipa::path(
    post,
    path = "/users/{user}/likes/{review_id}",
    params(
        ("user" = i32, Path, description = "User identifier"),
        ("review_id" = i32, Path, description = "Review identifier")
    ),
    responses(
        (status = 200, description = "New like state", body = LikeResponse),
        (status = 404, description = "User or review not found", body = ErrorResponse)
    ),
    tag = "Social"
)]
pub async fn toggle_like(
    State(state): State<AppState>,
    Path((user_id, review_id)): Path<(i32, i32)>,
) -> Result<Json<LikeResponse>, ApiError> {
    let state_after = LikeService::toggle_like(&state.db, user_id, review_id).await?;
    Ok(Json(LikeResponse::new(user_id, review_id, state_after)))
}
