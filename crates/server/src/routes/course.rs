use crate::{
    dtos::{
        course::{
            CourseDetailsResponse, CourseQueryParams, CourseQueryResponse, CourseResponse,
            CourseSearchParams, CreateCourseRequest,
        },
        review::ReviewResponse,
    },
    error::{ApiError, ErrorResponse},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::{CourseService, ReviewService, review::ReviewOrder};

/// Filter and sort the course catalogue
#[utoipa::path(
    get,
    path = "/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "Filtered and sorted courses", body = CourseQueryResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseQueryParams>,
) -> Result<Json<CourseQueryResponse>, ApiError> {
    let outcome = CourseService::query_courses(
        &state.db,
        &params.filter_keys(),
        &params.sort_keys(),
        state.min_raters,
    )
    .await?;

    Ok(Json(outcome.into()))
}

/// Add a course to the catalogue
#[utoipa::path(
    post,
    path = "/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 409, description = "A course with this identifier exists", body = ErrorResponse),
        (status = 422, description = "Invalid course", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let course = CourseService::create_course(&state.db, request.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Search courses by name
#[utoipa::path(
    get,
    path = "/courses/search",
    params(CourseSearchParams),
    responses(
        (status = 200, description = "Matching courses ordered by name", body = Vec<CourseResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseSearchParams>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let courses = CourseService::search_courses_by_name(&state.db, &params.name).await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course with its prerequisites, professors and reviews
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseDetailsResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseDetailsResponse>, ApiError> {
    match CourseService::get_course_details(&state.db, id).await? {
        Some(details) => Ok(Json(details.into())),
        None => Err(ApiError::not_found("Course", id)),
    }
}

/// Delete a course with its reviews, likes, prerequisites and follows
#[utoipa::path(
    delete,
    path = "/courses/{id}",
    params(
        ("id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reviews of a course, newest first
#[utoipa::path(
    get,
    path = "/courses/{id}/reviews",
    params(
        ("id" = i32, Path, description = "Course identifier")
    ),
    responses(
        (status = 200, description = "Reviews of the course", body = Vec<ReviewResponse>),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course_reviews(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    if CourseService::get_course(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found("Course", id));
    }

    let reviews = ReviewService::get_reviews(&state.db, Some(id), ReviewOrder::Newest).await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}
