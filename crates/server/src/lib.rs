pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    doc::ApiDoc,
    routes::{course, health, review, root, social, user},
    state::AppState,
};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// Builds the HTTP API with its OpenAPI document and Swagger UI
pub fn app(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(root::root))
        .routes(routes!(health::health))
        .routes(routes!(course::get_courses, course::create_course))
        .routes(routes!(course::search_courses))
        .routes(routes!(course::get_course, course::delete_course))
        .routes(routes!(course::get_course_reviews))
        .routes(routes!(review::post_review, review::get_reviews))
        .routes(routes!(review::delete_review))
        .routes(routes!(review::get_review_likers))
        .routes(routes!(user::sign_up))
        .routes(routes!(user::sign_in))
        .routes(routes!(user::get_users))
        .routes(routes!(user::get_user))
        .routes(routes!(user::toggle_activation))
        .routes(routes!(social::get_follows))
        .routes(routes!(social::is_following, social::follow, social::unfollow))
        .routes(routes!(social::toggle_follow))
        .routes(routes!(social::get_likes))
        .routes(routes!(social::toggle_like))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .layer(ServiceBuilder::new().layer(CompressionLayer::new()))
        .with_state(state)
}
