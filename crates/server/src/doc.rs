use utoipa::OpenApi;

/// API Documentation
///
/// Paths are registered together with their routes in [`crate::app`].
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Courses", description = "Course catalogue, filtering and search"),
        (name = "Reviews", description = "Course reviews"),
        (name = "Users", description = "Accounts and sign-in"),
        (name = "Social", description = "Followed courses and liked reviews"),
    ),
    info(
        title = "ClassRater API",
        version = "1.0.0",
        description = "Course reviews, ratings and workload statistics",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
