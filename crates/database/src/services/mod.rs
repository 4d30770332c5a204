use models::validation::ValidationError;
use sea_orm::DbErr;
use std::fmt::Display;
use thiserror::Error;

pub mod course;
pub mod password;
pub mod review;
pub mod social;
pub mod user;

pub use course::CourseService;
pub use review::ReviewService;
pub use social::{FollowService, LikeService};
pub use user::AppUserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("User {user_id} already reviewed course {course_id}")]
    DuplicateReview { user_id: i32, course_id: i32 },
    #[error("Course {0} already exists")]
    DuplicateCourse(i32),
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
    #[error("Failed to hash password: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
