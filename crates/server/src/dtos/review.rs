use chrono::NaiveDateTime;
use database::entities::review;
use models::review::NewReview;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub course_id: i32,
    pub user_id: i32,
    /// 1-5
    pub rating: i16,
    /// 1-5
    pub course_load: i16,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub professor_id: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            course_id: request.course_id,
            user_id: request.user_id,
            rating: request.rating,
            course_load: request.course_load,
            content: request.content,
            professor_id: request.professor_id,
            image: request.image,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub professor_id: Option<i32>,
    pub rating: i16,
    pub course_load: i16,
    pub content: Option<String>,
    pub likes_num: i32,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<review::Model> for ReviewResponse {
    fn from(review: review::Model) -> Self {
        Self {
            id: review.id,
            course_id: review.course_id,
            user_id: review.user_id,
            professor_id: review.professor_id,
            rating: review.rating,
            course_load: review.course_load,
            content: review.content,
            likes_num: review.likes_num,
            image: review.image,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewListParams {
    /// `newest` (default) or `likes`
    pub sort: Option<String>,
}
