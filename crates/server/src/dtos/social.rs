use models::presence::Presence;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowResponse {
    pub user_id: i32,
    pub course_id: i32,
    pub following: bool,
}

impl FollowResponse {
    pub fn new(user_id: i32, course_id: i32, state: Presence) -> Self {
        Self {
            user_id,
            course_id,
            following: state.is_present(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub user_id: i32,
    pub review_id: i32,
    pub liked: bool,
}

impl LikeResponse {
    pub fn new(user_id: i32, review_id: i32, state: Presence) -> Self {
        Self {
            user_id,
            review_id,
            liked: state.is_present(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LikedReviewsParams {
    /// Only reviews of this course
    pub course_id: Option<i32>,
}
