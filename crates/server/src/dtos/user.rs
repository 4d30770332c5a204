use chrono::NaiveDateTime;
use database::entities::app_user;
use models::user::SignUp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    /// Must repeat `password1`
    pub password2: String,
}

impl From<SignUpRequest> for SignUp {
    fn from(request: SignUpRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password1: request.password1,
            password2: request.password2,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub has_usable_password: bool,
    pub date_joined: NaiveDateTime,
}

impl From<app_user::Model> for UserResponse {
    fn from(user: app_user::Model) -> Self {
        Self {
            has_usable_password: user.has_usable_password(),
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            date_joined: user.date_joined,
        }
    }
}
