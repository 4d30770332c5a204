pub mod app_user;
pub mod course;
pub mod followed_course;
pub mod like;
pub mod prerequisite;
pub mod professor;
pub mod professor_course;
pub mod review;
