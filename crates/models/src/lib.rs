pub mod course;
pub mod course_query;
pub mod course_stats;
pub mod presence;
pub mod requirement;
pub mod review;
pub mod user;
pub mod validation;
