pub mod course;
pub mod review;
pub mod social;
pub mod user;
