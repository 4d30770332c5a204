pub mod course;
pub mod health;
pub mod review;
pub mod root;
pub mod social;
pub mod user;
