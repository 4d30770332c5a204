use crate::{
    entities::{app_user, course},
    services::{AppUserService, CourseService},
};
use migration::{Migrator, MigratorTrait};
use models::course::NewCourse;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with every migration applied
pub(crate) async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A single connection keeps every query on the same in-memory database
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub(crate) async fn insert_course(db: &DatabaseConnection, id: i32, name: &str) -> course::Model {
    CourseService::create_course(db, NewCourse::new(id, name, true, 3))
        .await
        .unwrap()
}

/// A user without a usable password
pub(crate) async fn insert_user(db: &DatabaseConnection, username: &str) -> app_user::Model {
    AppUserService::create_app_user(db, username, &format!("{username}@example.com"), None)
        .await
        .unwrap()
}
