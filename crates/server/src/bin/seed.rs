//! Loads a JSON course catalogue into the database
//!
//! Usage: `seed [path]`, defaulting to the catalogue shipped in `data/seed.json`.

use database::{
    entities::{prerequisite, professor, professor_course},
    services::{CourseService, ServiceError},
};
use env_logger::Env;
use log::{error, info, warn};
use migration::{Migrator, MigratorTrait};
use models::{
    course::{CourseSummary, NewCourse},
    requirement::RequirementCode,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use serde::Deserialize;
use server::config::Config;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct Catalogue {
    courses: Vec<NewCourse>,
    #[serde(default)]
    prerequisites: Vec<PrerequisiteSeed>,
    #[serde(default)]
    professors: Vec<ProfessorSeed>,
}

#[derive(Debug, Deserialize)]
struct PrerequisiteSeed {
    course_id: i32,
    required_course_id: i32,
    #[serde(default)]
    requirement: RequirementCode,
}

#[derive(Debug, Deserialize)]
struct ProfessorSeed {
    name: String,
    courses: Vec<i32>,
}

#[derive(Debug, Error)]
enum SeedError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

fn load_catalogue(path: PathBuf) -> Result<Catalogue, SeedError> {
    let raw = std::fs::read_to_string(&path).map_err(|source| SeedError::Read {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse { path, source })
}

async fn seed_prerequisites(
    db: &DatabaseConnection,
    prerequisites: Vec<PrerequisiteSeed>,
) -> Result<(), DbErr> {
    for seed in prerequisites {
        let existing = prerequisite::Entity::find()
            .filter(prerequisite::Column::CourseId.eq(seed.course_id))
            .filter(prerequisite::Column::RequiredCourseId.eq(seed.required_course_id))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        match CourseService::add_prerequisite(
            db,
            seed.course_id,
            seed.required_course_id,
            seed.requirement,
        )
        .await
        {
            Ok(_) => {}
            Err(ServiceError::Db(e)) => return Err(e),
            Err(e) => warn!(
                "Skipping prerequisite {} -> {}: {e}",
                seed.required_course_id, seed.course_id
            ),
        }
    }

    Ok(())
}

async fn seed_professors(
    db: &DatabaseConnection,
    professors: Vec<ProfessorSeed>,
) -> Result<(), DbErr> {
    for seed in professors {
        let existing = professor::Entity::find()
            .filter(professor::Column::Name.eq(seed.name.as_str()))
            .one(db)
            .await?;
        let professor = match existing {
            Some(professor) => professor,
            None => {
                professor::ActiveModel {
                    id: NotSet,
                    name: Set(seed.name),
                }
                .insert(db)
                .await?
            }
        };

        for course_id in seed.courses {
            let assigned = professor_course::Entity::find()
                .filter(professor_course::Column::ProfessorId.eq(professor.id))
                .filter(professor_course::Column::CourseId.eq(course_id))
                .one(db)
                .await?;
            if assigned.is_some() {
                continue;
            }
            if CourseService::get_course(db, course_id).await?.is_none() {
                warn!("Skipping unknown course {course_id} of {}", professor.name);
                continue;
            }

            professor_course::ActiveModel {
                id: NotSet,
                professor_id: Set(professor.id),
                course_id: Set(course_id),
            }
            .insert(db)
            .await?;
        }
    }

    Ok(())
}

async fn run(config: Config, path: PathBuf) -> Result<(), SeedError> {
    let catalogue = load_catalogue(path)?;
    let db = database::db::create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let saved = CourseService::save_courses(&db, catalogue.courses).await?;
    seed_prerequisites(&db, catalogue.prerequisites).await?;
    seed_professors(&db, catalogue.professors).await?;

    for listing in CourseService::get_courses(&db).await? {
        if saved.contains(&listing.course.id) {
            info!("\n{}", CourseSummary(&listing));
        }
    }

    info!("Seeded {} courses", saved.len());
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.json")));

    if let Err(e) = run(Config::from_env(), path).await {
        error!("{e}");
        std::process::exit(1);
    }
}
