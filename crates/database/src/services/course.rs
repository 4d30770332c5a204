use crate::{
    entities::{
        course::{self, CourseListing},
        followed_course, like, prerequisite, professor, professor_course, review,
    },
    services::{ReviewService, ServiceError, review::ReviewOrder},
};
use futures::future::try_join_all;
use models::{
    course::NewCourse,
    course_query::{CourseQuery, QueryOutcome},
    course_stats::{CourseStats, Score},
    requirement::RequirementCode,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, Func, OnConflict},
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A prerequisite of a course, resolved to the required course's name
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PrerequisiteEntry {
    pub required_course_id: i32,
    pub required_course_name: String,
    pub requirement: RequirementCode,
}

/// Everything shown on a course's page
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: CourseListing,
    pub prerequisites: Vec<PrerequisiteEntry>,
    pub professors: Vec<professor::Model>,
    /// Newest first
    pub reviews: Vec<review::Model>,
}

pub struct CourseService;

impl CourseService {
    /// The number of courses to save in a single batch
    const BATCH_SIZE: usize = 200;

    fn to_active_model(new_course: NewCourse) -> course::ActiveModel {
        course::ActiveModel {
            id: Set(new_course.id),
            name: Set(new_course.name),
            mandatory: Set(new_course.mandatory),
            credit_points: Set(new_course.credit_points),
            syllabus: Set(new_course.syllabus),
            avg_load: Set(new_course.stats.avg_load),
            avg_rating: Set(new_course.stats.avg_rating),
            num_of_raters: Set(new_course.stats.num_of_raters),
            num_of_reviewers: Set(new_course.stats.num_of_reviewers),
        }
    }

    /// Saving a course that already exists updates its catalogue columns
    ///
    /// Statistics are only written on first insert; afterwards reviews own them.
    fn upsert() -> OnConflict {
        OnConflict::column(course::Column::Id)
            .update_columns([
                course::Column::Name,
                course::Column::Mandatory,
                course::Column::CreditPoints,
                course::Column::Syllabus,
            ])
            .to_owned()
    }

    /// Inserts a course or updates the catalogue data of an existing one
    ///
    /// A course that fails validation is not persisted: a warning is logged and `None` is
    /// returned instead of an error.
    pub async fn save_course<C: ConnectionTrait>(
        db: &C,
        new_course: NewCourse,
    ) -> Result<Option<course::Model>, DbErr> {
        if let Err(e) = new_course.validate() {
            log::warn!("Not saving course {}: {e}", new_course.id);
            return Ok(None);
        }

        let course_id = new_course.id;
        course::Entity::insert(Self::to_active_model(new_course))
            .on_conflict(Self::upsert())
            .exec_without_returning(db)
            .await?;

        course::Entity::find_by_id(course_id).one(db).await
    }

    /// Inserts a new course, reporting why it was rejected
    pub async fn create_course(
        db: &DatabaseConnection,
        new_course: NewCourse,
    ) -> Result<course::Model, ServiceError> {
        new_course.validate()?;

        let course_id = new_course.id;
        if course::Entity::find_by_id(course_id).one(db).await?.is_some() {
            return Err(ServiceError::DuplicateCourse(course_id));
        }

        course::Entity::insert(Self::to_active_model(new_course))
            .exec_without_returning(db)
            .await?;

        course::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id))
    }

    /// Imports courses in batches, one transaction per batch
    ///
    /// Invalid courses are skipped the same way [`CourseService::save_course`] skips them.
    /// Returns the identifiers of the saved courses.
    pub async fn save_courses(
        db: &DatabaseConnection,
        new_courses: Vec<NewCourse>,
    ) -> Result<Vec<i32>, DbErr> {
        let total_courses = new_courses.len();
        log::info!(
            "Starting to save {} courses in batches of {}",
            total_courses,
            Self::BATCH_SIZE
        );

        let batch_futures = new_courses
            .chunks(Self::BATCH_SIZE)
            .enumerate()
            .map(|(batch_idx, batch)| {
                let batch_vec = batch.to_vec();

                async move {
                    let result = Self::save_course_batch(db, batch_vec).await;

                    match &result {
                        Ok(ids) => log::info!(
                            "Completed batch {}/{}, {} courses saved",
                            batch_idx + 1,
                            total_courses.div_ceil(Self::BATCH_SIZE),
                            ids.len()
                        ),
                        Err(e) => log::error!("Error in batch {}: {}", batch_idx + 1, e),
                    }

                    result
                }
            });

        let all_batch_results: Vec<Vec<i32>> = try_join_all(batch_futures).await?;
        let saved: Vec<i32> = all_batch_results.into_iter().flatten().collect();

        log::info!("Saved {} of {total_courses} courses", saved.len());
        Ok(saved)
    }

    async fn save_course_batch(
        db: &DatabaseConnection,
        new_courses: Vec<NewCourse>,
    ) -> Result<Vec<i32>, DbErr> {
        let (valid, invalid): (Vec<_>, Vec<_>) = new_courses
            .into_iter()
            .map(|new_course| {
                let checked = new_course.validate();
                (new_course, checked)
            })
            .partition(|(_, checked)| checked.is_ok());

        for (new_course, checked) in &invalid {
            if let Err(e) = checked {
                log::warn!("Not saving course {}: {e}", new_course.id);
            }
        }

        let course_ids: Vec<i32> = valid.iter().map(|(c, _)| c.id).collect();
        if course_ids.is_empty() {
            return Ok(course_ids);
        }

        let txn = db.begin().await?;
        course::Entity::insert_many(valid.into_iter().map(|(c, _)| Self::to_active_model(c)))
            .on_conflict(Self::upsert())
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        Ok(course_ids)
    }

    pub async fn get_course<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
    ) -> Result<Option<course::Model>, DbErr> {
        course::Entity::find_by_id(course_id).one(db).await
    }

    /// Identifiers of the courses that at least one prerequisite row targets
    async fn prerequisite_targets<C: ConnectionTrait>(db: &C) -> Result<HashSet<i32>, DbErr> {
        let targets: Vec<i32> = prerequisite::Entity::find()
            .select_only()
            .column(prerequisite::Column::CourseId)
            .distinct()
            .into_tuple()
            .all(db)
            .await?;

        Ok(targets.into_iter().collect())
    }

    /// All courses ordered by identifier
    pub async fn get_courses<C: ConnectionTrait>(db: &C) -> Result<Vec<CourseListing>, DbErr> {
        let targets = Self::prerequisite_targets(db).await?;
        let courses = course::Entity::find()
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?;

        Ok(courses
            .into_iter()
            .map(|course| CourseListing {
                has_prerequisites: targets.contains(&course.id),
                course,
            })
            .collect())
    }

    pub async fn get_course_details<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
    ) -> Result<Option<CourseDetails>, DbErr> {
        let course = match course::Entity::find_by_id(course_id).one(db).await? {
            Some(course) => course,
            None => return Ok(None),
        };

        let prerequisites = prerequisite::Entity::find()
            .filter(prerequisite::Column::CourseId.eq(course_id))
            .order_by_asc(prerequisite::Column::RequiredCourseId)
            .all(db)
            .await?;

        // Batch fetch the names of all required courses
        let required_ids: Vec<i32> = prerequisites.iter().map(|p| p.required_course_id).collect();
        let names: HashMap<i32, String> = course::Entity::find()
            .filter(course::Column::Id.is_in(required_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|required| (required.id, required.name))
            .collect();

        let professors = course
            .find_related(professor::Entity)
            .order_by_asc(professor::Column::Name)
            .all(db)
            .await?;
        let reviews = ReviewService::get_reviews(db, Some(course_id), ReviewOrder::Newest).await?;

        let prerequisites = prerequisites
            .into_iter()
            .map(|p| PrerequisiteEntry {
                required_course_name: names
                    .get(&p.required_course_id)
                    .cloned()
                    .unwrap_or_default(),
                required_course_id: p.required_course_id,
                requirement: p.req_code,
            })
            .collect::<Vec<_>>();

        Ok(Some(CourseDetails {
            course: CourseListing {
                has_prerequisites: !prerequisites.is_empty(),
                course,
            },
            prerequisites,
            professors,
            reviews,
        }))
    }

    pub async fn has_prereqs<C: ConnectionTrait>(db: &C, course_id: i32) -> Result<bool, DbErr> {
        let count = prerequisite::Entity::find()
            .filter(prerequisite::Column::CourseId.eq(course_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Records that `required_course_id` relates to `course_id` as `requirement` says
    pub async fn add_prerequisite<C: ConnectionTrait>(
        db: &C,
        course_id: i32,
        required_course_id: i32,
        requirement: RequirementCode,
    ) -> Result<prerequisite::Model, ServiceError> {
        for id in [course_id, required_course_id] {
            if course::Entity::find_by_id(id).one(db).await?.is_none() {
                return Err(ServiceError::not_found("Course", id));
            }
        }

        let prerequisite = prerequisite::ActiveModel {
            id: NotSet,
            course_id: Set(course_id),
            required_course_id: Set(required_course_id),
            req_code: Set(requirement),
        }
        .insert(db)
        .await?;

        Ok(prerequisite)
    }

    /// Filters and sorts the full course list by request keys
    ///
    /// Unknown filter keys are ignored and an unknown sort key sorts by identifier.
    pub async fn query_courses<C: ConnectionTrait, S: AsRef<str>>(
        db: &C,
        filter_keys: &[S],
        sort_keys: &[S],
        min_raters: i32,
    ) -> Result<QueryOutcome<CourseListing>, DbErr> {
        let courses = Self::get_courses(db).await?;

        Ok(CourseQuery::new(courses)
            .min_raters(min_raters)
            .filter_by(filter_keys)
            .sort_by_keys(sort_keys)
            .evaluate())
    }

    /// Courses whose name contains `name`, ignoring case, ordered by name
    pub async fn search_courses_by_name<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> Result<Vec<course::Model>, DbErr> {
        let pattern = format!("%{}%", name.trim().to_lowercase());

        course::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(course::Column::Name))).like(pattern))
            .order_by_asc(course::Column::Name)
            .order_by_asc(course::Column::Id)
            .all(db)
            .await
    }

    /// Folds one review into the course's running statistics
    pub async fn update_course_per_review(
        db: &DatabaseConnection,
        course_id: i32,
        rating: Score,
        load: Score,
        has_content: bool,
    ) -> Result<course::Model, ServiceError> {
        let txn = db.begin().await?;
        let course = Self::update_stats(&txn, course_id, |stats| {
            stats.apply_review(rating, load, has_content)
        })
        .await?;
        txn.commit().await?;

        Ok(course)
    }

    /// Locks the course row, applies `update` to its statistics and writes back only the
    /// statistics columns
    ///
    /// Must run inside a transaction so the lock is held until the write commits.
    pub(crate) async fn update_stats<C, F>(
        txn: &C,
        course_id: i32,
        update: F,
    ) -> Result<course::Model, ServiceError>
    where
        C: ConnectionTrait,
        F: FnOnce(&mut CourseStats),
    {
        let current = course::Entity::find_by_id(course_id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id))?;

        let mut stats = current.stats();
        update(&mut stats);

        let updated = course::ActiveModel {
            id: Unchanged(course_id),
            avg_load: Set(stats.avg_load),
            avg_rating: Set(stats.avg_rating),
            num_of_raters: Set(stats.num_of_raters),
            num_of_reviewers: Set(stats.num_of_reviewers),
            ..Default::default()
        }
        .update(txn)
        .await?;

        Ok(updated)
    }

    /// Deletes a course along with its reviews and their likes, prerequisites on either
    /// side, follows and professor assignments
    pub async fn delete_course(db: &DatabaseConnection, course_id: i32) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        if course::Entity::find_by_id(course_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("Course", course_id));
        }

        let review_ids: Vec<i32> = review::Entity::find()
            .select_only()
            .column(review::Column::Id)
            .filter(review::Column::CourseId.eq(course_id))
            .into_tuple()
            .all(&txn)
            .await?;

        like::Entity::delete_many()
            .filter(like::Column::ReviewId.is_in(review_ids))
            .exec(&txn)
            .await?;
        let reviews = review::Entity::delete_many()
            .filter(review::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        prerequisite::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(prerequisite::Column::CourseId.eq(course_id))
                    .add(prerequisite::Column::RequiredCourseId.eq(course_id)),
            )
            .exec(&txn)
            .await?;
        followed_course::Entity::delete_many()
            .filter(followed_course::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        professor_course::Entity::delete_many()
            .filter(professor_course::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        course::Entity::delete_by_id(course_id).exec(&txn).await?;

        txn.commit().await?;
        log::info!(
            "Deleted course {course_id} and {} of its reviews",
            reviews.rows_affected
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{FollowService, LikeService, ReviewService},
        test_support::{insert_course, insert_user, setup_db},
    };
    use models::{review::NewReview, validation::ValidationError};
    use rust_decimal::Decimal;

    fn rated(avg_load: Decimal, avg_rating: Decimal, raters: i32, reviewers: i32) -> CourseStats {
        CourseStats {
            avg_load: Some(avg_load),
            avg_rating: Some(avg_rating),
            num_of_raters: raters,
            num_of_reviewers: reviewers,
        }
    }

    fn score(value: i16) -> Score {
        Score::new("score", value).unwrap()
    }

    fn rounded(value: Option<Decimal>) -> Option<Decimal> {
        value.map(|v| v.round_dp(5))
    }

    #[tokio::test]
    async fn test_save_course_skips_invalid() {
        let db = setup_db().await;

        let partial = NewCourse::new(10231, "Programming 1", true, 5).with_stats(CourseStats {
            avg_load: Some(Decimal::new(35, 1)),
            ..CourseStats::default()
        });
        assert_eq!(CourseService::save_course(&db, partial).await.unwrap(), None);

        let rating_only = NewCourse::new(10231, "Programming 1", true, 5).with_stats(CourseStats {
            avg_rating: Some(Decimal::from(4)),
            num_of_raters: 1,
            ..CourseStats::default()
        });
        assert_eq!(CourseService::save_course(&db, rating_only).await.unwrap(), None);

        let too_many_points = NewCourse::new(10231, "Programming 1", true, 30);
        assert_eq!(
            CourseService::save_course(&db, too_many_points).await.unwrap(),
            None
        );

        assert!(CourseService::get_course(&db, 10231).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_course_overwrites() {
        let db = setup_db().await;

        let first = NewCourse::new(10231, "Programming 1", true, 5);
        let saved = CourseService::save_course(&db, first).await.unwrap().unwrap();
        assert_eq!(saved.name, "Programming 1");
        assert!(saved.avg_rating.is_none());

        let renamed = NewCourse::new(10231, "Introduction to Programming", false, 4)
            .with_syllabus("https://example.com/syllabus.pdf");
        let saved = CourseService::save_course(&db, renamed).await.unwrap().unwrap();
        assert_eq!(saved.name, "Introduction to Programming");
        assert!(!saved.mandatory);
        assert_eq!(saved.syllabus.as_deref(), Some("https://example.com/syllabus.pdf"));
        assert_eq!(CourseService::get_courses(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resaving_course_keeps_review_statistics() {
        let db = setup_db().await;
        insert_course(&db, 10340, "Discrete Mathematics").await;
        let user = insert_user(&db, "student").await;
        ReviewService::post_review(
            &db,
            NewReview {
                course_id: 10340,
                user_id: user.id,
                rating: 4,
                course_load: 2,
                content: Some("Hard but fair".to_string()),
                professor_id: None,
                image: None,
            },
        )
        .await
        .unwrap();

        let resaved = NewCourse::new(10340, "Discrete Math", false, 4);
        CourseService::save_courses(&db, vec![resaved.clone()]).await.unwrap();
        let course = CourseService::save_course(&db, resaved).await.unwrap().unwrap();

        let reviews = ReviewService::get_reviews(&db, Some(10340), ReviewOrder::Newest)
            .await
            .unwrap();
        assert_eq!(course.name, "Discrete Math");
        assert!(!course.mandatory);
        assert_eq!(course.num_of_raters as usize, reviews.len());
        assert_eq!(course.num_of_reviewers, 1);
        assert_eq!(rounded(course.avg_rating), Some(Decimal::from(4)));
        assert_eq!(rounded(course.avg_load), Some(Decimal::from(2)));

        ReviewService::delete_review(&db, reviews[0].id).await.unwrap();
        let course = CourseService::get_course(&db, 10340).await.unwrap().unwrap();
        assert_eq!(course.num_of_raters, 0);
        assert!(course.avg_rating.is_none());
    }

    #[tokio::test]
    async fn test_create_course_is_strict() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;

        let duplicate = CourseService::create_course(&db, NewCourse::new(10231, "Again", true, 3)).await;
        assert!(matches!(duplicate, Err(ServiceError::DuplicateCourse(10231))));

        let invalid = CourseService::create_course(
            &db,
            NewCourse::new(10111, "Linear Algebra", true, 3).with_stats(CourseStats {
                num_of_raters: 2,
                ..CourseStats::default()
            }),
        )
        .await;
        assert!(matches!(
            invalid,
            Err(ServiceError::Validation(ValidationError::RatersMismatch))
        ));
    }

    #[tokio::test]
    async fn test_save_courses_in_batches() {
        let db = setup_db().await;

        let mut courses: Vec<NewCourse> = (1..=450)
            .map(|id| NewCourse::new(id, format!("Course {id}"), id % 2 == 0, 3))
            .collect();
        courses.push(NewCourse::new(0, "Invalid identifier", true, 3));

        let saved = CourseService::save_courses(&db, courses).await.unwrap();
        assert_eq!(saved.len(), 450);
        assert_eq!(CourseService::get_courses(&db).await.unwrap().len(), 450);
    }

    #[tokio::test]
    async fn test_update_course_per_review() {
        let db = setup_db().await;
        let course = NewCourse::new(10231, "Programming 1", true, 5).with_stats(rated(
            Decimal::new(35, 1),
            Decimal::from(2),
            13,
            0,
        ));
        CourseService::save_course(&db, course).await.unwrap();

        let updated =
            CourseService::update_course_per_review(&db, 10231, score(3), score(1), true)
                .await
                .unwrap();

        assert_eq!(rounded(updated.avg_rating), Some(Decimal::new(207143, 5)));
        assert_eq!(rounded(updated.avg_load), Some(Decimal::new(332143, 5)));
        assert_eq!(updated.num_of_raters, 14);
        assert_eq!(updated.num_of_reviewers, 1);
        assert_eq!(updated.name, "Programming 1");
    }

    #[tokio::test]
    async fn test_first_review_rates_course() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;

        let updated =
            CourseService::update_course_per_review(&db, 10231, score(3), score(1), false)
                .await
                .unwrap();

        assert_eq!(rounded(updated.avg_rating), Some(Decimal::from(3)));
        assert_eq!(rounded(updated.avg_load), Some(Decimal::from(1)));
        assert_eq!(updated.num_of_raters, 1);
        assert_eq!(updated.num_of_reviewers, 0);

        let missing = CourseService::update_course_per_review(&db, 1, score(3), score(1), false).await;
        assert!(matches!(missing, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_prerequisites_and_details() {
        let db = setup_db().await;
        insert_course(&db, 10111, "Linear Algebra").await;
        insert_course(&db, 10221, "Data Structures").await;
        insert_course(&db, 10231, "Programming 1").await;

        CourseService::add_prerequisite(&db, 10221, 10231, RequirementCode::Before)
            .await
            .unwrap();
        CourseService::add_prerequisite(&db, 10221, 10111, RequirementCode::Simultaneous)
            .await
            .unwrap();
        let missing = CourseService::add_prerequisite(&db, 10221, 99999, RequirementCode::Cant).await;
        assert!(matches!(missing, Err(ServiceError::NotFound { .. })));

        assert!(CourseService::has_prereqs(&db, 10221).await.unwrap());
        assert!(!CourseService::has_prereqs(&db, 10231).await.unwrap());

        let professor = professor::ActiveModel {
            id: NotSet,
            name: Set("Ada Lovelace".to_string()),
        }
        .insert(&db)
        .await
        .unwrap();
        professor_course::ActiveModel {
            id: NotSet,
            professor_id: Set(professor.id),
            course_id: Set(10221),
        }
        .insert(&db)
        .await
        .unwrap();

        let details = CourseService::get_course_details(&db, 10221)
            .await
            .unwrap()
            .unwrap();
        assert!(details.course.has_prerequisites);
        assert_eq!(
            details.prerequisites,
            vec![
                PrerequisiteEntry {
                    required_course_id: 10111,
                    required_course_name: "Linear Algebra".to_string(),
                    requirement: RequirementCode::Simultaneous,
                },
                PrerequisiteEntry {
                    required_course_id: 10231,
                    required_course_name: "Programming 1".to_string(),
                    requirement: RequirementCode::Before,
                },
            ]
        );
        assert_eq!(details.professors, vec![professor]);
        assert!(details.reviews.is_empty());

        assert!(
            CourseService::get_course_details(&db, 4)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_query_courses() {
        let db = setup_db().await;
        let catalogue = [
            NewCourse::new(10231, "Programming 1", true, 5).with_stats(rated(
                Decimal::from(2),
                Decimal::from(4),
                6,
                2,
            )),
            NewCourse::new(10221, "Data Structures", true, 4).with_stats(rated(
                Decimal::from(4),
                Decimal::from(3),
                2,
                1,
            )),
            NewCourse::new(12357, "Compilers", false, 3),
        ];
        for course in catalogue {
            CourseService::save_course(&db, course).await.unwrap().unwrap();
        }
        CourseService::add_prerequisite(&db, 10221, 10231, RequirementCode::Before)
            .await
            .unwrap();

        let outcome = CourseService::query_courses(&db, &["mand"], &["rating"], 5)
            .await
            .unwrap();
        let ids: Vec<i32> = outcome.result.iter().map(|c| c.course.id).collect();
        assert_eq!(ids, vec![10231, 10221]);
        assert_eq!(outcome.active, vec!["mandatory".to_string()]);
        assert_eq!(outcome.sort, "course rating");

        let outcome = CourseService::query_courses(&db, &["no_preqs", "bogus"], &[], 5)
            .await
            .unwrap();
        let ids: Vec<i32> = outcome.result.iter().map(|c| c.course.id).collect();
        assert_eq!(ids, vec![10231, 12357]);
        assert_eq!(outcome.sort, "identifier");

        let outcome = CourseService::query_courses(&db, &["rater_num"], &["name"], 5)
            .await
            .unwrap();
        assert_eq!(outcome.result.len(), 1);
        assert_eq!(outcome.active, vec!["at least 5 raters".to_string()]);
    }

    #[tokio::test]
    async fn test_search_courses_by_name() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Introduction to Programming").await;
        insert_course(&db, 10221, "INTRO to Data Structures").await;
        insert_course(&db, 12357, "Compilers").await;

        let found = CourseService::search_courses_by_name(&db, "intro")
            .await
            .unwrap();
        let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["INTRO to Data Structures", "Introduction to Programming"]);

        assert!(
            CourseService::search_courses_by_name(&db, "quantum")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_delete_course_cascades() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        insert_course(&db, 10221, "Data Structures").await;
        let author = insert_user(&db, "author").await;
        let reader = insert_user(&db, "reader").await;

        CourseService::add_prerequisite(&db, 10221, 10231, RequirementCode::Before)
            .await
            .unwrap();
        let posted = ReviewService::post_review(
            &db,
            NewReview {
                course_id: 10231,
                user_id: author.id,
                rating: 4,
                course_load: 2,
                content: Some("Solid".to_string()),
                professor_id: None,
                image: None,
            },
        )
        .await
        .unwrap();
        LikeService::toggle_like(&db, reader.id, posted.id).await.unwrap();
        FollowService::follow(&db, reader.id, 10231).await.unwrap();

        CourseService::delete_course(&db, 10231).await.unwrap();

        assert!(CourseService::get_course(&db, 10231).await.unwrap().is_none());
        assert!(!CourseService::has_prereqs(&db, 10221).await.unwrap());
        assert!(!ReviewService::has_reviewed(&db, author.id, 10231).await.unwrap());
        assert!(!LikeService::is_liked(&db, reader.id, posted.id).await.unwrap());
        assert!(
            FollowService::courses_followed_by(&db, reader.id)
                .await
                .unwrap()
                .is_empty()
        );

        let again = CourseService::delete_course(&db, 10231).await;
        assert!(matches!(again, Err(ServiceError::NotFound { .. })));
    }
}
