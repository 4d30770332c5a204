use crate::{
    entities::{app_user, course, like, review},
    services::{CourseService, ServiceError},
};
use models::review::NewReview;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

/// Order in which reviews are listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewOrder {
    #[default]
    Newest,
    MostLiked,
}

impl ReviewOrder {
    /// `newest` or `likes`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "newest" => Some(Self::Newest),
            "likes" => Some(Self::MostLiked),
            _ => None,
        }
    }
}

pub struct ReviewService;

impl ReviewService {
    pub async fn has_reviewed<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        course_id: i32,
    ) -> Result<bool, DbErr> {
        let count = review::Entity::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::CourseId.eq(course_id))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    /// Stores a review and folds its scores into the course statistics
    ///
    /// Both writes happen in one transaction; a user may review a course only once.
    pub async fn post_review(
        db: &DatabaseConnection,
        new_review: NewReview,
    ) -> Result<review::Model, ServiceError> {
        let scores = new_review.validate()?;
        let txn = db.begin().await?;

        // Lock the course first so concurrent reviews of it serialize here
        if course::Entity::find_by_id(new_review.course_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Course", new_review.course_id));
        }
        if app_user::Entity::find_by_id(new_review.user_id)
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("User", new_review.user_id));
        }
        if Self::has_reviewed(&txn, new_review.user_id, new_review.course_id).await? {
            return Err(ServiceError::DuplicateReview {
                user_id: new_review.user_id,
                course_id: new_review.course_id,
            });
        }

        let stored = review::ActiveModel {
            id: NotSet,
            course_id: Set(new_review.course_id),
            user_id: Set(new_review.user_id),
            professor_id: Set(new_review.professor_id),
            rating: Set(scores.rating.value()),
            course_load: Set(scores.course_load.value()),
            content: Set(new_review.content),
            likes_num: Set(0),
            image: Set(new_review.image),
            created_at: Set(chrono::Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;

        CourseService::update_stats(&txn, stored.course_id, |stats| {
            stats.apply_review(scores.rating, scores.course_load, scores.has_content)
        })
        .await?;

        txn.commit().await?;
        log::info!(
            "User {} reviewed course {}",
            stored.user_id,
            stored.course_id
        );
        Ok(stored)
    }

    /// Reviews of one course, or of every course when `course_id` is `None`
    pub async fn get_reviews<C: ConnectionTrait>(
        db: &C,
        course_id: Option<i32>,
        order: ReviewOrder,
    ) -> Result<Vec<review::Model>, DbErr> {
        let mut query = review::Entity::find();

        if let Some(course_id) = course_id {
            query = query.filter(review::Column::CourseId.eq(course_id));
        }
        if order == ReviewOrder::MostLiked {
            query = query.order_by_desc(review::Column::LikesNum);
        }

        query
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(db)
            .await
    }

    pub async fn get_review<C: ConnectionTrait>(
        db: &C,
        review_id: i32,
    ) -> Result<Option<review::Model>, DbErr> {
        review::Entity::find_by_id(review_id).one(db).await
    }

    /// Removes a review with its likes and takes its scores back out of the course statistics
    pub async fn delete_review(db: &DatabaseConnection, review_id: i32) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let stored = review::Entity::find_by_id(review_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Review", review_id))?;
        let (rating, load) = stored.scores()?;
        let has_content = stored.has_content();

        like::Entity::delete_many()
            .filter(like::Column::ReviewId.eq(review_id))
            .exec(&txn)
            .await?;
        review::Entity::delete_by_id(review_id).exec(&txn).await?;

        CourseService::update_stats(&txn, stored.course_id, |stats| {
            stats.retract_review(rating, load, has_content)
        })
        .await?;

        txn.commit().await?;
        log::info!("Deleted review {review_id} of course {}", stored.course_id);
        Ok(())
    }
}
