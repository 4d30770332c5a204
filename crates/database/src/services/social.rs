use crate::{
    entities::{app_user, course, followed_course, like, review},
    services::ServiceError,
};
use models::presence::{Action, Effect, Presence};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, ExprTrait, OnConflict},
};

async fn require_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), ServiceError> {
    match app_user::Entity::find_by_id(user_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ServiceError::not_found("User", user_id)),
    }
}

pub struct FollowService;

impl FollowService {
    async fn presence<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        course_id: i32,
    ) -> Result<Presence, DbErr> {
        let count = followed_course::Entity::find()
            .filter(followed_course::Column::UserId.eq(user_id))
            .filter(followed_course::Column::CourseId.eq(course_id))
            .count(db)
            .await?;

        Ok(Presence::from_exists(count > 0))
    }

    /// Inserts the follow row; a row that already exists is left as is
    async fn insert_follow<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        course_id: i32,
    ) -> Result<(), DbErr> {
        followed_course::Entity::insert(followed_course::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            course_id: Set(course_id),
        })
        .on_conflict(
            OnConflict::columns([
                followed_course::Column::UserId,
                followed_course::Column::CourseId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        Ok(())
    }

    /// Runs one transition of the follow state for (user, course) and returns the new state
    async fn transition(
        db: &DatabaseConnection,
        user_id: i32,
        course_id: i32,
        action: Action,
    ) -> Result<Presence, ServiceError> {
        let txn = db.begin().await?;

        require_user(&txn, user_id).await?;
        // Concurrent transitions on the same course wait here
        if course::Entity::find_by_id(course_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Course", course_id));
        }

        let current = Self::presence(&txn, user_id, course_id).await?;
        let (next, effect) = current.transition(action);

        match effect {
            Effect::Insert => Self::insert_follow(&txn, user_id, course_id).await?,
            Effect::Delete => {
                followed_course::Entity::delete_many()
                    .filter(followed_course::Column::UserId.eq(user_id))
                    .filter(followed_course::Column::CourseId.eq(course_id))
                    .exec(&txn)
                    .await?;
            }
            Effect::Nothing => {}
        }

        txn.commit().await?;
        log::debug!("User {user_id} {action:?} course {course_id}: {current:?} -> {next:?}");
        Ok(next)
    }

    pub async fn follow(
        db: &DatabaseConnection,
        user_id: i32,
        course_id: i32,
    ) -> Result<Presence, ServiceError> {
        Self::transition(db, user_id, course_id, Action::Follow).await
    }

    pub async fn unfollow(
        db: &DatabaseConnection,
        user_id: i32,
        course_id: i32,
    ) -> Result<Presence, ServiceError> {
        Self::transition(db, user_id, course_id, Action::Unfollow).await
    }

    pub async fn toggle_follow(
        db: &DatabaseConnection,
        user_id: i32,
        course_id: i32,
    ) -> Result<Presence, ServiceError> {
        Self::transition(db, user_id, course_id, Action::Toggle).await
    }

    pub async fn is_following<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        course_id: i32,
    ) -> Result<bool, DbErr> {
        Ok(Self::presence(db, user_id, course_id).await?.is_present())
    }

    /// Courses the user follows, ordered by identifier
    pub async fn courses_followed_by<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<course::Model>, ServiceError> {
        require_user(db, user_id).await?;

        Ok(course::Entity::find()
            .inner_join(followed_course::Entity)
            .filter(followed_course::Column::UserId.eq(user_id))
            .order_by_asc(course::Column::Id)
            .all(db)
            .await?)
    }
}

pub struct LikeService;

impl LikeService {
    async fn presence<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        review_id: i32,
    ) -> Result<Presence, DbErr> {
        let count = like::Entity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::ReviewId.eq(review_id))
            .count(db)
            .await?;

        Ok(Presence::from_exists(count > 0))
    }

    /// Likes the review if the user hasn't yet, otherwise takes the like back
    ///
    /// The review's like counter moves with the like row in the same transaction.
    pub async fn toggle_like(
        db: &DatabaseConnection,
        user_id: i32,
        review_id: i32,
    ) -> Result<Presence, ServiceError> {
        let txn = db.begin().await?;

        require_user(&txn, user_id).await?;
        if review::Entity::find_by_id(review_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Review", review_id));
        }

        let current = Self::presence(&txn, user_id, review_id).await?;
        let (next, effect) = current.transition(Action::Toggle);

        match effect {
            Effect::Insert => {
                like::ActiveModel {
                    id: NotSet,
                    user_id: Set(user_id),
                    review_id: Set(review_id),
                }
                .insert(&txn)
                .await?;
            }
            Effect::Delete => {
                like::Entity::delete_many()
                    .filter(like::Column::UserId.eq(user_id))
                    .filter(like::Column::ReviewId.eq(review_id))
                    .exec(&txn)
                    .await?;
            }
            Effect::Nothing => {}
        }

        let delta = effect.counter_delta();
        if delta != 0 {
            // The counter never goes below zero
            review::Entity::update_many()
                .col_expr(
                    review::Column::LikesNum,
                    Expr::col(review::Column::LikesNum).add(delta),
                )
                .filter(review::Column::Id.eq(review_id))
                .filter(Expr::col(review::Column::LikesNum).add(delta).gte(0))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        log::debug!("User {user_id} toggled like on review {review_id}: {next:?}");
        Ok(next)
    }

    pub async fn is_liked<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        review_id: i32,
    ) -> Result<bool, DbErr> {
        Ok(Self::presence(db, user_id, review_id).await?.is_present())
    }

    pub async fn liked_reviews_by_user<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
    ) -> Result<Vec<review::Model>, ServiceError> {
        require_user(db, user_id).await?;

        Ok(review::Entity::find()
            .inner_join(like::Entity)
            .filter(like::Column::UserId.eq(user_id))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn liked_reviews_by_user_for_course<C: ConnectionTrait>(
        db: &C,
        user_id: i32,
        course_id: i32,
    ) -> Result<Vec<review::Model>, ServiceError> {
        require_user(db, user_id).await?;

        Ok(review::Entity::find()
            .inner_join(like::Entity)
            .filter(like::Column::UserId.eq(user_id))
            .filter(review::Column::CourseId.eq(course_id))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn users_who_liked<C: ConnectionTrait>(
        db: &C,
        review_id: i32,
    ) -> Result<Vec<app_user::Model>, DbErr> {
        app_user::Entity::find()
            .inner_join(like::Entity)
            .filter(like::Column::ReviewId.eq(review_id))
            .order_by_asc(app_user::Column::Id)
            .all(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::ReviewService,
        test_support::{insert_course, insert_user, setup_db},
    };
    use models::review::NewReview;

    async fn post(db: &DatabaseConnection, course_id: i32, user_id: i32) -> review::Model {
        ReviewService::post_review(
            db,
            NewReview {
                course_id,
                user_id,
                rating: 4,
                course_load: 3,
                content: None,
                professor_id: None,
                image: None,
            },
        )
        .await
        .unwrap()
    }

    async fn likes_num(db: &DatabaseConnection, review_id: i32) -> i32 {
        ReviewService::get_review(db, review_id)
            .await
            .unwrap()
            .unwrap()
            .likes_num
    }

    #[tokio::test]
    async fn test_follow_and_unfollow_are_idempotent() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        let user = insert_user(&db, "follower").await;

        assert!(!FollowService::is_following(&db, user.id, 10231).await.unwrap());

        for _ in 0..2 {
            let state = FollowService::follow(&db, user.id, 10231).await.unwrap();
            assert_eq!(state, Presence::Present);
        }
        let followed = FollowService::courses_followed_by(&db, user.id).await.unwrap();
        assert_eq!(followed.len(), 1);
        assert_eq!(followed[0].id, 10231);

        for _ in 0..2 {
            let state = FollowService::unfollow(&db, user.id, 10231).await.unwrap();
            assert_eq!(state, Presence::Absent);
        }
        assert!(!FollowService::is_following(&db, user.id, 10231).await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_follow_twice_restores_state() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        insert_course(&db, 10221, "Data Structures").await;
        let user = insert_user(&db, "follower").await;
        FollowService::follow(&db, user.id, 10221).await.unwrap();

        assert_eq!(
            FollowService::toggle_follow(&db, user.id, 10231).await.unwrap(),
            Presence::Present
        );
        let ids: Vec<i32> = FollowService::courses_followed_by(&db, user.id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![10221, 10231]);

        assert_eq!(
            FollowService::toggle_follow(&db, user.id, 10231).await.unwrap(),
            Presence::Absent
        );
        assert!(!FollowService::is_following(&db, user.id, 10231).await.unwrap());
        assert!(FollowService::is_following(&db, user.id, 10221).await.unwrap());
    }

    #[tokio::test]
    async fn test_follow_insert_tolerates_existing_row() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        let user = insert_user(&db, "follower").await;

        // A second writer that also saw no row inserts after the first one committed
        FollowService::insert_follow(&db, user.id, 10231).await.unwrap();
        FollowService::insert_follow(&db, user.id, 10231).await.unwrap();

        let rows = followed_course::Entity::find()
            .filter(followed_course::Column::UserId.eq(user.id))
            .count(&db)
            .await
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            FollowService::follow(&db, user.id, 10231).await.unwrap(),
            Presence::Present
        );
    }

    #[tokio::test]
    async fn test_follow_requires_course_and_user() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        let user = insert_user(&db, "follower").await;

        let no_course = FollowService::follow(&db, user.id, 4).await;
        assert!(matches!(no_course, Err(ServiceError::NotFound { entity: "Course", .. })));

        let no_user = FollowService::toggle_follow(&db, 99, 10231).await;
        assert!(matches!(no_user, Err(ServiceError::NotFound { entity: "User", .. })));

        let no_follower = FollowService::courses_followed_by(&db, 99).await;
        assert!(matches!(no_follower, Err(ServiceError::NotFound { entity: "User", .. })));
    }

    #[tokio::test]
    async fn test_toggle_like_keeps_counter_in_sync() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        let author = insert_user(&db, "author").await;
        let first = insert_user(&db, "first").await;
        let second = insert_user(&db, "second").await;
        let posted = post(&db, 10231, author.id).await;

        assert_eq!(
            LikeService::toggle_like(&db, first.id, posted.id).await.unwrap(),
            Presence::Present
        );
        assert_eq!(
            LikeService::toggle_like(&db, second.id, posted.id).await.unwrap(),
            Presence::Present
        );
        assert_eq!(likes_num(&db, posted.id).await, 2);

        let likers: Vec<String> = LikeService::users_who_liked(&db, posted.id)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(likers, vec!["first".to_string(), "second".to_string()]);

        assert_eq!(
            LikeService::toggle_like(&db, first.id, posted.id).await.unwrap(),
            Presence::Absent
        );
        assert_eq!(likes_num(&db, posted.id).await, 1);
        assert!(!LikeService::is_liked(&db, first.id, posted.id).await.unwrap());
        assert!(LikeService::is_liked(&db, second.id, posted.id).await.unwrap());

        let missing = LikeService::toggle_like(&db, first.id, 999).await;
        assert!(matches!(missing, Err(ServiceError::NotFound { entity: "Review", .. })));
    }

    #[tokio::test]
    async fn test_liked_reviews_by_user() {
        let db = setup_db().await;
        insert_course(&db, 10231, "Programming 1").await;
        insert_course(&db, 10221, "Data Structures").await;
        let author = insert_user(&db, "author").await;
        let reader = insert_user(&db, "reader").await;

        let on_first = post(&db, 10231, author.id).await;
        let on_second = post(&db, 10221, author.id).await;
        LikeService::toggle_like(&db, reader.id, on_first.id).await.unwrap();
        LikeService::toggle_like(&db, reader.id, on_second.id).await.unwrap();

        let all = LikeService::liked_reviews_by_user(&db, reader.id).await.unwrap();
        assert_eq!(all.len(), 2);

        let for_course = LikeService::liked_reviews_by_user_for_course(&db, reader.id, 10221)
            .await
            .unwrap();
        assert_eq!(for_course.len(), 1);
        assert_eq!(for_course[0].id, on_second.id);
        assert_eq!(for_course[0].likes_num, 1);

        assert!(
            LikeService::liked_reviews_by_user(&db, author.id)
                .await
                .unwrap()
                .is_empty()
        );

        let no_reader = LikeService::liked_reviews_by_user_for_course(&db, 99, 10221).await;
        assert!(matches!(no_reader, Err(ServiceError::NotFound { entity: "User", .. })));
    }
}
