use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One follow row per (user, course)
        manager
            .create_index(
                Index::create()
                    .name("idx_followed_courses_user_course")
                    .table(FollowedCourses::Table)
                    .col(FollowedCourses::UserId)
                    .col(FollowedCourses::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One like row per (user, review)
        manager
            .create_index(
                Index::create()
                    .name("idx_likes_user_review")
                    .table(Likes::Table)
                    .col(Likes::UserId)
                    .col(Likes::ReviewId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Duplicate-review check looks up (user, course)
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_user_course")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_course_id")
                    .table(Reviews::Table)
                    .col(Reviews::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_likes_review_id")
                    .table(Likes::Table)
                    .col(Likes::ReviewId)
                    .to_owned(),
            )
            .await?;

        // has_prerequisites looks up by target course
        manager
            .create_index(
                Index::create()
                    .name("idx_prerequisites_course_id")
                    .table(Prerequisites::Table)
                    .col(Prerequisites::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_professor_courses_course_id")
                    .table(ProfessorCourses::Table)
                    .col(ProfessorCourses::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_name")
                    .table(Courses::Table)
                    .col(Courses::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_courses_name",
            "idx_professor_courses_course_id",
            "idx_prerequisites_course_id",
            "idx_likes_review_id",
            "idx_reviews_course_id",
            "idx_reviews_user_course",
            "idx_likes_user_review",
            "idx_followed_courses_user_course",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Name,
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    CourseId,
}

#[derive(Iden)]
enum ProfessorCourses {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Reviews {
    Table,
    UserId,
    CourseId,
}

#[derive(Iden)]
enum FollowedCourses {
    Table,
    UserId,
    CourseId,
}

#[derive(Iden)]
enum Likes {
    Table,
    UserId,
    ReviewId,
}
