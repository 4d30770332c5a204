use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Course identifiers come from the college, so they are not generated
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Mandatory).boolean().not_null())
                    .col(ColumnDef::new(Courses::CreditPoints).small_integer().not_null())
                    .col(ColumnDef::new(Courses::Syllabus).string_len(200))
                    .col(ColumnDef::new(Courses::AvgLoad).decimal_len(6, 5))
                    .col(ColumnDef::new(Courses::AvgRating).decimal_len(6, 5))
                    .col(
                        ColumnDef::new(Courses::NumOfRaters)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courses::NumOfReviewers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AppUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUsers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppUsers::Username)
                            .string_len(150)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AppUsers::Email).string().not_null())
                    // NULL marks an unusable password
                    .col(ColumnDef::new(AppUsers::PasswordHash).string())
                    .col(
                        ColumnDef::new(AppUsers::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(AppUsers::DateJoined).date_time().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Professors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Professors::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProfessorCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProfessorCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProfessorCourses::ProfessorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProfessorCourses::CourseId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_courses-professor_id")
                            .from(ProfessorCourses::Table, ProfessorCourses::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-professor_courses-course_id")
                            .from(ProfessorCourses::Table, ProfessorCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prerequisites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prerequisites::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prerequisites::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(Prerequisites::RequiredCourseId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prerequisites::ReqCode)
                            .small_integer()
                            .not_null()
                            .default(-2),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-prerequisites-course_id")
                            .from(Prerequisites::Table, Prerequisites::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-prerequisites-required_course_id")
                            .from(Prerequisites::Table, Prerequisites::RequiredCourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::CourseId).integer().not_null())
                    .col(ColumnDef::new(Reviews::UserId).integer().not_null())
                    .col(ColumnDef::new(Reviews::ProfessorId).integer())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::CourseLoad).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Content).text())
                    .col(
                        ColumnDef::new(Reviews::LikesNum)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Reviews::Image).string_len(255))
                    .col(ColumnDef::new(Reviews::CreatedAt).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-course_id")
                            .from(Reviews::Table, Reviews::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(AppUsers::Table, AppUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reviews-professor_id")
                            .from(Reviews::Table, Reviews::ProfessorId)
                            .to(Professors::Table, Professors::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FollowedCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FollowedCourses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FollowedCourses::UserId).integer().not_null())
                    .col(ColumnDef::new(FollowedCourses::CourseId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-followed_courses-user_id")
                            .from(FollowedCourses::Table, FollowedCourses::UserId)
                            .to(AppUsers::Table, AppUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-followed_courses-course_id")
                            .from(FollowedCourses::Table, FollowedCourses::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Likes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Likes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Likes::UserId).integer().not_null())
                    .col(ColumnDef::new(Likes::ReviewId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-likes-user_id")
                            .from(Likes::Table, Likes::UserId)
                            .to(AppUsers::Table, AppUsers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-likes-review_id")
                            .from(Likes::Table, Likes::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Likes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FollowedCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Prerequisites::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProfessorCourses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AppUsers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Mandatory,
    CreditPoints,
    Syllabus,
    AvgLoad,
    AvgRating,
    NumOfRaters,
    NumOfReviewers,
}

#[derive(Iden)]
enum AppUsers {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    IsActive,
    DateJoined,
}

#[derive(Iden)]
enum Professors {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ProfessorCourses {
    Table,
    Id,
    ProfessorId,
    CourseId,
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    Id,
    CourseId,
    RequiredCourseId,
    ReqCode,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    CourseId,
    UserId,
    ProfessorId,
    Rating,
    CourseLoad,
    Content,
    LikesNum,
    Image,
    CreatedAt,
}

#[derive(Iden)]
enum FollowedCourses {
    Table,
    Id,
    UserId,
    CourseId,
}

#[derive(Iden)]
enum Likes {
    Table,
    Id,
    UserId,
    ReviewId,
}
