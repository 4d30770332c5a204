use models::{course_stats::Score, review::has_content, validation::ValidationError};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub user_id: i32,
    pub professor_id: Option<i32>,
    pub rating: i16,
    pub course_load: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub likes_num: i32,
    pub image: Option<String>,
    pub created_at: DateTime,
}

impl Model {
    pub fn has_content(&self) -> bool {
        has_content(self.content.as_deref())
    }

    /// Stored scores, checked back into the 1-5 range
    pub fn scores(&self) -> Result<(Score, Score), ValidationError> {
        Ok((
            Score::new("rating", self.rating)?,
            Score::new("course_load", self.course_load)?,
        ))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::UserId",
        to = "super::app_user::Column::Id"
    )]
    AppUser,
    #[sea_orm(
        belongs_to = "super::professor::Entity",
        from = "Column::ProfessorId",
        to = "super::professor::Column::Id"
    )]
    Professor,
    #[sea_orm(has_many = "super::like::Entity")]
    Likes,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AppUser.def()
    }
}

impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
