use models::requirement::RequirementCode;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `required_course_id` relates to `course_id` as described by `req_code`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prerequisites")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub required_course_id: i32,
    #[sea_orm(column_type = "SmallInteger")]
    pub req_code: RequirementCode,
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
        belongs_to = "super::course::Entity",
        from = "Column::RequiredCourseId",
        to = "super::course::Column::Id"
    )]
    RequiredCourse,
}

impl ActiveModelBehavior for ActiveModel {}
