use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::professor_course::Entity")]
    ProfessorCourses,
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::professor_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfessorCourses.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

// Many-to-many relationship with courses
impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_course::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::professor_course::Relation::Professor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
