use models::{course::CourseView, course_stats::CourseStats};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub mandatory: bool,
    pub credit_points: i16,
    pub syllabus: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((6, 5)))", nullable)]
    pub avg_load: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 5)))", nullable)]
    pub avg_rating: Option<Decimal>,
    pub num_of_raters: i32,
    pub num_of_reviewers: i32,
}

impl Model {
    pub fn stats(&self) -> CourseStats {
        CourseStats {
            avg_load: self.avg_load,
            avg_rating: self.avg_rating,
            num_of_raters: self.num_of_raters,
            num_of_reviewers: self.num_of_reviewers,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::followed_course::Entity")]
    FollowedCourses,
    #[sea_orm(has_many = "super::professor_course::Entity")]
    ProfessorCourses,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::followed_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FollowedCourses.def()
    }
}

impl Related<super::professor_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProfessorCourses.def()
    }
}

// Many-to-many relationship with professors
impl Related<super::professor::Entity> for Entity {
    fn to() -> RelationDef {
        super::professor_course::Relation::Professor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::professor_course::Relation::Course.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A stored course together with whether any prerequisite targets it
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseListing {
    #[serde(flatten)]
    pub course: Model,
    pub has_prerequisites: bool,
}

impl CourseView for CourseListing {
    fn id(&self) -> i32 {
        self.course.id
    }

    fn name(&self) -> &str {
        &self.course.name
    }

    fn mandatory(&self) -> bool {
        self.course.mandatory
    }

    fn credit_points(&self) -> i16 {
        self.course.credit_points
    }

    fn syllabus(&self) -> Option<&str> {
        self.course.syllabus.as_deref()
    }

    fn stats(&self) -> CourseStats {
        self.course.stats()
    }

    fn has_prerequisites(&self) -> bool {
        self.has_prerequisites
    }
}
