use crate::dtos::review::ReviewResponse;
use database::{
    entities::{
        course::{self, CourseListing},
        professor,
    },
    services::course::{CourseDetails, PrerequisiteEntry},
};
use models::{course::NewCourse, course_query::QueryOutcome};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: i32,
    pub name: String,
    pub mandatory: bool,
    pub credit_points: i16,
    pub syllabus: Option<String>,
    pub avg_load: Option<Decimal>,
    pub avg_rating: Option<Decimal>,
    pub num_of_raters: i32,
    pub num_of_reviewers: i32,
}

impl From<course::Model> for CourseResponse {
    fn from(course: course::Model) -> Self {
        Self {
            id: course.id,
            name: course.name,
            mandatory: course.mandatory,
            credit_points: course.credit_points,
            syllabus: course.syllabus,
            avg_load: course.avg_load,
            avg_rating: course.avg_rating,
            num_of_raters: course.num_of_raters,
            num_of_reviewers: course.num_of_reviewers,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListItem {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub has_prerequisites: bool,
}

impl From<CourseListing> for CourseListItem {
    fn from(listing: CourseListing) -> Self {
        Self {
            has_prerequisites: listing.has_prerequisites,
            course: listing.course.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseQueryResponse {
    pub courses: Vec<CourseListItem>,
    /// Labels of the filters that were applied
    pub active_filters: Vec<String>,
    /// Label of the ordering that was applied
    pub sort: String,
}

impl From<QueryOutcome<CourseListing>> for CourseQueryResponse {
    fn from(outcome: QueryOutcome<CourseListing>) -> Self {
        Self {
            courses: outcome.result.into_iter().map(Into::into).collect(),
            active_filters: outcome.active,
            sort: outcome.sort,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseQueryParams {
    /// Comma separated filter keys: mand, elect, rate_over, load_below, has_preqs, no_preqs,
    /// rater_num
    pub filter_by: Option<String>,
    /// Sort key: name, id, rating, load, num_reviews, num_raters
    pub sort_by: Option<String>,
}

impl CourseQueryParams {
    pub fn filter_keys(&self) -> Vec<&str> {
        split_keys(self.filter_by.as_deref())
    }

    pub fn sort_keys(&self) -> Vec<&str> {
        split_keys(self.sort_by.as_deref())
    }
}

fn split_keys(raw: Option<&str>) -> Vec<&str> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseSearchParams {
    /// Case-insensitive part of the course name
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub id: i32,
    pub name: String,
    pub mandatory: bool,
    pub credit_points: i16,
    #[serde(default)]
    pub syllabus: Option<String>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(request: CreateCourseRequest) -> Self {
        let course = NewCourse::new(
            request.id,
            request.name,
            request.mandatory,
            request.credit_points,
        );

        match request.syllabus {
            Some(syllabus) => course.with_syllabus(syllabus),
            None => course,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PrerequisiteResponse {
    pub required_course_id: i32,
    pub required_course_name: String,
    /// -2 none, -1 can't be taken together, 0 same time or before, 1 before
    pub code: i16,
    pub requirement: String,
}

impl From<PrerequisiteEntry> for PrerequisiteResponse {
    fn from(entry: PrerequisiteEntry) -> Self {
        Self {
            required_course_id: entry.required_course_id,
            required_course_name: entry.required_course_name,
            code: entry.requirement.code(),
            requirement: entry.requirement.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfessorResponse {
    pub id: i32,
    pub name: String,
}

impl From<professor::Model> for ProfessorResponse {
    fn from(professor: professor::Model) -> Self {
        Self {
            id: professor.id,
            name: professor.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailsResponse {
    #[serde(flatten)]
    pub course: CourseListItem,
    pub prerequisites: Vec<PrerequisiteResponse>,
    pub professors: Vec<ProfessorResponse>,
    pub reviews: Vec<ReviewResponse>,
}

impl From<CourseDetails> for CourseDetailsResponse {
    fn from(details: CourseDetails) -> Self {
        Self {
            course: details.course.into(),
            prerequisites: details.prerequisites.into_iter().map(Into::into).collect(),
            professors: details.professors.into_iter().map(Into::into).collect(),
            reviews: details.reviews.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keys() {
        let params = CourseQueryParams {
            filter_by: Some("mand, rate_over,,bogus".to_string()),
            sort_by: None,
        };

        assert_eq!(params.filter_keys(), vec!["mand", "rate_over", "bogus"]);
        assert!(params.sort_keys().is_empty());
    }
}
