use crate::{
    course_stats::CourseStats,
    validation::{
        CREDIT_POINTS_RANGE, MAX_COURSE_NAME_LEN, MAX_SYLLABUS_LEN, ValidationError, check_range,
        check_text, check_url,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Read access to a course, shared by stored rows and in-memory fixtures
pub trait CourseView {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
    fn mandatory(&self) -> bool;
    fn credit_points(&self) -> i16;
    fn syllabus(&self) -> Option<&str>;
    fn stats(&self) -> CourseStats;
    /// Whether at least one prerequisite names this course as its target
    fn has_prerequisites(&self) -> bool;
}

/// A course as submitted for creation or import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCourse {
    pub id: i32,
    pub name: String,
    pub mandatory: bool,
    pub credit_points: i16,
    #[serde(default)]
    pub syllabus: Option<String>,
    #[serde(flatten)]
    pub stats: CourseStats,
}

impl NewCourse {
    pub fn new(id: i32, name: impl Into<String>, mandatory: bool, credit_points: i16) -> Self {
        Self {
            id,
            name: name.into(),
            mandatory,
            credit_points,
            syllabus: None,
            stats: CourseStats::default(),
        }
    }

    pub fn with_syllabus(mut self, syllabus: impl Into<String>) -> Self {
        self.syllabus = Some(syllabus.into());
        self
    }

    pub fn with_stats(mut self, stats: CourseStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("id", self.id, &(1..=i32::MAX))?;
        check_text("name", &self.name, MAX_COURSE_NAME_LEN)?;
        check_range("credit_points", self.credit_points, &CREDIT_POINTS_RANGE)?;

        if let Some(syllabus) = &self.syllabus {
            check_text("syllabus", syllabus, MAX_SYLLABUS_LEN)?;
            check_url("syllabus", syllabus)?;
        }

        self.stats.validate()
    }
}

/// Multi-line, human readable rendering of a course
pub struct CourseSummary<'a, T: CourseView>(pub &'a T);

fn fmt_average(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

impl<T: CourseView> Display for CourseSummary<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let course = self.0;
        let stats = course.stats();

        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "Course identifier: {}", course.id())?;
        writeln!(f, "Name: {}", course.name())?;
        writeln!(
            f,
            "Mandatory? {}",
            if course.mandatory() { "yes" } else { "no" }
        )?;
        writeln!(f, "Credit Points: {}", course.credit_points())?;
        writeln!(f, "Syllabus: {}", course.syllabus().unwrap_or("N/A"))?;
        writeln!(
            f,
            "Average Rating: {} \tAverage Load: {}\t{} Raters",
            fmt_average(stats.avg_rating),
            fmt_average(stats.avg_load),
            stats.num_of_raters
        )?;
        writeln!(f, "Number Of Reviews: {}", stats.num_of_reviewers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture(NewCourse);

    impl CourseView for Fixture {
        fn id(&self) -> i32 {
            self.0.id
        }
        fn name(&self) -> &str {
            &self.0.name
        }
        fn mandatory(&self) -> bool {
            self.0.mandatory
        }
        fn credit_points(&self) -> i16 {
            self.0.credit_points
        }
        fn syllabus(&self) -> Option<&str> {
            self.0.syllabus.as_deref()
        }
        fn stats(&self) -> CourseStats {
            self.0.stats
        }
        fn has_prerequisites(&self) -> bool {
            false
        }
    }

    fn rated(avg_load: Decimal, avg_rating: Decimal, raters: i32, reviewers: i32) -> CourseStats {
        CourseStats {
            avg_load: Some(avg_load),
            avg_rating: Some(avg_rating),
            num_of_raters: raters,
            num_of_reviewers: reviewers,
        }
    }

    #[test]
    fn test_valid_courses() {
        let base = NewCourse::new(1, "Linear Algebra 1", true, 4);
        assert!(base.validate().is_ok());
        assert!(
            base.clone()
                .with_syllabus("https://www.google.com")
                .validate()
                .is_ok()
        );
        assert!(
            base.with_stats(rated(Decimal::new(35, 1), Decimal::from(4), 13, 7))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_courses() {
        let stats = rated(Decimal::new(35, 1), Decimal::from(4), 13, 7);
        let invalid = [
            NewCourse::new(-1, "Linear Algebra 1", true, 4).with_stats(stats),
            NewCourse::new(1, "Linear Algebra 1", true, 0).with_stats(stats),
            NewCourse::new(1, "Linear Algebra 1", true, 1000).with_stats(stats),
            NewCourse::new(1, "", true, 4),
            NewCourse::new(1, "Linear Algebra 1", true, 4)
                .with_syllabus("I am not a url")
                .with_stats(stats),
        ];

        for course in invalid {
            assert!(course.validate().is_err(), "{course:?} should be rejected");
        }
    }

    #[test]
    fn test_deserialize_flattened_stats() {
        let json = r#"{
            "id": 10231,
            "name": "UnFogging the Future",
            "mandatory": true,
            "credit_points": 4,
            "avg_load": "3.25",
            "avg_rating": "1.5",
            "num_of_raters": 12,
            "num_of_reviewers": 12
        }"#;
        let course: NewCourse = serde_json::from_str(json).unwrap();

        assert_eq!(course.id, 10231);
        assert_eq!(course.syllabus, None);
        assert_eq!(course.stats.avg_load, Some(Decimal::new(325, 2)));
        assert_eq!(course.stats.num_of_raters, 12);
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_summary() {
        let course = Fixture(
            NewCourse::new(1, "Linear Algebra 1", true, 4)
                .with_stats(rated(Decimal::new(35, 1), Decimal::from(4), 13, 7)),
        );

        let expected = format!(
            "{}\nCourse identifier: 1\nName: Linear Algebra 1\nMandatory? yes\n\
             Credit Points: 4\nSyllabus: N/A\n\
             Average Rating: 4.000 \tAverage Load: 3.500\t13 Raters\nNumber Of Reviews: 7\n",
            "-".repeat(60)
        );
        assert_eq!(CourseSummary(&course).to_string(), expected);
    }

    #[test]
    fn test_summary_without_ratings() {
        let course = Fixture(NewCourse::new(10340, "No Return - through the Lense", true, 4));
        let summary = CourseSummary(&course).to_string();

        assert!(summary.contains("Average Rating: N/A \tAverage Load: N/A\t0 Raters\n"));
        assert!(summary.ends_with("Number Of Reviews: 0\n"));
    }
}
