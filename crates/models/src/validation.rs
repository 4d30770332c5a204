use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::{fmt::Display, ops::RangeInclusive};
use thiserror::Error;
use url::Url;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[^@\s]+@([a-zA-Z0-9-]+\.)+[a-zA-Z]{2,63}$").unwrap();
    static ref USERNAME: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

/// Smallest and largest value of a single rating or course-load score
pub const SCORE_RANGE: RangeInclusive<i16> = 1..=5;

/// Credit points a course may be worth
pub const CREDIT_POINTS_RANGE: RangeInclusive<i16> = 1..=20;

pub const MAX_COURSE_NAME_LEN: usize = 100;
pub const MAX_SYLLABUS_LEN: usize = 200;
pub const MAX_USERNAME_LEN: usize = 150;

/// Reasons a record is refused before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
        value: String,
    },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must be at most {max} characters long")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} is not a valid {kind}")]
    Malformed {
        field: &'static str,
        kind: &'static str,
    },

    #[error("average rating and average load must be set together")]
    PartialAverages,

    #[error("rater count must be positive exactly when averages are set")]
    RatersMismatch,

    #[error("reviewer count ({reviewers}) exceeds rater count ({raters})")]
    ReviewersExceedRaters { reviewers: i32, raters: i32 },

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Checks that `value` lies within `range`
pub fn check_range<T>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<(), ValidationError>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: range.start().to_string(),
            max: range.end().to_string(),
            value: value.to_string(),
        })
    }
}

/// Range check for a stored average, which lives on the same 1-5 scale as a single score
pub fn check_average(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    let range = Decimal::from(*SCORE_RANGE.start())..=Decimal::from(*SCORE_RANGE.end());
    check_range(field, value, &range)
}

pub fn check_non_negative(field: &'static str, value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        Err(ValidationError::Negative { field })
    } else {
        Ok(())
    }
}

/// Rejects empty (or whitespace only) and overlong text
pub fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

/// Accepts absolute http(s) URLs with a host
pub fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(ValidationError::Malformed { field, kind: "URL" }),
    }
}

pub fn check_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Malformed {
            field,
            kind: "email address",
        })
    }
}

/// Usernames are letters, digits and `@.+-_`
pub fn check_username(value: &str) -> Result<(), ValidationError> {
    check_text("username", value, MAX_USERNAME_LEN)?;
    if USERNAME.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Malformed {
            field: "username",
            kind: "username",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert!(check_range("rating", 1, &SCORE_RANGE).is_ok());
        assert!(check_range("rating", 5, &SCORE_RANGE).is_ok());
        assert_eq!(
            check_range("rating", 6, &SCORE_RANGE),
            Err(ValidationError::OutOfRange {
                field: "rating",
                min: "1".to_string(),
                max: "5".to_string(),
                value: "6".to_string(),
            })
        );
        assert!(check_range("credit_points", 0, &CREDIT_POINTS_RANGE).is_err());
        assert!(check_range("credit_points", 1000, &CREDIT_POINTS_RANGE).is_err());
    }

    #[test]
    fn test_check_average() {
        assert!(check_average("avg_load", Decimal::new(35, 1)).is_ok());
        assert!(check_average("avg_load", Decimal::ZERO).is_err());
        assert!(check_average("avg_rating", Decimal::from(7)).is_err());
    }

    #[test]
    fn test_check_url() {
        assert!(check_url("syllabus", "https://www.google.com").is_ok());
        assert!(check_url("syllabus", "http://localhost:8000/syllabi/10231.pdf").is_ok());
        assert!(check_url("syllabus", "I am not a url").is_err());
        assert!(check_url("syllabus", "please contribute").is_err());
        assert!(check_url("syllabus", "ftp://example.com").is_err());
        assert!(check_url("syllabus", "https://user@docs.example.com:8443/a?b=c@d#e").is_ok());
        assert!(check_url("syllabus", "http://").is_err());
        assert!(check_url("syllabus", "/syllabi/10231.pdf").is_err());
    }

    #[test]
    fn test_check_email() {
        assert!(check_email("email", "user1@mta.ac.il").is_ok());
        assert!(check_email("email", "valid@email.com").is_ok());
        assert!(check_email("email", "user3@").is_err());
        assert!(check_email("email", "no at sign").is_err());
    }

    #[test]
    fn test_check_username() {
        assert!(check_username("testUser1").is_ok());
        assert!(check_username("first.last+tag@uni").is_ok());
        assert_eq!(
            check_username(""),
            Err(ValidationError::Required { field: "username" })
        );
        assert!(check_username("has space").is_err());
        assert!(check_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_check_text() {
        assert!(check_text("name", "Linear Algebra 1", MAX_COURSE_NAME_LEN).is_ok());
        assert!(check_text("name", "   ", MAX_COURSE_NAME_LEN).is_err());
        assert_eq!(
            check_text("name", &"x".repeat(101), MAX_COURSE_NAME_LEN),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100
            })
        );
    }
}
