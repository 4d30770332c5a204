use crate::{course_stats::Score, validation::ValidationError};
use serde::{Deserialize, Serialize};

pub const MAX_IMAGE_PATH_LEN: usize = 255;

/// A review as submitted by a user, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub course_id: i32,
    pub user_id: i32,
    pub rating: i16,
    pub course_load: i16,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub professor_id: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Validated scores of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewScores {
    pub rating: Score,
    pub course_load: Score,
    pub has_content: bool,
}

/// Free text counts as content only when it has something besides whitespace
pub fn has_content(content: Option<&str>) -> bool {
    content.is_some_and(|c| !c.trim().is_empty())
}

impl NewReview {
    pub fn has_content(&self) -> bool {
        has_content(self.content.as_deref())
    }

    pub fn validate(&self) -> Result<ReviewScores, ValidationError> {
        if self.course_id <= 0 {
            return Err(ValidationError::Required { field: "course" });
        }
        if self.user_id <= 0 {
            return Err(ValidationError::Required { field: "user" });
        }
        if let Some(image) = &self.image {
            crate::validation::check_text("image", image, MAX_IMAGE_PATH_LEN)?;
        }

        Ok(ReviewScores {
            rating: Score::new("rating", self.rating)?,
            course_load: Score::new("course_load", self.course_load)?,
            has_content: self.has_content(),
        })
    }
}
