use crate::validation::{
    SCORE_RANGE, ValidationError, check_average, check_non_negative, check_range,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional digits kept for stored averages
pub const AVERAGE_SCALE: u32 = 5;

/// A single 1-5 rating or course-load score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Score(i16);

impl Score {
    pub fn new(field: &'static str, value: i16) -> Result<Self, ValidationError> {
        check_range(field, value, &SCORE_RANGE)?;
        Ok(Self(value))
    }

    pub fn value(self) -> i16 {
        self.0
    }
}

impl From<Score> for Decimal {
    fn from(score: Score) -> Self {
        Decimal::from(score.0)
    }
}

/// Running rating/load statistics owned by a course
///
/// The averages are maintained incrementally: every review folds into the current
/// mean without looking at earlier reviews again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseStats {
    pub avg_load: Option<Decimal>,
    pub avg_rating: Option<Decimal>,
    pub num_of_raters: i32,
    pub num_of_reviewers: i32,
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(AVERAGE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Folds `value` into a mean taken over `count` samples
fn fold_in(mean: Decimal, count: i32, value: Decimal) -> Decimal {
    let count = Decimal::from(count);
    round((mean * count + value) / (count + Decimal::ONE))
}

/// Removes `value` from a mean taken over `count` samples (`count` > 1)
fn fold_out(mean: Decimal, count: i32, value: Decimal) -> Decimal {
    let count = Decimal::from(count);
    round((mean * count - value) / (count - Decimal::ONE))
}

impl CourseStats {
    pub fn is_rated(&self) -> bool {
        self.avg_rating.is_some() && self.avg_load.is_some()
    }

    /// Accounts for one more review
    pub fn apply_review(&mut self, rating: Score, load: Score, has_content: bool) {
        match (self.avg_rating, self.avg_load) {
            (Some(avg_rating), Some(avg_load)) if self.num_of_raters > 0 => {
                self.avg_rating = Some(fold_in(avg_rating, self.num_of_raters, rating.into()));
                self.avg_load = Some(fold_in(avg_load, self.num_of_raters, load.into()));
                self.num_of_raters += 1;
            }
            _ => {
                self.avg_rating = Some(round(rating.into()));
                self.avg_load = Some(round(load.into()));
                self.num_of_raters = 1;
            }
        }

        if has_content {
            self.num_of_reviewers += 1;
        }
    }

    /// Inverse of [`CourseStats::apply_review`], used when a review is removed
    pub fn retract_review(&mut self, rating: Score, load: Score, has_content: bool) {
        match (self.avg_rating, self.avg_load) {
            (Some(avg_rating), Some(avg_load)) if self.num_of_raters > 1 => {
                self.avg_rating = Some(fold_out(avg_rating, self.num_of_raters, rating.into()));
                self.avg_load = Some(fold_out(avg_load, self.num_of_raters, load.into()));
                self.num_of_raters -= 1;
            }
            _ => {
                self.avg_rating = None;
                self.avg_load = None;
                self.num_of_raters = 0;
            }
        }

        if has_content || self.num_of_reviewers > self.num_of_raters {
            self.num_of_reviewers = (self.num_of_reviewers - 1).clamp(0, self.num_of_raters);
        }
    }

    /// Checks the field ranges and the cross-field invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(avg_load) = self.avg_load {
            check_average("avg_load", avg_load)?;
        }
        if let Some(avg_rating) = self.avg_rating {
            check_average("avg_rating", avg_rating)?;
        }
        check_non_negative("num_of_raters", self.num_of_raters)?;
        check_non_negative("num_of_reviewers", self.num_of_reviewers)?;

        if self.avg_load.is_some() != self.avg_rating.is_some() {
            return Err(ValidationError::PartialAverages);
        }
        if self.is_rated() != (self.num_of_raters > 0) {
            return Err(ValidationError::RatersMismatch);
        }
        if self.num_of_reviewers > self.num_of_raters {
            return Err(ValidationError::ReviewersExceedRaters {
                reviewers: self.num_of_reviewers,
                raters: self.num_of_raters,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: i16) -> Score {
        Score::new("score", value).unwrap()
    }

    fn stats(avg_load: Option<Decimal>, avg_rating: Option<Decimal>, raters: i32, reviewers: i32) -> CourseStats {
        CourseStats {
            avg_load,
            avg_rating,
            num_of_raters: raters,
            num_of_reviewers: reviewers,
        }
    }

    #[test]
    fn test_score_range() {
        assert!(Score::new("rating", 0).is_err());
        assert!(Score::new("rating", 6).is_err());
        assert_eq!(Score::new("rating", 3).map(Score::value), Ok(3));
    }

    #[test]
    fn test_first_review_sets_averages() {
        let mut course = CourseStats::default();
        course.apply_review(score(3), score(1), true);

        assert_eq!(course.avg_rating, Some(Decimal::new(300000, 5)));
        assert_eq!(course.avg_load, Some(Decimal::new(100000, 5)));
        assert_eq!(course.num_of_raters, 1);
        assert_eq!(course.num_of_reviewers, 1);
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_review_folds_into_previous_averages() {
        let mut course = stats(Some(Decimal::new(35, 1)), Some(Decimal::from(2)), 13, 5);
        course.apply_review(score(3), score(1), false);

        assert_eq!(course.avg_rating, Some(Decimal::new(207143, 5)));
        assert_eq!(course.avg_load, Some(Decimal::new(332143, 5)));
        assert_eq!(course.num_of_raters, 14);
        assert_eq!(course.num_of_reviewers, 5);
    }

    #[test]
    fn test_review_with_content_counts_reviewer() {
        let mut course = stats(Some(Decimal::new(35, 1)), Some(Decimal::from(2)), 13, 0);
        course.apply_review(score(3), score(1), true);

        assert_eq!(course.avg_rating, Some(Decimal::new(207143, 5)));
        assert_eq!(course.avg_load, Some(Decimal::new(332143, 5)));
        assert_eq!(course.num_of_raters, 14);
        assert_eq!(course.num_of_reviewers, 1);
    }

    #[test]
    fn test_running_average_tracks_true_mean() {
        let reviews: Vec<(i16, i16, bool)> = (0..25)
            .map(|i| ((i * 7 % 5 + 1) as i16, (i * 3 % 5 + 1) as i16, i % 3 == 0))
            .collect();

        let mut course = CourseStats::default();
        let tolerance = Decimal::new(1, 4);

        for (applied, (rating, load, has_content)) in reviews.iter().enumerate() {
            course.apply_review(score(*rating), score(*load), *has_content);

            let seen = &reviews[..=applied];
            let count = Decimal::from(seen.len() as i32);
            let mean_rating = seen.iter().map(|r| Decimal::from(r.0)).sum::<Decimal>() / count;
            let mean_load = seen.iter().map(|r| Decimal::from(r.1)).sum::<Decimal>() / count;

            assert!((course.avg_rating.unwrap() - mean_rating).abs() <= tolerance);
            assert!((course.avg_load.unwrap() - mean_load).abs() <= tolerance);
        }

        assert_eq!(course.num_of_raters, 25);
        assert_eq!(
            course.num_of_reviewers,
            reviews.iter().filter(|r| r.2).count() as i32
        );
        assert!(course.validate().is_ok());
    }

    #[test]
    fn test_retract_review() {
        let mut course = CourseStats::default();
        course.apply_review(score(4), score(2), true);
        course.apply_review(score(2), score(4), false);
        assert_eq!(course.avg_rating, Some(Decimal::from(3)));

        course.retract_review(score(2), score(4), false);
        assert_eq!(course.avg_rating, Some(Decimal::from(4)));
        assert_eq!(course.avg_load, Some(Decimal::from(2)));
        assert_eq!(course.num_of_raters, 1);
        assert_eq!(course.num_of_reviewers, 1);

        course.retract_review(score(4), score(2), true);
        assert_eq!(course, CourseStats::default());
    }

    #[test]
    fn test_validate_invariants() {
        let avg = Some(Decimal::new(35, 1));

        assert!(CourseStats::default().validate().is_ok());
        assert!(stats(avg, Some(Decimal::from(4)), 13, 7).validate().is_ok());

        assert_eq!(
            stats(avg, None, 5, 0).validate(),
            Err(ValidationError::PartialAverages)
        );
        assert_eq!(
            stats(None, Some(Decimal::from(4)), 10, 0).validate(),
            Err(ValidationError::PartialAverages)
        );
        assert_eq!(
            stats(None, None, 2, 0).validate(),
            Err(ValidationError::RatersMismatch)
        );
        assert_eq!(
            stats(avg, Some(Decimal::from(4)), 0, 0).validate(),
            Err(ValidationError::RatersMismatch)
        );
        assert_eq!(
            stats(None, None, 0, 13).validate(),
            Err(ValidationError::ReviewersExceedRaters {
                reviewers: 13,
                raters: 0
            })
        );
        assert!(stats(Some(Decimal::ZERO), Some(Decimal::from(4)), 13, 7).validate().is_err());
        assert!(stats(avg, Some(Decimal::from(7)), 13, 7).validate().is_err());
        assert!(stats(avg, Some(Decimal::from(4)), -1, 7).validate().is_err());
        assert!(stats(avg, Some(Decimal::from(4)), 13, -1).validate().is_err());
    }
}
