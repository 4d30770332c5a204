use crate::course::CourseView;
use rust_decimal::Decimal;
use serde::Serialize;
use std::{cmp::Ordering, str::FromStr};
use strum::{AsRefStr, EnumIter, EnumProperty, EnumString};

/// Default threshold of the `rater_num` filter
pub const DEFAULT_MIN_RATERS: i32 = 5;

/// Named course filters, keyed by the value a client submits
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, EnumIter, AsRefStr, EnumProperty,
)]
pub enum CourseFilter {
    #[strum(serialize = "mand", props(label = "mandatory"))]
    Mandatory,
    #[strum(serialize = "elect", props(label = "elective"))]
    Elective,
    #[strum(serialize = "rate_over", props(label = "course rating over 3.5"))]
    RatingOver,
    #[strum(serialize = "load_below", props(label = "course load under 3.5"))]
    LoadBelow,
    #[strum(serialize = "has_preqs", props(label = "with prerequisites"))]
    WithPrerequisites,
    #[strum(serialize = "no_preqs", props(label = "without prerequisites"))]
    WithoutPrerequisites,
    #[strum(serialize = "rater_num")]
    MinRaters,
}

impl CourseFilter {
    pub fn key(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self, min_raters: i32) -> String {
        match self {
            Self::MinRaters => format!("at least {min_raters} raters"),
            _ => self.get_str("label").unwrap_or_default().to_string(),
        }
    }

    /// Rating and load thresholds shared by `rate_over` and `load_below`
    pub fn threshold() -> Decimal {
        Decimal::new(35, 1)
    }

    pub fn matches<T: CourseView>(&self, course: &T, min_raters: i32) -> bool {
        let stats = course.stats();

        match self {
            Self::Mandatory => course.mandatory(),
            Self::Elective => !course.mandatory(),
            Self::RatingOver => stats.avg_rating.is_some_and(|r| r >= Self::threshold()),
            Self::LoadBelow => stats.avg_load.is_some_and(|l| l <= Self::threshold()),
            Self::WithPrerequisites => course.has_prerequisites(),
            Self::WithoutPrerequisites => !course.has_prerequisites(),
            Self::MinRaters => stats.num_of_raters >= min_raters,
        }
    }
}

/// Named course orderings; unknown keys fall back to [`CourseSort::Id`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, EnumString, EnumProperty)]
pub enum CourseSort {
    #[strum(serialize = "name", props(label = "name"))]
    Name,
    #[default]
    #[strum(serialize = "id", props(label = "identifier"))]
    Id,
    #[strum(serialize = "rating", props(label = "course rating"))]
    Rating,
    #[strum(serialize = "load", props(label = "course load"))]
    Load,
    #[strum(serialize = "num_reviews", props(label = "number of reviews"))]
    NumReviews,
    #[strum(serialize = "num_raters", props(label = "number of raters"))]
    NumRaters,
}

/// Orders present values before absent ones, whatever the direction
fn nulls_last(a: Option<Decimal>, b: Option<Decimal>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl CourseSort {
    pub fn label(&self) -> &'static str {
        self.get_str("label").unwrap_or_default()
    }

    /// Parses a sort key, falling back to the identifier ordering
    pub fn from_key(key: &str) -> Self {
        Self::from_str(key).unwrap_or_default()
    }

    pub fn compare<T: CourseView>(&self, a: &T, b: &T) -> Ordering {
        let (sa, sb) = (a.stats(), b.stats());

        match self {
            Self::Name => a.name().cmp(b.name()),
            Self::Id => a.id().cmp(&b.id()),
            Self::Rating => nulls_last(sa.avg_rating, sb.avg_rating, true),
            Self::Load => nulls_last(sa.avg_load, sb.avg_load, false),
            Self::NumReviews => sb.num_of_reviewers.cmp(&sa.num_of_reviewers),
            Self::NumRaters => sb.num_of_raters.cmp(&sa.num_of_raters),
        }
    }
}

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Result of evaluating a [`CourseQuery`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome<T> {
    pub result: Vec<T>,
    /// Labels of the filters that took part, in the order they were requested
    pub active: Vec<String>,
    /// Label of the ordering that was applied
    pub sort: String,
}

/// A base collection of courses plus the predicates and ordering to evaluate over it
///
/// Nothing is filtered or sorted until [`CourseQuery::evaluate`] runs, which does a single
/// pass over the base collection.
pub struct CourseQuery<T> {
    base: Vec<T>,
    predicates: Vec<Predicate<T>>,
    comparator: Option<Comparator<T>>,
    applied: Vec<CourseFilter>,
    active: Vec<String>,
    sort: Option<String>,
    min_raters: i32,
}

impl<T: CourseView + 'static> CourseQuery<T> {
    pub fn new(base: Vec<T>) -> Self {
        Self {
            base,
            predicates: Vec::new(),
            comparator: None,
            applied: Vec::new(),
            active: Vec::new(),
            sort: None,
            min_raters: DEFAULT_MIN_RATERS,
        }
    }

    /// Threshold for the `rater_num` filter; applies to filters added afterwards
    pub fn min_raters(mut self, min_raters: i32) -> Self {
        self.min_raters = min_raters;
        self
    }

    /// Adds an unlabelled predicate
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Adds a named filter; adding the same filter twice has no further effect
    pub fn apply_filter(mut self, filter: CourseFilter) -> Self {
        if self.applied.contains(&filter) {
            return self;
        }

        let min_raters = self.min_raters;
        self.applied.push(filter);
        self.active.push(filter.label(min_raters));
        self.filter(move |course| filter.matches(course, min_raters))
    }

    /// Adds every recognized filter key, ignoring the rest
    pub fn filter_by<S: AsRef<str>>(self, keys: &[S]) -> Self {
        keys.iter()
            .filter_map(|key| CourseFilter::from_str(key.as_ref()).ok())
            .fold(self, |query, filter| query.apply_filter(filter))
    }

    /// Replaces the ordering with a custom comparator
    pub fn order_by<F>(mut self, label: impl Into<String>, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Box::new(comparator));
        self.sort = Some(label.into());
        self
    }

    pub fn sort_by(self, sort: CourseSort) -> Self {
        self.order_by(sort.label(), move |a, b| sort.compare(a, b))
    }

    /// Applies the last of the given sort keys; unknown keys sort by identifier
    pub fn sort_by_keys<S: AsRef<str>>(self, keys: &[S]) -> Self {
        match keys.last() {
            Some(key) => self.sort_by(CourseSort::from_key(key.as_ref())),
            None => self,
        }
    }

    pub fn evaluate(self) -> QueryOutcome<T> {
        let predicates = self.predicates;
        let mut result: Vec<T> = self
            .base
            .into_iter()
            .filter(|course| predicates.iter().all(|predicate| predicate(course)))
            .collect();

        let sort = match self.comparator {
            Some(comparator) => {
                result.sort_by(|a, b| comparator(a, b).then_with(|| a.id().cmp(&b.id())));
                self.sort.unwrap_or_default()
            }
            None => {
                result.sort_by(|a, b| CourseSort::Id.compare(a, b));
                CourseSort::Id.label().to_string()
            }
        };

        QueryOutcome {
            result,
            active: self.active,
            sort,
        }
    }
}
