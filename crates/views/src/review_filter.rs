use log::trace;
use models::{Course, Review};
use std::{cmp::Ordering, collections::HashSet, str::FromStr};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Number of reviews shown on a course page before "show all" is pressed
pub const COLLAPSED_REVIEW_COUNT: usize = 8;

/// Orders a review list can be shown in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ReviewSortType {
    #[default]
    #[strum(serialize = "Most Recent")]
    MostRecent,
    #[strum(serialize = "Least Recent")]
    LeastRecent,
    #[strum(serialize = "Highest Rating")]
    HighestRating,
    #[strum(serialize = "Lowest Rating")]
    LowestRating,
    #[strum(serialize = "Hardest")]
    Hardest,
    #[strum(serialize = "Easiest")]
    Easiest,
}

impl ReviewSortType {
    pub fn all() -> Vec<ReviewSortType> {
        ReviewSortType::iter().collect()
    }

    /// Parses a sort label, falling back to [`ReviewSortType::MostRecent`] for unknown labels
    pub fn from_label(label: &str) -> Self {
        Self::from_str(label).unwrap_or_default()
    }

    /// Compares two reviews under this order
    pub fn compare(self, a: &Review, b: &Review) -> Ordering {
        match self {
            ReviewSortType::MostRecent => b.timestamp.cmp(&a.timestamp),
            ReviewSortType::LeastRecent => a.timestamp.cmp(&b.timestamp),
            ReviewSortType::HighestRating => b.rating.cmp(&a.rating),
            ReviewSortType::LowestRating => a.rating.cmp(&b.rating),
            ReviewSortType::Hardest => b.difficulty.cmp(&a.difficulty),
            ReviewSortType::Easiest => a.difficulty.cmp(&b.difficulty),
        }
    }
}

/// The user's current narrowing of a review list.
///
/// Every selection set is vacuously satisfied while empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub sort_by: ReviewSortType,
    /// Lowercased instructor names
    instructors: HashSet<String>,
    pub ratings: HashSet<u8>,
    pub difficulties: HashSet<u8>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort_by: ReviewSortType) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_instructor(mut self, name: &str) -> Self {
        self.instructors.insert(name.to_lowercase());
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.ratings.insert(rating);
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulties.insert(difficulty);
        self
    }

    pub fn has_instructor(&self, name: &str) -> bool {
        self.instructors.contains(&name.to_lowercase())
    }

    /// Whether no filter narrows the list
    pub fn is_unfiltered(&self) -> bool {
        self.instructors.is_empty() && self.ratings.is_empty() && self.difficulties.is_empty()
    }

    /// Resets every criterion to its default
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches_instructor(&self, review: &Review) -> bool {
        self.instructors.is_empty()
            || review
                .instructors
                .iter()
                .any(|name| self.instructors.contains(&name.to_lowercase()))
    }

    fn matches_rating(&self, review: &Review) -> bool {
        self.ratings.is_empty() || self.ratings.contains(&review.rating)
    }

    fn matches_difficulty(&self, review: &Review) -> bool {
        self.difficulties.is_empty() || self.difficulties.contains(&review.difficulty)
    }

    /// Whether a review passes all three filters
    pub fn matches(&self, review: &Review) -> bool {
        self.matches_instructor(review) && self.matches_rating(review) && self.matches_difficulty(review)
    }
}

fn toggle<T: Eq + std::hash::Hash>(set: &mut HashSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Filters and orders reviews
///
/// # Arguments
/// * `reviews` - Every review of the course
/// * `criteria` - The filters and sort order to apply
///
/// # Returns
/// The matching reviews in the requested order; reviews with equal sort keys
/// keep their relative input order
pub fn filter_reviews<'a>(reviews: &'a [Review], criteria: &FilterCriteria) -> Vec<&'a Review> {
    let mut filtered: Vec<&Review> = reviews.iter().filter(|r| criteria.matches(r)).collect();
    filtered.sort_by(|a, b| criteria.sort_by.compare(a, b));

    trace!(
        "{} of {} reviews match, sorted by {}",
        filtered.len(),
        reviews.len(),
        criteria.sort_by
    );

    filtered
}

/// Unique instructor names of a course in first-seen order, the filter's instructor options
pub fn instructor_options(course: &Course) -> Vec<&str> {
    let mut seen = HashSet::new();
    course
        .instructors
        .iter()
        .map(|instructor| instructor.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Filter state of a course page's review list together with its "show all" toggle.
///
/// Changing any criterion collapses the list again.
#[derive(Debug, Clone, Default)]
pub struct ReviewPanel {
    criteria: FilterCriteria,
    show_all: bool,
}

impl ReviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    fn changed(&mut self) {
        self.show_all = false;
    }

    pub fn set_sort(&mut self, sort_by: ReviewSortType) {
        self.criteria.sort_by = sort_by;
        self.changed();
    }

    pub fn toggle_instructor(&mut self, name: &str) {
        toggle(&mut self.criteria.instructors, name.to_lowercase());
        self.changed();
    }

    pub fn toggle_rating(&mut self, rating: u8) {
        toggle(&mut self.criteria.ratings, rating);
        self.changed();
    }

    pub fn toggle_difficulty(&mut self, difficulty: u8) {
        toggle(&mut self.criteria.difficulties, difficulty);
        self.changed();
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
        self.changed();
    }

    /// Every review matching the current criteria, in order
    pub fn visible<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        filter_reviews(reviews, &self.criteria)
    }

    /// The reviews actually on screen: all of them when expanded, otherwise the first few
    pub fn displayed<'a>(&self, reviews: &'a [Review]) -> Vec<&'a Review> {
        let mut visible = self.visible(reviews);
        if !self.show_all {
            visible.truncate(COLLAPSED_REVIEW_COUNT);
        }
        visible
    }
}
