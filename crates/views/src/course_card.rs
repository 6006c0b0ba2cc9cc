use crate::{
    terms::{TermBadge, term_badges},
    text::truncate,
};
use models::Course;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Course descriptions longer than this are cut on listing cards
pub const DESCRIPTION_PREVIEW_CHARS: usize = 400;

/// A run of description text, highlighted when it matches the search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn highlight(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Splits `text` around case-insensitive occurrences of `query`
fn highlight_segments(text: &str, query: &Regex) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for found in query.find_iter(text) {
        if found.start() > last {
            segments.push(Segment::plain(&text[last..found.start()]));
        }
        segments.push(Segment::highlight(found.as_str()));
        last = found.end();
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

/// A course as listed on the explore page and in search results
#[derive(Debug, Clone)]
pub struct CourseCard<'a> {
    pub course: &'a Course,
    query: Option<Regex>,
}

impl<'a> CourseCard<'a> {
    pub fn new(course: &'a Course) -> Self {
        Self {
            course,
            query: None,
        }
    }

    /// Highlights occurrences of a search query in the description
    pub fn with_query(mut self, query: &str) -> Self {
        let query = query.trim();
        self.query = (!query.is_empty())
            .then(|| {
                RegexBuilder::new(&regex::escape(query))
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .flatten();
        self
    }

    /// Heading such as `COMP 202 - Foundations of Programming`
    pub fn heading(&self) -> String {
        format!("{} - {}", self.course.display_code(), self.course.title)
    }

    pub fn path(&self) -> String {
        self.course.path()
    }

    pub fn badges(&self) -> Vec<TermBadge<'a>> {
        term_badges(self.course)
    }

    /// The description, cut to the preview length
    pub fn description(&self) -> Cow<'a, str> {
        let description = self.course.description.as_str();

        match truncate(description, DESCRIPTION_PREVIEW_CHARS) {
            Some(preview) => Cow::Owned(format!("{preview} ...")),
            None => Cow::Borrowed(description),
        }
    }

    /// The previewed description split into highlighted and plain runs
    pub fn description_segments(&self) -> Vec<Segment> {
        let description = self.description();

        match &self.query {
            Some(query) => highlight_segments(&description, query),
            None => vec![Segment::plain(&description)],
        }
    }
}

/// Rating summary shown on a course page
#[derive(Debug, Clone, PartialEq)]
pub enum RatingSummary {
    /// Average rating with the two chart slices (rating, remainder out of 5)
    Rated { label: String, slices: (f64, f64) },
    NoReviews,
}

impl RatingSummary {
    pub const NO_REVIEWS: &'static str =
        "No reviews have been left for this course yet. Be the first!";

    pub fn new(rating: f64, num_reviews: usize) -> Self {
        if num_reviews == 0 {
            return RatingSummary::NoReviews;
        }

        let rounded = (rating * 100.0).round() / 100.0;
        RatingSummary::Rated {
            label: format!("{rounded} / 5"),
            slices: (rating, 5.0 - rating),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            RatingSummary::Rated { label, .. } => label,
            RatingSummary::NoReviews => Self::NO_REVIEWS,
        }
    }
}
