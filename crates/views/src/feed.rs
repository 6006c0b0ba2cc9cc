use crate::{
    alert::Alert,
    pagination::{PageOutcome, Paginator},
    review_card::ReviewCard,
    text::time_since,
};
use chrono::{DateTime, Utc};
use log::warn;
use models::{
    Review,
    course::{course_path, splice_course_code},
};
use std::{fmt::Display, future::Future};

pub const END_OF_FEED: &str = "No more reviews to show";

/// One page of the global review feed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FeedPage {
    pub reviews: Vec<Review>,
    /// Only reported when requested, i.e. for the first page
    pub unique_user_count: Option<u64>,
}

/// The remote side of the review feed
pub trait FeedSource {
    type Error: Display;

    /// Fetches reviews newest first
    fn fetch_feed(
        &self,
        offset: usize,
        limit: usize,
        with_user_count: bool,
    ) -> impl Future<Output = Result<FeedPage, Self::Error>>;
}

/// A review in the feed, headed by its course
#[derive(Debug, Clone)]
pub struct FeedEntry<'a> {
    pub heading: String,
    pub course_path: String,
    pub posted: String,
    pub card: ReviewCard<'a>,
}

/// Formats `n` with comma thousands separators
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// The newest reviews across all courses, loaded page by page
#[derive(Debug, Clone, Default)]
pub struct ReviewFeed {
    reviews: Paginator<Review>,
    unique_user_count: Option<u64>,
    error: Option<Alert>,
}

impl ReviewFeed {
    pub fn new(page_size: usize) -> Self {
        Self {
            reviews: Paginator::new(page_size),
            ..Default::default()
        }
    }

    /// Loads the first page together with the reviewer count
    pub async fn load<S>(&mut self, source: &S) -> PageOutcome
    where
        S: FeedSource,
    {
        let request = self.reviews.begin_first();

        match source
            .fetch_feed(request.offset, request.limit, true)
            .await
        {
            Ok(page) => {
                let outcome = self.reviews.apply(request, page.reviews);
                if outcome != PageOutcome::Stale {
                    self.unique_user_count = page.unique_user_count;
                }
                outcome
            }
            Err(err) => {
                warn!("failed to fetch review feed: {err}");
                self.reviews.cancel(request);
                self.error = Some(Alert::error(
                    "Failed to fetch reviews. Please try again later.",
                ));
                PageOutcome::Skipped
            }
        }
    }

    /// Appends the next page, if there is one
    pub async fn fetch_more<S>(&mut self, source: &S) -> Result<PageOutcome, S::Error>
    where
        S: FeedSource,
    {
        let Some(request) = self.reviews.begin_next() else {
            return Ok(PageOutcome::Skipped);
        };

        let page = source
            .fetch_feed(request.offset, request.limit, false)
            .await?;

        Ok(self.reviews.apply(request, page.reviews))
    }

    /// The feed is shown once both the first page and the count arrived
    pub fn is_ready(&self) -> bool {
        self.unique_user_count.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.reviews.has_more()
    }

    pub fn error(&self) -> Option<&Alert> {
        self.error.as_ref()
    }

    pub fn tagline(&self) -> Option<String> {
        self.unique_user_count.map(|count| {
            format!(
                "Check out what {} people have said about courses at McGill University.",
                group_thousands(count)
            )
        })
    }

    pub fn entries(&self, now: DateTime<Utc>) -> Vec<FeedEntry<'_>> {
        self.reviews
            .items()
            .iter()
            .map(|review| FeedEntry {
                heading: splice_course_code(&review.course_id, " "),
                course_path: course_path(&review.course_id),
                posted: time_since(review.timestamp, now),
                card: ReviewCard::new(review),
            })
            .collect()
    }

    /// Text under the last entry once the feed is exhausted
    pub fn footer(&self) -> Option<&'static str> {
        (!self.has_more() && !self.reviews.items().is_empty()).then_some(END_OF_FEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;

    struct Pages {
        pages: RefCell<Vec<Vec<Review>>>,
        counted: RefCell<Vec<bool>>,
    }

    impl FeedSource for Pages {
        type Error = String;

        async fn fetch_feed(
            &self,
            _offset: usize,
            _limit: usize,
            with_user_count: bool,
        ) -> Result<FeedPage, String> {
            self.counted.borrow_mut().push(with_user_count);
            let mut pages = self.pages.borrow_mut();
            if pages.is_empty() {
                return Err("Service Unavailable".into());
            }

            Ok(FeedPage {
                reviews: pages.remove(0),
                unique_user_count: with_user_count.then_some(12_345),
            })
        }
    }

    fn review(course_id: &str, posted: DateTime<Utc>) -> Review {
        Review {
            id: None,
            content: "Great course".into(),
            course_id: course_id.into(),
            instructors: vec![],
            rating: 5,
            difficulty: 1,
            timestamp: posted,
            user_id: "someone".into(),
            likes: 0,
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[tokio::test]
    async fn test_feed_until_exhausted() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let source = Pages {
            pages: RefCell::new(vec![
                vec![review("COMP202", now - Duration::days(3))],
                vec![],
            ]),
            counted: RefCell::new(vec![]),
        };
        let mut feed = ReviewFeed::new(1);

        assert!(!feed.is_ready());
        assert_eq!(feed.load(&source).await, PageOutcome::Replaced(1));
        assert!(feed.is_ready());
        assert_eq!(
            feed.tagline().unwrap(),
            "Check out what 12,345 people have said about courses at McGill University."
        );
        assert_eq!(feed.footer(), None);

        assert_eq!(feed.fetch_more(&source).await, Ok(PageOutcome::Exhausted));
        assert_eq!(feed.footer(), Some(END_OF_FEED));
        assert_eq!(*source.counted.borrow(), [true, false]);

        let entries = feed.entries(now);
        assert_eq!(entries[0].heading, "COMP 202");
        assert_eq!(entries[0].course_path, "/course/comp-202");
        assert_eq!(entries[0].posted, "3 days ago");
    }

    #[tokio::test]
    async fn test_failed_load_sets_error() {
        let source = Pages {
            pages: RefCell::new(vec![]),
            counted: RefCell::new(vec![]),
        };
        let mut feed = ReviewFeed::new(20);

        assert_eq!(feed.load(&source).await, PageOutcome::Skipped);
        assert!(!feed.is_ready());
        assert_eq!(
            feed.error().map(Alert::message),
            Some("Failed to fetch reviews. Please try again later.")
        );
        let now = Utc::now();
        source.pages.borrow_mut().push(vec![review("MATH240", now)]);
        assert_eq!(feed.fetch_more(&source).await, Ok(PageOutcome::Appended(1)));
        assert_eq!(*source.counted.borrow(), [true, false]);
        assert_eq!(feed.entries(now)[0].heading, "MATH 240");
    }
}
