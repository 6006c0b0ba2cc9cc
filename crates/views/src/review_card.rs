use crate::text::truncate;
use models::{Review, course::course_path};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

/// Reviews at least this long are collapsed until "show more" is pressed
pub const REVIEW_PREVIEW_CHARS: usize = 300;

/// Characters left unescaped in a path component, matching browsers' `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Route of an instructor's page
pub fn instructor_path(name: &str) -> String {
    format!("/instructor/{}", utf8_percent_encode(name, COMPONENT))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructorLink<'a> {
    pub name: &'a str,
    pub to: String,
    /// Text following the name: `", "`, `" and "` or nothing
    pub separator: &'static str,
}

/// Footer line of a review card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribution<'a> {
    /// "Taught by ..." with one link per instructor
    TaughtBy(Vec<InstructorLink<'a>>),
    /// "Written for ..." linking back to the course
    WrittenFor { course_id: &'a str, to: String },
}

impl Attribution<'_> {
    pub fn to_text(&self) -> String {
        match self {
            Attribution::TaughtBy(links) => links.iter().fold(
                String::from("Taught by "),
                |mut text, link| {
                    text.push_str(link.name);
                    text.push_str(link.separator);
                    text
                },
            ),
            Attribution::WrittenFor { course_id, .. } => format!("Written for {course_id}"),
        }
    }
}

/// Joins instructor names as `A`, `A and B` or `A, B and C`
fn instructor_links(instructors: &[String]) -> Vec<InstructorLink<'_>> {
    let count = instructors.len();

    instructors
        .iter()
        .enumerate()
        .map(|(i, name)| InstructorLink {
            name: name.as_str(),
            to: instructor_path(name),
            separator: if i + 2 == count {
                " and "
            } else if i + 2 < count {
                ", "
            } else {
                ""
            },
        })
        .collect()
}

/// A single review as shown in a list
#[derive(Debug, Clone)]
pub struct ReviewCard<'a> {
    pub review: &'a Review,
    /// The viewer wrote this review and may edit or delete it
    pub can_modify: bool,
    /// Show the instructors rather than the course in the footer
    pub include_taught_by: bool,
    read_more: bool,
}

impl<'a> ReviewCard<'a> {
    pub fn new(review: &'a Review) -> Self {
        Self {
            review,
            can_modify: false,
            include_taught_by: true,
            read_more: false,
        }
    }

    pub fn modifiable(mut self, can_modify: bool) -> Self {
        self.can_modify = can_modify;
        self
    }

    pub fn taught_by(mut self, include_taught_by: bool) -> Self {
        self.include_taught_by = include_taught_by;
        self
    }

    /// Whether the content is long enough to be collapsed
    pub fn is_long(&self) -> bool {
        self.review.content.chars().count() >= REVIEW_PREVIEW_CHARS
    }

    /// Whether the "show more" button is shown
    pub fn can_show_more(&self) -> bool {
        self.is_long() && !self.read_more
    }

    pub fn show_more(&mut self) {
        self.read_more = true;
    }

    /// The review text as currently displayed
    pub fn content(&self) -> Cow<'a, str> {
        let content = self.review.content.as_str();

        if !self.can_show_more() {
            return Cow::Borrowed(content);
        }

        let preview = truncate(content, REVIEW_PREVIEW_CHARS).unwrap_or(content);
        Cow::Owned(format!("{preview}..."))
    }

    /// Date the review was written, e.g. `09/14/2023`
    pub fn date(&self) -> String {
        self.review.timestamp.format("%m/%d/%Y").to_string()
    }

    pub fn attribution(&self) -> Attribution<'a> {
        if self.include_taught_by {
            Attribution::TaughtBy(instructor_links(&self.review.instructors))
        } else {
            Attribution::WrittenFor {
                course_id: self.review.course_id.as_str(),
                to: course_path(&self.review.course_id),
            }
        }
    }

    /// Text of the confirmation shown before deleting the review
    pub fn delete_prompt(&self) -> String {
        format!(
            "Are you sure you want to delete your review of {}? ",
            self.review.course_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(content: &str, instructors: &[&str]) -> Review {
        Review {
            id: None,
            content: content.to_string(),
            course_id: "COMP202".into(),
            instructors: instructors.iter().map(|i| i.to_string()).collect(),
            rating: 4,
            difficulty: 2,
            timestamp: Utc.with_ymd_and_hms(2023, 9, 14, 12, 0, 0).unwrap(),
            user_id: "u1".into(),
            likes: 0,
        }
    }

    #[test]
    fn test_long_content_is_truncated_until_show_more() {
        let long = "a".repeat(450);
        let review = sample(&long, &[]);
        let mut card = ReviewCard::new(&review);

        assert!(card.can_show_more());
        assert_eq!(card.content(), format!("{}...", "a".repeat(300)));

        card.show_more();
        assert!(!card.can_show_more());
        assert_eq!(card.content(), long);
    }

    #[test]
    fn test_content_at_the_limit_is_collapsed() {
        let review = sample(&"b".repeat(300), &[]);
        let card = ReviewCard::new(&review);
        assert_eq!(card.content(), format!("{}...", "b".repeat(300)));

        let review = sample("Loved it", &[]);
        assert_eq!(ReviewCard::new(&review).content(), "Loved it");
    }

    #[test]
    fn test_taught_by_separators() {
        let review = sample("", &["Ada Lovelace", "Alan Turing", "Grace Hopper"]);
        let attribution = ReviewCard::new(&review).attribution();

        assert_eq!(
            attribution.to_text(),
            "Taught by Ada Lovelace, Alan Turing and Grace Hopper"
        );

        let Attribution::TaughtBy(links) = attribution else {
            panic!("expected instructor links");
        };
        assert_eq!(links[0].to, "/instructor/Ada%20Lovelace");
    }

    #[test]
    fn test_two_and_one_instructors() {
        let review = sample("", &["A", "B"]);
        assert_eq!(ReviewCard::new(&review).attribution().to_text(), "Taught by A and B");

        let review = sample("", &["A"]);
        assert_eq!(ReviewCard::new(&review).attribution().to_text(), "Taught by A");
    }

    #[test]
    fn test_written_for() {
        let review = sample("", &["A"]);
        let card = ReviewCard::new(&review).taught_by(false).modifiable(true);

        assert_eq!(
            card.attribution(),
            Attribution::WrittenFor {
                course_id: "COMP202",
                to: "/course/comp-202".into()
            }
        );
        assert!(card.can_modify);
        assert_eq!(
            card.delete_prompt(),
            "Are you sure you want to delete your review of COMP202? "
        );
    }

    #[test]
    fn test_date_and_instructor_path() {
        let review = sample("", &[]);
        assert_eq!(ReviewCard::new(&review).date(), "09/14/2023");
        assert_eq!(
            instructor_path("Jean-Luc O'Neil & Co/op"),
            "/instructor/Jean-Luc%20O'Neil%20%26%20Co%2Fop"
        );
    }
}
