use crate::review_card::instructor_path;
use models::{Course, TermAverage, compare_terms};
use std::collections::HashMap;

/// Rows shown before the table is expanded
pub const COLLAPSED_AVERAGE_ROWS: usize = 6;

pub const UNKNOWN_INSTRUCTOR: &str = "Instructor Unknown";

/// One term of the class averages table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageRow<'a> {
    pub term: &'a str,
    pub average: &'a str,
    pub instructor: Option<&'a str>,
}

impl AverageRow<'_> {
    pub fn instructor_label(&self) -> &str {
        self.instructor.unwrap_or(UNKNOWN_INSTRUCTOR)
    }

    /// Link to the instructor's page, if the instructor is known
    pub fn instructor_path(&self) -> Option<String> {
        self.instructor.map(instructor_path)
    }
}

/// Historical class averages of a course, most recent term first
#[derive(Debug, Clone)]
pub struct CourseAverages<'a> {
    rows: Vec<AverageRow<'a>>,
    show_all: bool,
}

impl<'a> CourseAverages<'a> {
    /// Builds the table rows
    ///
    /// # Arguments
    /// * `course` - Supplies the instructor of each term; when several
    ///   instructors taught the same term the last one listed is shown
    /// * `averages` - The reported averages, in any order
    pub fn new(course: &'a Course, averages: &'a [TermAverage]) -> Self {
        let instructors: HashMap<&str, &str> = course
            .instructors
            .iter()
            .map(|instructor| (instructor.term.as_str(), instructor.name.as_str()))
            .collect();

        let mut rows: Vec<AverageRow<'a>> = averages
            .iter()
            .map(|average| AverageRow {
                term: &average.term,
                average: &average.average,
                instructor: instructors.get(average.term.as_str()).copied(),
            })
            .collect();

        rows.sort_by(|a, b| compare_terms(b.term, a.term));

        Self {
            rows,
            show_all: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether there are rows hidden behind the "show all" toggle
    pub fn can_expand(&self) -> bool {
        self.rows.len() > COLLAPSED_AVERAGE_ROWS
    }

    pub fn toggle(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.show_all { "Show less" } else { "Show all" }
    }

    /// The rows currently displayed
    pub fn rows(&self) -> &[AverageRow<'a>] {
        if self.show_all {
            &self.rows
        } else {
            &self.rows[..self.rows.len().min(COLLAPSED_AVERAGE_ROWS)]
        }
    }
}
