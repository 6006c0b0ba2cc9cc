use crate::requirements::Requirements;
use serde::{Deserialize, Serialize};

/// Length of the subject prefix in a course identifier such as `COMP202`
const SUBJECT_LEN: usize = 4;

/// A person teaching a course in a given term
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instructor {
    pub name: String,
    pub term: String,
}

/// A scheduled block of a course section
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub campus: Option<String>,
    pub display: Option<String>,
    pub location: Option<String>,
}

/// Schedule entries for one term of a course
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub blocks: Option<Vec<Block>>,
    pub term: Option<String>,
}

/// A course as served by the course API.
///
/// Courses are read-only once fetched; views only borrow them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub credits: String,
    pub subject: String,
    pub code: String,
    pub level: String,
    pub url: String,
    pub department: String,
    pub faculty: String,
    pub faculty_url: String,
    pub terms: Vec<String>,
    pub description: String,
    pub instructors: Vec<Instructor>,
    pub prerequisites: Vec<String>,
    pub corequisites: Vec<String>,
    pub leading_to: Vec<String>,
    pub prerequisites_text: Option<String>,
    pub corequisites_text: Option<String>,
    pub restrictions: Option<String>,
    pub schedule: Vec<Schedule>,
}

impl Course {
    /// The course identifier with a space between subject and code, e.g. `COMP 202`
    pub fn display_code(&self) -> String {
        splice_course_code(&self.id, " ")
    }

    /// Route of this course's page
    pub fn path(&self) -> String {
        course_path(&self.id)
    }

    pub fn requirements(&self) -> Requirements {
        Requirements {
            prerequisites_text: self.prerequisites_text.clone(),
            corequisites_text: self.corequisites_text.clone(),
            restrictions: self.restrictions.clone(),
        }
    }
}

/// Inserts `delimiter` between the subject and the code of a course identifier
///
/// # Arguments
/// * `course_id` - An identifier such as `COMP202`
/// * `delimiter` - The string to insert, usually `" "` or `"-"`
///
/// # Returns
/// The spliced identifier, or the input unchanged if it is too short to split
pub fn splice_course_code(course_id: &str, delimiter: &str) -> String {
    match (course_id.get(..SUBJECT_LEN), course_id.get(SUBJECT_LEN..)) {
        (Some(subject), Some(code)) if !code.is_empty() => format!("{subject}{delimiter}{code}"),
        _ => course_id.to_string(),
    }
}

/// Normalizes a course identifier to its routing form, e.g. `COMP202` to `comp-202`
pub fn course_id_to_url_param(course_id: &str) -> String {
    splice_course_code(course_id, "-").to_lowercase()
}

/// Route of a course page given its identifier
pub fn course_path(course_id: &str) -> String {
    format!("/course/{}", course_id_to_url_param(course_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_course_code() {
        assert_eq!(splice_course_code("COMP202", " "), "COMP 202");
        assert_eq!(splice_course_code("MATH240D1", "-"), "MATH-240D1");
        assert_eq!(splice_course_code("ABC", " "), "ABC");
        assert_eq!(splice_course_code("COMP", " "), "COMP");
    }

    #[test]
    fn test_course_path() {
        assert_eq!(course_path("COMP202"), "/course/comp-202");
        assert_eq!(course_id_to_url_param("ECSE324"), "ecse-324");
    }

    #[test]
    fn test_course_deserialize() {
        let json = r#"{
            "_id": "COMP202",
            "title": "Foundations of Programming",
            "subject": "COMP",
            "code": "202",
            "facultyUrl": "https://example.com",
            "terms": ["Fall 2023", "Winter 2024"],
            "instructors": [{ "name": "Jane Doe", "term": "Fall 2023" }],
            "prerequisitesText": "Prerequisite: <a href=\"/courses/comp-250\">COMP 250</a>"
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, "COMP202");
        assert_eq!(course.faculty_url, "https://example.com");
        assert_eq!(course.instructors.len(), 1);
        assert_eq!(course.display_code(), "COMP 202");
        assert_eq!(course.path(), "/course/comp-202");
        assert!(course.requirements().prerequisites_text.is_some());
        assert!(course.restrictions.is_none());
    }
}
