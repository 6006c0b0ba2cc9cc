use models::{Course, Instructor, Season, Term};
use std::collections::HashSet;

/// Sizes a term badge can be drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Small,
    Large,
}

impl BadgeVariant {
    pub fn icon_size(self) -> u8 {
        match self {
            BadgeVariant::Small => 20,
            BadgeVariant::Large => 25,
        }
    }
}

/// One term a course is offered in, with the instructor shown for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermBadge<'a> {
    pub season: Option<Season>,
    pub term: &'a str,
    pub instructor: &'a str,
}

/// Sort key placing recognized seasons in academic order and everything else last
fn academic_key(term: &str) -> (u8, u16) {
    match term.parse::<Term>() {
        Ok(term) => (term.season.academic_rank(), term.year),
        Err(_) => (u8::MAX, u16::MAX),
    }
}

/// Picks one instructor per term the course is offered in
///
/// # Arguments
/// * `course` - The course whose instructors and terms are considered
///
/// # Returns
/// At most one instructor per distinct offered term (the first one listed),
/// ordered fall, winter, then summer. Terms that do not name a known season
/// come last in source order.
pub fn unique_term_instructors(course: &Course) -> Vec<&Instructor> {
    let mut filled_terms = HashSet::new();

    let mut unique: Vec<&Instructor> = course
        .instructors
        .iter()
        .filter(|instructor| course.terms.contains(&instructor.term))
        .filter(|&instructor| filled_terms.insert(instructor.term.as_str()))
        .collect();

    // Stable, so instructors with equal keys keep their source order
    unique.sort_by_key(|instructor| academic_key(&instructor.term));
    unique
}

/// Term badges for a course card or course page
pub fn term_badges(course: &Course) -> Vec<TermBadge<'_>> {
    unique_term_instructors(course)
        .into_iter()
        .map(|instructor| TermBadge {
            season: instructor
                .term
                .parse::<Term>()
                .ok()
                .map(|term| term.season),
            term: &instructor.term,
            instructor: &instructor.name,
        })
        .collect()
}
