use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::{Display as FmtDisplay, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// An academic session a course can be offered in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Season {
    Fall,
    Winter,
    Summer,
}

impl Season {
    pub fn all() -> Vec<Season> {
        Season::iter().collect()
    }

    /// Position of the season within an academic year, which starts in the fall
    pub fn academic_rank(self) -> u8 {
        match self {
            Season::Fall => 0,
            Season::Winter => 1,
            Season::Summer => 2,
        }
    }

    /// Position of the season within a calendar year
    pub fn calendar_rank(self) -> u8 {
        match self {
            Season::Winter => 0,
            Season::Summer => 1,
            Season::Fall => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermParseError {
    #[error("unrecognized season in term: {0:?}")]
    UnknownSeason(String),
    #[error("missing or invalid year in term: {0:?}")]
    InvalidYear(String),
}

/// A single offering session such as `Fall 2023`
///
/// Terms order chronologically: by year, then winter, summer and fall
/// within the same calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub season: Season,
    pub year: u16,
}

impl Term {
    pub fn new(season: Season, year: u16) -> Self {
        Self { season, year }
    }
}

impl FromStr for Term {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let season = parts
            .next()
            .and_then(|season| Season::from_str(season).ok())
            .ok_or_else(|| TermParseError::UnknownSeason(s.to_string()))?;

        let year = match (parts.next(), parts.next()) {
            (Some(year), None) => year
                .parse()
                .map_err(|_| TermParseError::InvalidYear(s.to_string()))?,
            _ => return Err(TermParseError::InvalidYear(s.to_string())),
        };

        Ok(Self { season, year })
    }
}

impl FmtDisplay for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.season, self.year)
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.season.calendar_rank().cmp(&other.season.calendar_rank()))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two raw term strings chronologically.
///
/// Strings that do not parse as a [`Term`] sort before every valid term and
/// compare equal to each other.
pub fn compare_terms(a: &str, b: &str) -> Ordering {
    match (a.parse::<Term>(), b.parse::<Term>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_from_str() {
        assert_eq!(
            "Fall 2023".parse::<Term>().unwrap(),
            Term::new(Season::Fall, 2023)
        );
        assert_eq!(
            "winter 2024".parse::<Term>().unwrap(),
            Term::new(Season::Winter, 2024)
        );
    }

    #[test]
    fn test_term_rejects_unknown_strings() {
        assert!(matches!(
            "Spring 2024".parse::<Term>(),
            Err(TermParseError::UnknownSeason(_))
        ));
        assert!(matches!(
            "Fall".parse::<Term>(),
            Err(TermParseError::InvalidYear(_))
        ));
        assert!(matches!(
            "Fall 2023 extra".parse::<Term>(),
            Err(TermParseError::InvalidYear(_))
        ));
    }

    #[test]
    fn test_term_display() {
        assert_eq!(Term::new(Season::Summer, 2024).to_string(), "Summer 2024");
    }

    #[test]
    fn test_term_chronological_order() {
        let mut terms: Vec<Term> = ["Fall 2023", "Summer 2024", "Winter 2024", "Fall 2022"]
            .iter()
            .map(|t| t.parse().unwrap())
            .collect();
        terms.sort();

        let names: Vec<String> = terms.iter().map(Term::to_string).collect();
        assert_eq!(
            names,
            ["Fall 2022", "Fall 2023", "Winter 2024", "Summer 2024"]
        );
    }

    #[test]
    fn test_season_academic_rank() {
        let mut seasons = Season::all();
        seasons.reverse();
        seasons.sort_by_key(|s| s.academic_rank());
        assert_eq!(seasons, [Season::Fall, Season::Winter, Season::Summer]);
    }

    #[test]
    fn test_compare_terms_with_garbage() {
        assert_eq!(compare_terms("Fall 2023", "Winter 2023"), Ordering::Greater);
        assert_eq!(compare_terms("nonsense", "Fall 2023"), Ordering::Less);
        assert_eq!(compare_terms("nonsense", "???"), Ordering::Equal);
    }
}
