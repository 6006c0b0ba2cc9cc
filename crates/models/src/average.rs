use serde::{Deserialize, Serialize};

/// Class average reported for one term of a course
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermAverage {
    pub term: String,
    pub average: String,
}
