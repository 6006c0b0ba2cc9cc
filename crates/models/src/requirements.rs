use serde::{Deserialize, Serialize};

/// Free-text requirement descriptions attached to a course
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirements {
    /// Prerequisite description, usually an HTML fragment
    pub prerequisites_text: Option<String>,
    /// Corequisite description, usually an HTML fragment
    pub corequisites_text: Option<String>,
    /// Plain text restrictions
    pub restrictions: Option<String>,
}
