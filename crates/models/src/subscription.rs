use serde::{Deserialize, Serialize};

/// A user's subscription to updates on a course
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub course_id: String,
    pub user_id: String,
}
