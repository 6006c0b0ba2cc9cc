use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A reaction a user can leave on somebody else's review
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Dislike,
}

/// Interaction state of one review as seen by the requesting user
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionsPayload {
    pub kind: Option<InteractionKind>,
    pub likes: i64,
}

/// Body of an interaction add or remove request.
///
/// A review is identified by its course and author; `referrer` is the user
/// reacting to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<InteractionKind>,
    pub course_id: String,
    pub user_id: String,
    pub referrer: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_interaction_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::Dislike).unwrap(),
            "\"dislike\""
        );
        assert_eq!(InteractionKind::from_str("like").unwrap(), InteractionKind::Like);
    }

    #[test]
    fn test_payload_without_kind() {
        let payload: InteractionsPayload =
            serde_json::from_str(r#"{ "kind": null, "likes": -2 }"#).unwrap();
        assert_eq!(payload.kind, None);
        assert_eq!(payload.likes, -2);
    }

    #[test]
    fn test_remove_request_omits_kind() {
        let request = InteractionRequest {
            kind: None,
            course_id: "COMP202".into(),
            user_id: "author".into(),
            referrer: "me".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("kind").is_none());
        assert_eq!(value["referrer"], "me");
    }
}
