use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A user-authored evaluation of a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub course_id: String,
    #[serde(default)]
    pub instructors: Vec<String>,
    pub rating: u8,
    pub difficulty: u8,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    #[serde(default)]
    pub likes: i64,
}

impl Review {
    /// Milliseconds since the Unix epoch, the key reviews are ordered by
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

/// Review timestamps arrive either as plain milliseconds or in the extended
/// JSON form `{ "$date": { "$numberLong": "1700000000000" } }`.
pub mod timestamp {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Millis(i64),
        Extended {
            #[serde(rename = "$date")]
            date: RawDate,
        },
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDate {
        NumberLong {
            #[serde(rename = "$numberLong")]
            number_long: String,
        },
        Millis(i64),
    }

    #[derive(Serialize)]
    struct ExtendedDate {
        #[serde(rename = "$numberLong")]
        number_long: String,
    }

    #[derive(Serialize)]
    struct Extended {
        #[serde(rename = "$date")]
        date: ExtendedDate,
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Extended {
            date: ExtendedDate {
                number_long: value.timestamp_millis().to_string(),
            },
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = match RawTimestamp::deserialize(deserializer)? {
            RawTimestamp::Millis(millis) => millis,
            RawTimestamp::Extended {
                date: RawDate::Millis(millis),
            } => millis,
            RawTimestamp::Extended {
                date: RawDate::NumberLong { number_long },
            } => number_long
                .parse()
                .map_err(|_| {
                    <D::Error as de::Error>::custom(format!("invalid $numberLong: {number_long}"))
                })?,
        };

        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| <D::Error as de::Error>::custom(format!("timestamp out of range: {millis}")))
    }
}
