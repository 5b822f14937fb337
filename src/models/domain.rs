use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A user's dating-relevant attributes as stored in the profile store.
///
/// Documents in the store are loosely typed, so every field except the
/// identifier deserializes leniently: a missing or wrong-typed value becomes
/// "unknown" (`None` / empty) instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileDocument")]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub age: Option<u32>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub hobbies: Vec<String>,
}

/// Profile document as written by the store's clients.
///
/// Older clients wrote the region under `state`; some documents carry both
/// keys. `region` wins when it holds a string.
#[derive(Deserialize)]
struct ProfileDocument {
    #[serde(rename = "userId")]
    user_id: String,
    #[serde(default, deserialize_with = "lenient_age")]
    age: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    region: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    state: Option<String>,
    #[serde(default, deserialize_with = "lenient_hobbies")]
    hobbies: Vec<String>,
}

impl From<ProfileDocument> for Profile {
    fn from(doc: ProfileDocument) -> Self {
        Self {
            user_id: doc.user_id,
            age: doc.age,
            country: doc.country,
            region: doc.region.or(doc.state),
            hobbies: doc.hobbies,
        }
    }
}

impl Profile {
    pub fn new(
        user_id: impl Into<String>,
        age: u32,
        country: impl Into<String>,
        region: impl Into<String>,
        hobbies: &[&str],
    ) -> Self {
        Self {
            user_id: user_id.into(),
            age: Some(age),
            country: Some(country.into()),
            region: Some(region.into()),
            hobbies: hobbies.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Deduplicated view of the declared hobbies.
    pub fn hobby_set(&self) -> HashSet<&str> {
        self.hobbies.iter().map(String::as_str).collect()
    }
}

/// Ages arrive either as numbers or as the numeric strings the signup form
/// produced. Anything else is treated as unknown.
fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_hobbies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// One ranked candidate, produced fresh per ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub id: String,
    pub score: f64,
}

/// A one-directional "like" from one user to another.
///
/// A single like is recorded as a completed match; no reciprocal like is
/// looked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeEvent {
    /// Assigned once on creation; stores key the record by it
    #[serde(rename = "likeId")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl LikeEvent {
    pub fn new(user_id: impl Into<String>, target_user_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            target_user_id: target_user_id.into(),
            created_at: chrono::Utc::now(),
        }
    }
}

/// Tunables for the ranking pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingOptions {
    /// Maximum allowed absolute age difference, inclusive
    pub age_tolerance: u32,
    /// Result size used when the caller does not ask for one
    pub default_top_n: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            age_tolerance: 2,
            default_top_n: 5,
        }
    }
}
