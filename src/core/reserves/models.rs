//! Reserve Models
//!
//! Wire types for the reserves catalog. Records mirror the server's GraphQL
//! `ReserveType`; inputs mirror `ReserveInput` / `ReserveUpdateInput`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::graphql::Error;

// ============================================================================
// Reserve Type
// ============================================================================

/// Reserve category.
///
/// Encoded with the GraphQL enum member names (`BONUS`, ...). The display
/// names (`Bonus`, ...) are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReserveType {
    #[serde(rename = "BONUS", alias = "Bonus")]
    Bonus,
    #[serde(rename = "RESOURCE", alias = "Resource")]
    Resource,
    #[serde(rename = "MECH", alias = "Mech")]
    Mech,
    #[serde(rename = "TACTICAL", alias = "Tactical")]
    Tactical,
}

impl ReserveType {
    pub const ALL: [ReserveType; 4] = [
        ReserveType::Bonus,
        ReserveType::Resource,
        ReserveType::Mech,
        ReserveType::Tactical,
    ];

    /// Human-readable name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bonus => "Bonus",
            Self::Resource => "Resource",
            Self::Mech => "Mech",
            Self::Tactical => "Tactical",
        }
    }

    /// Name of the matching `ReserveTypeEnum` member.
    pub fn graphql_name(self) -> &'static str {
        match self {
            Self::Bonus => "BONUS",
            Self::Resource => "RESOURCE",
            Self::Mech => "MECH",
            Self::Tactical => "TACTICAL",
        }
    }
}

impl fmt::Display for ReserveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReserveType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown reserve type '{s}' (expected Bonus, Resource, Mech or Tactical)"
                ))
            })
    }
}

// ============================================================================
// Nested Records
// ============================================================================

/// A numeric bonus granted by a reserve (e.g. `skill_point: 1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub id: String,
    pub val: i64,
}

/// An item the reserve lets a pilot deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployable {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: i64,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub val: i64,
}

/// Damage entry; `val` is a dice expression such as `"1d6+2"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub val: String,
}

/// An activatable ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub activation: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<RangeValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Vec<DamageValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synergy {
    pub locations: Vec<String>,
    pub detail: String,
}

// ============================================================================
// Reserve
// ============================================================================

/// A reserve as returned by the server.
///
/// Summary queries (random sample, label search) leave the nested sequences
/// unselected; they decode as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reserve {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub reserve_type: ReserveType,
    pub label: String,
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub bonuses: Vec<Bonus>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deployables: Vec<Deployable>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub actions: Vec<Action>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub synergies: Vec<Synergy>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Reserve {
    pub fn is_type(&self, reserve_type: ReserveType) -> bool {
        self.reserve_type == reserve_type
    }
}

// ============================================================================
// Inputs
// ============================================================================

/// Payload for `createReserve` / `importReserves`.
///
/// The server requires an `id`; use [`ReserveInput::with_id`] or
/// [`ReserveInput::with_generated_id`] before sending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub reserve_type: ReserveType,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonuses: Option<Vec<Bonus>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployables: Option<Vec<Deployable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synergies: Option<Vec<Synergy>>,
}

impl ReserveInput {
    pub fn new(
        name: impl Into<String>,
        reserve_type: ReserveType,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            reserve_type,
            label: label.into(),
            description: description.into(),
            bonuses: None,
            deployables: None,
            actions: None,
            synergies: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Attach a placeholder id from [`generate_reserve_id`].
    #[must_use]
    pub fn with_generated_id(self) -> Self {
        self.with_id(generate_reserve_id())
    }

    #[must_use]
    pub fn with_bonuses(mut self, bonuses: Vec<Bonus>) -> Self {
        self.bonuses = Some(bonuses);
        self
    }

    #[must_use]
    pub fn with_deployables(mut self, deployables: Vec<Deployable>) -> Self {
        self.deployables = Some(deployables);
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn with_synergies(mut self, synergies: Vec<Synergy>) -> Self {
        self.synergies = Some(synergies);
        self
    }
}

/// Payload for `updateReserve`. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub reserve_type: Option<ReserveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonuses: Option<Vec<Bonus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployables: Option<Vec<Deployable>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synergies: Option<Vec<Synergy>>,
}

impl ReserveUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_type(mut self, reserve_type: ReserveType) -> Self {
        self.reserve_type = Some(reserve_type);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_bonuses(mut self, bonuses: Vec<Bonus>) -> Self {
        self.bonuses = Some(bonuses);
        self
    }

    #[must_use]
    pub fn with_deployables(mut self, deployables: Vec<Deployable>) -> Self {
        self.deployables = Some(deployables);
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = Some(actions);
        self
    }

    #[must_use]
    pub fn with_synergies(mut self, synergies: Vec<Synergy>) -> Self {
        self.synergies = Some(synergies);
        self
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full replacement of every editable field.
impl From<&Reserve> for ReserveUpdate {
    fn from(reserve: &Reserve) -> Self {
        Self {
            name: Some(reserve.name.clone()),
            reserve_type: Some(reserve.reserve_type),
            label: Some(reserve.label.clone()),
            description: Some(reserve.description.clone()),
            bonuses: Some(reserve.bonuses.clone()),
            deployables: Some(reserve.deployables.clone()),
            actions: Some(reserve.actions.clone()),
            synergies: Some(reserve.synergies.clone()),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Placeholder id of the form `reserve_<unix-millis>_<9 base-36 chars>`.
///
/// Not authoritative; the server rejects ids that already exist.
pub fn generate_reserve_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("reserve_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// Format a timestamp for display, e.g. `Jan 5, 2024, 03:04 PM`.
pub fn format_date<Tz: TimeZone>(value: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    value.format("%b %-d, %Y, %I:%M %p").to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339 out; RFC 3339 or naive ISO-8601 (read as UTC) in.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }
}
