//! Test Fixtures
//!
//! Helpers for creating reserves and the JSON the server would return for
//! them.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use crate::core::reserves::{Bonus, Reserve, ReserveType};

// =============================================================================
// Reserve Fixtures
// =============================================================================

/// Fixed timestamp used by fixtures that do not care about dates.
pub fn fixture_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

/// Create a reserve with the given id and type.
pub fn reserve(id: &str, reserve_type: ReserveType) -> Reserve {
    Reserve {
        id: id.to_string(),
        name: format!("Reserve {id}"),
        reserve_type,
        label: "Test".to_string(),
        description: "<p>fixture</p>".to_string(),
        bonuses: Vec::new(),
        deployables: Vec::new(),
        actions: Vec::new(),
        synergies: Vec::new(),
        created_at: fixture_time(),
        updated_at: fixture_time(),
    }
}

/// Create a bonus reserve created at `created_at`.
pub fn reserve_created_at(id: &str, created_at: DateTime<Utc>) -> Reserve {
    Reserve {
        created_at,
        updated_at: created_at,
        ..reserve(id, ReserveType::Bonus)
    }
}

/// Create a reserve carrying one bonus, renamed to `name`.
pub fn named_reserve(id: &str, name: &str, reserve_type: ReserveType) -> Reserve {
    Reserve {
        name: name.to_string(),
        bonuses: vec![Bonus {
            id: "skill_point".to_string(),
            val: 1,
        }],
        ..reserve(id, reserve_type)
    }
}

// =============================================================================
// Payload Fixtures
// =============================================================================

/// Server JSON for a reserve. `type_name` is the wire enum value (`"BONUS"`).
pub fn reserve_json(id: &str, type_name: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Reserve {id}"),
        "type": type_name,
        "label": "Test",
        "description": "<p>fixture</p>",
        "bonuses": null,
        "deployables": null,
        "actions": null,
        "synergies": null,
        "createdAt": "2024-01-15T10:30:00",
        "updatedAt": "2024-01-15T10:30:00"
    })
}

/// Server JSON for an existing [`Reserve`].
pub fn to_json(reserve: &Reserve) -> Value {
    serde_json::to_value(reserve).unwrap()
}
