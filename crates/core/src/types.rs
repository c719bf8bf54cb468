//! Directory entities as seen by the sweep.
//!
//! These mirror the subset of the Admin SDK Directory resources the sweep
//! reads. Field names follow the wire format (camelCase) so the directory
//! client can deserialize straight into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A group in the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Opaque directory identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Primary email address; also the key used for deletion.
    pub email: String,
    /// Creation timestamp. Not every directory listing carries it.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    /// Member count as reported by the listing itself, when present.
    ///
    /// Informational only: the qualifying check always uses the member and
    /// owner listings.
    #[serde(default, with = "string_count")]
    pub direct_members_count: Option<u64>,
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A direct member of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `OWNER`, `MANAGER` or `MEMBER`.
    #[serde(default)]
    pub role: String,
    /// `USER`, `GROUP`, `CUSTOMER` or `EXTERNAL`.
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// Role value the directory uses for group owners.
pub const ROLE_OWNER: &str = "OWNER";

impl Member {
    /// Whether this membership carries the owner role.
    pub fn is_owner(&self) -> bool {
        self.role.eq_ignore_ascii_case(ROLE_OWNER)
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// A group qualifies for the report when both its member listing and its
/// owner listing are empty.
///
/// The two listings come from separate calls and are checked independently;
/// owners are not assumed to be a subset of members.
pub fn is_qualifying(members: &[Member], owners: &[Member]) -> bool {
    members.is_empty() && owners.is_empty()
}

/// The directory encodes 64-bit counts as JSON strings.
mod string_count {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_str(&n.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        match Option::<Raw>::deserialize(d)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
