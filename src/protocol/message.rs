//! Inbound message shapes.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::geometry::Point;
use crate::world::{Delta, GameObject, ObjectKind, Position};

/// Every inbound payload is wrapped as `{"message": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) message: T,
}

/// Identifiers announced in the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TankIds {
    /// The tank this bot controls.
    #[serde(rename = "your-tank-id")]
    pub own: String,
    /// The opponent, when the server announces it.
    #[serde(rename = "enemy-tank-id", default)]
    pub enemy: Option<String>,
}

/// An init snapshot or a turn delta.
///
/// Init snapshots only carry `updated_objects`; both keys default to empty.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ObjectBatch {
    #[serde(default)]
    pub(crate) deleted_objects: Vec<String>,
    #[serde(default)]
    pub(crate) updated_objects: BTreeMap<String, ObjectRecord>,
}

/// One object as the server describes it. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct ObjectRecord {
    #[serde(rename = "type")]
    kind: u8,
    position: Position,
    #[serde(default)]
    velocity: Option<Point>,
    #[serde(default)]
    hp: Option<i32>,
    #[serde(default)]
    powerups: Option<Value>,
    #[serde(default)]
    tank_id: Option<String>,
}

impl ObjectRecord {
    /// Validate and convert into a world object.
    pub(crate) fn into_object(self, id: &str) -> Result<GameObject, ProtocolError> {
        let kind = ObjectKind::try_from(self.kind)?;
        let shape_fits = match &self.position {
            Position::Point(_) => !kind.is_boundary(),
            Position::Polygon(_) => kind.is_boundary(),
        };
        if !shape_fits {
            return Err(ProtocolError::ShapeMismatch {
                id: id.to_string(),
                kind,
                found: self.position.shape_name(),
            });
        }
        Ok(GameObject {
            kind,
            position: self.position,
            velocity: self.velocity,
            hp: self.hp,
            powerups: self.powerups.map(powerup_names).unwrap_or_default(),
            owner: self.tank_id,
        })
    }
}

/// Powerups arrive either as a list of names or as an object keyed by name.
fn powerup_names(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        Value::Object(map) => map.into_iter().map(|(name, _)| name).collect(),
        _ => Vec::new(),
    }
}

impl ObjectBatch {
    /// Convert every record, failing on the first invalid one.
    pub(crate) fn into_delta(self) -> Result<Delta, ProtocolError> {
        let updated = self
            .updated_objects
            .into_iter()
            .map(|(id, record)| {
                let object = record.into_object(&id)?;
                Ok((id, object))
            })
            .collect::<Result<_, ProtocolError>>()?;
        Ok(Delta {
            deleted: self.deleted_objects,
            updated,
        })
    }
}
