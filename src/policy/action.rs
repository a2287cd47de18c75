//! The per-turn instruction sent back to the server.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// One turn's instruction.
///
/// Both fields are independent: a turn may shoot, move, do both, or neither.
/// Serializes to `{"shoot": degrees, "path": [x, y]}` with unset keys omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Bearing to fire along, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoot: Option<f64>,
    /// Point to drive toward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Point>,
}

impl Action {
    /// Check if neither field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.shoot.is_none() && self.path.is_none()
    }

    /// Apply a rule's directive, overwriting the field it targets.
    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Shoot(bearing) => self.shoot = Some(bearing),
            Directive::Path(target) => self.path = Some(target),
        }
    }
}

/// What a single rule asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Fire along a bearing (degrees).
    Shoot(f64),
    /// Drive toward a point.
    Path(Point),
}
