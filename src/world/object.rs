//! Game objects as the bot sees them.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::geometry::{Point, Rect};

/// Kind of a game object.
///
/// The numeric codes are the ones the game server uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ObjectKind {
    /// A tank, ours or the opponent's.
    Tank = 1,
    /// A bullet in flight.
    Bullet = 2,
    /// An indestructible wall segment.
    Wall = 3,
    /// A wall segment that can be shot away.
    DestructibleWall = 4,
    /// One edge of the static outer map boundary.
    Boundary = 5,
    /// The shrinking play area.
    ClosingBoundary = 6,
    /// A collectible powerup.
    Powerup = 7,
}

impl ObjectKind {
    /// Check if objects of this kind are positioned by a vertex polygon.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(self, ObjectKind::Boundary | ObjectKind::ClosingBoundary)
    }

    /// Check if this kind blocks line of sight.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, ObjectKind::Wall | ObjectKind::DestructibleWall)
    }
}

impl TryFrom<u8> for ObjectKind {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ObjectKind::Tank),
            2 => Ok(ObjectKind::Bullet),
            3 => Ok(ObjectKind::Wall),
            4 => Ok(ObjectKind::DestructibleWall),
            5 => Ok(ObjectKind::Boundary),
            6 => Ok(ObjectKind::ClosingBoundary),
            7 => Ok(ObjectKind::Powerup),
            other => Err(ProtocolError::UnknownObjectKind(other)),
        }
    }
}

impl From<ObjectKind> for u8 {
    fn from(kind: ObjectKind) -> Self {
        kind as u8
    }
}

/// Where an object is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// A single point, for tanks, bullets, walls and powerups.
    Point(Point),
    /// An ordered vertex list, for boundary kinds.
    Polygon(Vec<Point>),
}

impl Position {
    /// Short name of the shape, for error messages.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Position::Point(_) => "point",
            Position::Polygon(_) => "polygon",
        }
    }
}

/// A single object record.
///
/// Records are replaced wholesale on update; there is no field-level merge.
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Object kind.
    pub kind: ObjectKind,
    /// Point or polygon position.
    pub position: Position,
    /// Displacement per turn, if the object moves.
    pub velocity: Option<Point>,
    /// Hit points (tanks only).
    pub hp: Option<i32>,
    /// Names of the powerups held (tanks only).
    pub powerups: Vec<String>,
    /// Identifier of the tank that fired this (bullets only).
    pub owner: Option<String>,
}

impl GameObject {
    /// Create a point-positioned object with no other attributes.
    #[must_use]
    pub fn at(kind: ObjectKind, point: Point) -> Self {
        Self {
            kind,
            position: Position::Point(point),
            velocity: None,
            hp: None,
            powerups: Vec::new(),
            owner: None,
        }
    }

    /// Create a polygon-positioned object.
    #[must_use]
    pub fn polygon(kind: ObjectKind, vertices: Vec<Point>) -> Self {
        Self {
            position: Position::Polygon(vertices),
            ..Self::at(kind, Point::default())
        }
    }

    /// Create a tank.
    #[must_use]
    pub fn tank(point: Point, hp: i32) -> Self {
        Self {
            hp: Some(hp),
            ..Self::at(ObjectKind::Tank, point)
        }
    }

    /// Create a bullet fired by `owner`.
    #[must_use]
    pub fn bullet(point: Point, velocity: Point, owner: impl Into<String>) -> Self {
        Self {
            velocity: Some(velocity),
            owner: Some(owner.into()),
            ..Self::at(ObjectKind::Bullet, point)
        }
    }

    /// The object's point, or `None` for polygon-positioned objects.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match &self.position {
            Position::Point(p) => Some(*p),
            Position::Polygon(_) => None,
        }
    }

    /// Polygon vertices; empty for point-positioned objects.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        match &self.position {
            Position::Point(_) => &[],
            Position::Polygon(vertices) => vertices,
        }
    }

    /// Bounding rectangle of a polygon-positioned object.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        Rect::from_vertices(self.vertices())
    }

    /// Position after one more turn at the current velocity.
    ///
    /// Objects without a velocity stay where they are.
    #[must_use]
    pub fn projected(&self) -> Option<Point> {
        let p = self.point()?;
        Some(self.velocity.map_or(p, |v| p.offset(v)))
    }
}

/// Snapshot of a tank's vitals.
#[derive(Debug, Clone, PartialEq)]
pub struct TankState {
    /// Current position.
    pub position: Point,
    /// Hit points (0 when the server omitted them).
    pub hp: i32,
    /// Powerups held.
    pub powerups: Vec<String>,
}

impl TankState {
    /// Read the vitals from a tank record.
    ///
    /// Returns `None` if the record is not a point-positioned tank.
    #[must_use]
    pub fn from_object(object: &GameObject) -> Option<Self> {
        if object.kind != ObjectKind::Tank {
            return None;
        }
        Some(Self {
            position: object.point()?,
            hp: object.hp.unwrap_or(0),
            powerups: object.powerups.clone(),
        })
    }
}
