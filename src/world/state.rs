//! World state synchronization.

use std::collections::BTreeMap;
use std::ops::ControlFlow;

use serde::Serialize;

use crate::error::WorldError;
use crate::geometry::{Point, Rect};
use crate::world::{GameObject, ObjectKind, TankState};

/// Static map size, derived once from the boundary objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    /// Largest x among all boundary vertices.
    pub width: f64,
    /// Largest y among all boundary vertices.
    pub height: f64,
}

impl MapBounds {
    /// Center of the map.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One turn's worth of changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    /// Identifiers removed this turn.
    pub deleted: Vec<String>,
    /// Records created or replaced this turn.
    pub updated: BTreeMap<String, GameObject>,
}

/// What the transport delivered for a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    /// A regular delta.
    Delta(Delta),
    /// The session-end signal.
    End,
}

/// The bot's model of the arena.
///
/// Objects are keyed by identifier and iterated in ascending identifier
/// order, which is what makes nearest-object ties deterministic.
#[derive(Debug, Clone)]
pub struct WorldState {
    self_id: String,
    enemy_id: Option<String>,
    objects: BTreeMap<String, GameObject>,
    bounds: Option<MapBounds>,
}

impl WorldState {
    /// Create an empty world for the given tank identifiers.
    #[must_use]
    pub fn new(self_id: impl Into<String>, enemy_id: Option<String>) -> Self {
        Self {
            self_id: self_id.into(),
            enemy_id,
            objects: BTreeMap::new(),
            bounds: None,
        }
    }

    /// Identifier of the controlled tank.
    #[must_use]
    pub fn self_id(&self) -> &str {
        &self.self_id
    }

    /// Identifier of the opposing tank, when the server announced one.
    #[must_use]
    pub fn enemy_id(&self) -> Option<&str> {
        self.enemy_id.as_deref()
    }

    /// Merge a batch of pre-game records.
    pub fn apply_init<I>(&mut self, snapshot: I)
    where
        I: IntoIterator<Item = (String, GameObject)>,
    {
        self.objects.extend(snapshot);
    }

    /// Apply one turn's deletions, then its updates.
    ///
    /// Deleting an unknown identifier is a no-op. Updates replace the whole
    /// record.
    pub fn apply_delta(&mut self, delta: Delta) {
        for id in &delta.deleted {
            self.objects.remove(id);
        }
        self.objects.extend(delta.updated);
    }

    /// Apply whatever the transport delivered for a turn.
    ///
    /// Returns `Break` on the session-end signal, in which case nothing is
    /// applied.
    pub fn apply_turn(&mut self, update: TurnUpdate) -> ControlFlow<()> {
        match update {
            TurnUpdate::Delta(delta) => {
                self.apply_delta(delta);
                ControlFlow::Continue(())
            }
            TurnUpdate::End => ControlFlow::Break(()),
        }
    }

    /// Derive the map size from the boundary objects.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BoundsAlreadyComputed`] on a second call and
    /// [`WorldError::NoBoundary`] if no boundary vertex is known.
    pub fn compute_bounds(&mut self) -> Result<MapBounds, WorldError> {
        if self.bounds.is_some() {
            return Err(WorldError::BoundsAlreadyComputed);
        }

        let mut max: Option<Point> = None;
        for vertex in self
            .objects_of(ObjectKind::Boundary)
            .flat_map(|(_, object)| object.vertices())
        {
            let m = max.get_or_insert(*vertex);
            m.x = m.x.max(vertex.x);
            m.y = m.y.max(vertex.y);
        }

        let max = max.ok_or(WorldError::NoBoundary)?;
        let bounds = MapBounds {
            width: max.x,
            height: max.y,
        };
        self.bounds = Some(bounds);
        Ok(bounds)
    }

    /// Map size, once computed.
    #[must_use]
    pub fn bounds(&self) -> Option<MapBounds> {
        self.bounds
    }

    /// Look up an object by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Check if an identifier is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of known objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if no objects are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in ascending identifier order.
    pub fn objects(&self) -> impl Iterator<Item = (&str, &GameObject)> {
        self.objects.iter().map(|(id, object)| (id.as_str(), object))
    }

    /// Objects of one kind in ascending identifier order.
    pub fn objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = (&str, &GameObject)> {
        self.objects()
            .filter(move |(_, object)| object.kind == kind)
    }

    /// Point-positioned objects of one kind with their points.
    pub fn points_of(&self, kind: ObjectKind) -> impl Iterator<Item = (&str, Point)> {
        self.objects_of(kind)
            .filter_map(|(id, object)| object.point().map(|p| (id, p)))
    }

    /// The controlled tank's record, if it is currently on the map.
    #[must_use]
    pub fn self_tank(&self) -> Option<&GameObject> {
        self.get(&self.self_id)
            .filter(|object| object.kind == ObjectKind::Tank)
    }

    /// Vitals of the controlled tank.
    #[must_use]
    pub fn tank_state(&self) -> Option<TankState> {
        self.self_tank().and_then(TankState::from_object)
    }

    /// The opposing tank.
    ///
    /// Looks up the announced enemy identifier. When none was announced, or
    /// it names no tank on the map, the first other tank in identifier order.
    #[must_use]
    pub fn enemy_tank(&self) -> Option<(&str, &GameObject)> {
        self.enemy_id
            .as_ref()
            .and_then(|id| self.objects.get_key_value(id))
            .filter(|(_, object)| object.kind == ObjectKind::Tank)
            .map(|(id, object)| (id.as_str(), object))
            .or_else(|| {
                self.objects_of(ObjectKind::Tank)
                    .find(|(id, _)| *id != self.self_id)
            })
    }

    /// Check whether a tank identifier belongs to the opponent.
    #[must_use]
    pub fn is_enemy(&self, tank_id: &str) -> bool {
        match &self.enemy_id {
            Some(enemy) => enemy == tank_id,
            None => tank_id != self.self_id,
        }
    }

    /// The shrinking play area, as a rectangle.
    ///
    /// If the server ever sends more than one, the lowest identifier wins.
    #[must_use]
    pub fn closing_boundary(&self) -> Option<Rect> {
        self.objects_of(ObjectKind::ClosingBoundary)
            .find_map(|(_, object)| object.rect())
    }
}
