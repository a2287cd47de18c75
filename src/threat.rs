//! Threat assessment.
//!
//! Three independent signals feed the policy:
//! - Incoming enemy bullets, filtered by approximate line of sight
//! - Pressure from the closing boundary when the tank is near an edge
//! - A left/right destructible-wall tie

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};
use crate::spatial::{nearest, segment_clears};
use crate::world::{ObjectKind, WorldState};

/// Distances used by the threat model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ThreatConfig {
    /// How close a wall must be to the sight line to block it (default: 9).
    pub wall_buffer: f64,
    /// Distance from a closing-boundary edge, inclusive, that counts as pressure (default: 100).
    pub boundary_margin: f64,
    /// How far to step away from a pressing edge (default: 50).
    pub nudge_distance: f64,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        Self {
            wall_buffer: 9.0,
            boundary_margin: 100.0,
            nudge_distance: 50.0,
        }
    }
}

/// Outcome of scanning for enemy bullets.
#[derive(Debug, Clone, PartialEq)]
pub enum BulletSighting {
    /// No enemy bullet on the map.
    None,
    /// A wall sits on the sight line to at least one enemy bullet.
    ///
    /// One blocked bullet suppresses the whole scan, including bullets that
    /// are themselves in plain view.
    Blocked,
    /// The nearest enemy bullet, all sight lines clear.
    Incoming {
        /// Bullet identifier.
        id: String,
        /// Where the bullet will be after one more step.
        projected: Point,
        /// Distance from the tank to the projected position.
        distance: f64,
    },
}

/// Active boundary pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPressure {
    /// Point stepped inward from the pressing edge(s).
    pub nudge: Point,
    /// The closing play area.
    pub area: Rect,
}

/// Threat queries over a world snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ThreatModel<'w> {
    world: &'w WorldState,
    config: ThreatConfig,
}

impl<'w> ThreatModel<'w> {
    /// Create a model over the given world.
    #[must_use]
    pub fn new(world: &'w WorldState, config: ThreatConfig) -> Self {
        Self { world, config }
    }

    /// Find the nearest enemy bullet the tank can see.
    #[must_use]
    pub fn nearest_incoming_bullet(&self, tank: Point) -> BulletSighting {
        let walls: Vec<Point> = self
            .world
            .objects()
            .filter(|(_, object)| object.kind.is_wall())
            .filter_map(|(_, object)| object.point())
            .collect();

        let mut bullets = Vec::new();
        for (id, bullet) in self.world.objects_of(ObjectKind::Bullet) {
            let Some(owner) = bullet.owner.as_deref() else {
                continue;
            };
            if !self.world.is_enemy(owner) {
                continue;
            }
            let Some(projected) = bullet.projected() else {
                continue;
            };
            if walls
                .iter()
                .any(|wall| !segment_clears(tank, projected, *wall, self.config.wall_buffer))
            {
                return BulletSighting::Blocked;
            }
            bullets.push((id, projected));
        }

        match nearest(bullets, tank, |_| true) {
            Some(found) => BulletSighting::Incoming {
                id: found.item.to_string(),
                projected: found.point,
                distance: found.distance,
            },
            None => BulletSighting::None,
        }
    }

    /// Check whether the tank is pressed against the closing boundary.
    ///
    /// Each edge within `boundary_margin` pushes the target `nudge_distance`
    /// inward. When both edges of an axis press at once, the target takes
    /// the area's center on that axis instead.
    #[must_use]
    pub fn boundary_pressure(&self, tank: Point) -> Option<BoundaryPressure> {
        let area = self.world.closing_boundary()?;
        let margin = self.config.boundary_margin;
        let step = self.config.nudge_distance;
        let center = area.center();

        // Per axis: `None` when neither edge presses.
        let nudge_axis = |value: f64, lo: f64, hi: f64, mid: f64| match (
            value - lo <= margin,
            hi - value <= margin,
        ) {
            (true, true) => Some(mid),
            (true, false) => Some(value + step),
            (false, true) => Some(value - step),
            (false, false) => None,
        };
        let along_x = nudge_axis(tank.x, area.min_x, area.max_x, center.x);
        let along_y = nudge_axis(tank.y, area.min_y, area.max_y, center.y);
        if along_x.is_none() && along_y.is_none() {
            return None;
        }

        Some(BoundaryPressure {
            nudge: Point::new(along_x.unwrap_or(tank.x), along_y.unwrap_or(tank.y)),
            area,
        })
    }

    /// Check for an exact tie between the nearest destructible walls on
    /// either side of the tank.
    ///
    /// Compares the nearest destructible wall with greater x against the
    /// nearest with smaller x. Both must exist and be at exactly the same
    /// distance. This is a narrow signal, not a wall-clearing strategy.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn wall_tie_signal(&self, tank: Point) -> bool {
        let nearest_on_side = |east: bool| {
            let walls = self
                .world
                .points_of(ObjectKind::DestructibleWall)
                .map(|(_, p)| (p, p));
            nearest(walls, tank, |p: &Point| {
                if east {
                    p.x > tank.x
                } else {
                    p.x < tank.x
                }
            })
            .map(|found| found.distance)
        };
        matches!(
            (nearest_on_side(false), nearest_on_side(true)),
            (Some(west), Some(east)) if west == east
        )
    }
}
