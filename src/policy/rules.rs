//! The decision rules, in their default priority order.

use std::fmt;

use crate::geometry::Point;
use crate::spatial::{bearing_degrees, distance, nearest};
use crate::threat::{BulletSighting, ThreatModel};
use crate::world::{ObjectKind, WorldState};

use super::action::{Action, Directive};
use super::config::{BoundaryResponse, FallbackTarget, PolicyConfig};

/// Everything a rule may look at while deciding one turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'w> {
    /// The synchronized world.
    pub world: &'w WorldState,
    /// Engine configuration.
    pub config: &'w PolicyConfig,
    /// The controlled tank's position.
    pub tank: Point,
    /// Threat queries bound to this world.
    pub threats: ThreatModel<'w>,
    /// The last movement target issued, if any.
    pub last_target: Option<Point>,
}

impl<'w> TurnContext<'w> {
    /// Build a context for the tank at `tank`.
    #[must_use]
    pub fn new(
        world: &'w WorldState,
        config: &'w PolicyConfig,
        tank: Point,
        last_target: Option<Point>,
    ) -> Self {
        Self {
            world,
            config,
            tank,
            threats: ThreatModel::new(world, config.threat),
            last_target,
        }
    }

    /// The opponent's position, if it is on the map.
    #[must_use]
    pub fn opponent(&self) -> Option<Point> {
        self.world
            .enemy_tank()
            .and_then(|(_, object)| object.point())
    }
}

/// One step of the decision chain.
///
/// Rules run in order against a shared draft. A returned directive
/// overwrites the field it targets, so later rules win.
pub trait Rule: fmt::Debug {
    /// Short kebab-case name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect the turn and the draft so far.
    fn evaluate(&self, ctx: &TurnContext<'_>, draft: &Action) -> Option<Directive>;
}

/// Shoot at the nearest visible enemy bullet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShootIncomingBullet;

impl Rule for ShootIncomingBullet {
    fn name(&self) -> &'static str {
        "shoot-incoming-bullet"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, _draft: &Action) -> Option<Directive> {
        match ctx.threats.nearest_incoming_bullet(ctx.tank) {
            BulletSighting::Incoming { projected, .. } => {
                Some(Directive::Shoot(bearing_degrees(ctx.tank, projected)))
            }
            BulletSighting::Blocked | BulletSighting::None => None,
        }
    }
}

/// Fire along the forward bearing when destructible walls tie left and right.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakWallTie;

impl Rule for BreakWallTie {
    fn name(&self) -> &'static str {
        "break-wall-tie"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, _draft: &Action) -> Option<Directive> {
        ctx.threats
            .wall_tie_signal(ctx.tank)
            .then_some(Directive::Shoot(ctx.config.forward_bearing))
    }
}

/// Shoot at the opponent when it is within engagement range, inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngageOpponent;

impl Rule for EngageOpponent {
    fn name(&self) -> &'static str {
        "engage-opponent"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, _draft: &Action) -> Option<Directive> {
        let opponent = ctx.opponent()?;
        (distance(ctx.tank, opponent) <= ctx.config.engagement_range)
            .then(|| Directive::Shoot(bearing_degrees(ctx.tank, opponent)))
    }
}

/// Move away from the closing boundary when it presses on the tank.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeClosingBoundary;

impl Rule for EscapeClosingBoundary {
    fn name(&self) -> &'static str {
        "escape-closing-boundary"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, _draft: &Action) -> Option<Directive> {
        let pressure = ctx.threats.boundary_pressure(ctx.tank)?;
        let target = match ctx.config.boundary_response {
            BoundaryResponse::Nudge => pressure.nudge,
            BoundaryResponse::StandOff => ctx
                .opponent()
                .and_then(|opponent| {
                    let away = opponent.delta_to(ctx.tank).normalized()?;
                    let spot = opponent.offset(away.scaled(ctx.config.standoff_distance));
                    let safe = pressure.area.inset(ctx.config.threat.nudge_distance);
                    Some(safe.clamp(spot))
                })
                .unwrap_or(pressure.nudge),
        };
        Some(Directive::Path(target))
    }
}

/// Head for the nearest powerup if nothing else picked a destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectPowerup;

impl Rule for CollectPowerup {
    fn name(&self) -> &'static str {
        "collect-powerup"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, draft: &Action) -> Option<Directive> {
        if draft.path.is_some() {
            return None;
        }
        nearest(ctx.world.points_of(ObjectKind::Powerup), ctx.tank, |_| true)
            .map(|found| Directive::Path(found.point))
    }
}

/// Idle move toward the configured fallback target.
///
/// Fires only on an otherwise empty turn, and never re-issues the target
/// that was sent last.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFallback;

impl Rule for MoveToFallback {
    fn name(&self) -> &'static str {
        "fallback-target"
    }

    fn evaluate(&self, ctx: &TurnContext<'_>, draft: &Action) -> Option<Directive> {
        if !draft.is_empty() {
            return None;
        }
        let target = match ctx.config.fallback {
            FallbackTarget::MapCenter => ctx.world.bounds()?.center(),
            FallbackTarget::Opponent => ctx.opponent()?,
        };
        (ctx.last_target != Some(target)).then_some(Directive::Path(target))
    }
}

/// The default rule chain, in evaluation order.
#[must_use]
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ShootIncomingBullet),
        Box::new(BreakWallTie),
        Box::new(EngageOpponent),
        Box::new(EscapeClosingBoundary),
        Box::new(CollectPowerup),
        Box::new(MoveToFallback),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::GameObject;

    fn world(objects: Vec<(&str, GameObject)>) -> WorldState {
        let mut world = WorldState::new("me", Some("them".to_string()));
        world.apply_init(objects.into_iter().map(|(id, o)| (id.to_string(), o)));
        world
    }

    fn closing(min: f64, max: f64) -> GameObject {
        GameObject::polygon(
            ObjectKind::ClosingBoundary,
            vec![
                Point::new(min, max),
                Point::new(min, min),
                Point::new(max, min),
                Point::new(max, max),
            ],
        )
    }

    #[test]
    fn test_engage_respects_range() {
        let w = world(vec![("them", GameObject::tank(Point::new(400.0, 0.0), 100))]);
        let config = PolicyConfig::default();
        let ctx = TurnContext::new(&w, &config, Point::new(0.0, 0.0), None);
        assert_eq!(EngageOpponent.evaluate(&ctx, &Action::default()), None);

        let close = TurnContext::new(&w, &config, Point::new(200.0, 0.0), None);
        assert_eq!(
            EngageOpponent.evaluate(&close, &Action::default()),
            Some(Directive::Shoot(0.0))
        );
    }

    #[test]
    fn test_engage_at_exact_range() {
        let w = world(vec![("them", GameObject::tank(Point::new(300.0, 0.0), 100))]);
        let config = PolicyConfig::default();
        let ctx = TurnContext::new(&w, &config, Point::new(0.0, 0.0), None);
        assert_eq!(
            EngageOpponent.evaluate(&ctx, &Action::default()),
            Some(Directive::Shoot(0.0))
        );
    }

    #[test]
    fn test_shoot_incoming_uses_projected_position() {
        let w = world(vec![(
            "b",
            GameObject::bullet(Point::new(0.0, 60.0), Point::new(0.0, -10.0), "them"),
        )]);
        let config = PolicyConfig::default();
        let ctx = TurnContext::new(&w, &config, Point::new(0.0, 0.0), None);
        let Some(Directive::Shoot(bearing)) =
            ShootIncomingBullet.evaluate(&ctx, &Action::default())
        else {
            panic!("expected a shot");
        };
        assert!((bearing - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_stand_off_backs_away_from_opponent() {
        let w = world(vec![
            ("c", closing(0.0, 1000.0)),
            ("them", GameObject::tank(Point::new(500.0, 500.0), 100)),
        ]);
        let config = PolicyConfig {
            boundary_response: BoundaryResponse::StandOff,
            ..PolicyConfig::default()
        };
        // Tank near the bottom edge, directly below the opponent.
        let ctx = TurnContext::new(&w, &config, Point::new(500.0, 60.0), None);
        assert_eq!(
            EscapeClosingBoundary.evaluate(&ctx, &Action::default()),
            Some(Directive::Path(Point::new(500.0, 350.0)))
        );

        // Far stand-off gets clamped inside the inset area.
        let far = PolicyConfig {
            standoff_distance: 900.0,
            ..config
        };
        let ctx = TurnContext::new(&w, &far, Point::new(500.0, 60.0), None);
        assert_eq!(
            EscapeClosingBoundary.evaluate(&ctx, &Action::default()),
            Some(Directive::Path(Point::new(500.0, 50.0)))
        );
    }

    #[test]
    fn test_stand_off_without_opponent_nudges() {
        let w = world(vec![("c", closing(0.0, 1000.0))]);
        let config = PolicyConfig {
            boundary_response: BoundaryResponse::StandOff,
            ..PolicyConfig::default()
        };
        let ctx = TurnContext::new(&w, &config, Point::new(500.0, 60.0), None);
        assert_eq!(
            EscapeClosingBoundary.evaluate(&ctx, &Action::default()),
            Some(Directive::Path(Point::new(500.0, 110.0)))
        );
    }

    #[test]
    fn test_collect_powerup_defers_to_existing_path() {
        let w = world(vec![
            ("p1", GameObject::at(ObjectKind::Powerup, Point::new(30.0, 0.0))),
            ("p2", GameObject::at(ObjectKind::Powerup, Point::new(10.0, 0.0))),
        ]);
        let config = PolicyConfig::default();
        let ctx = TurnContext::new(&w, &config, Point::new(0.0, 0.0), None);
        assert_eq!(
            CollectPowerup.evaluate(&ctx, &Action::default()),
            Some(Directive::Path(Point::new(10.0, 0.0)))
        );

        let moving = Action {
            shoot: None,
            path: Some(Point::new(1.0, 1.0)),
        };
        assert_eq!(CollectPowerup.evaluate(&ctx, &moving), None);
    }

    #[test]
    fn test_fallback_skips_repeat_and_busy_turns() {
        let mut w = world(vec![(
            "b",
            GameObject::polygon(
                ObjectKind::Boundary,
                vec![
                    Point::new(0.0, 800.0),
                    Point::new(0.0, 0.0),
                    Point::new(600.0, 0.0),
                    Point::new(600.0, 800.0),
                ],
            ),
        )]);
        w.compute_bounds().unwrap();
        let config = PolicyConfig::default();
        let center = Point::new(300.0, 400.0);

        let ctx = TurnContext::new(&w, &config, Point::new(0.0, 0.0), None);
        assert_eq!(
            MoveToFallback.evaluate(&ctx, &Action::default()),
            Some(Directive::Path(center))
        );

        let repeat = TurnContext::new(&w, &config, Point::new(0.0, 0.0), Some(center));
        assert_eq!(MoveToFallback.evaluate(&repeat, &Action::default()), None);

        let shooting = Action {
            shoot: Some(10.0),
            path: None,
        };
        assert_eq!(MoveToFallback.evaluate(&ctx, &shooting), None);
    }

    #[test]
    fn test_default_order() {
        let names: Vec<_> = default_rules().iter().map(|rule| rule.name()).collect();
        assert_eq!(
            names,
            [
                "shoot-incoming-bullet",
                "break-wall-tie",
                "engage-opponent",
                "escape-closing-boundary",
                "collect-powerup",
                "fallback-target",
            ]
        );
    }
}
