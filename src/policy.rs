//! Rule-priority decision engine.
//!
//! Each turn the engine runs an ordered list of [`Rule`]s against a blank
//! [`Action`]. A rule that fires overwrites the field it targets, so a later
//! rule takes precedence over an earlier one for the same field. The only
//! state kept between turns is the last movement target issued.

mod action;
mod config;
mod rules;

pub use action::{Action, Directive};
pub use config::{BoundaryResponse, FallbackTarget, PolicyConfig};
pub use rules::{
    BreakWallTie, CollectPowerup, EngageOpponent, EscapeClosingBoundary, MoveToFallback, Rule,
    ShootIncomingBullet, TurnContext, default_rules,
};

use tracing::debug;

use crate::geometry::Point;
use crate::world::{GameObject, WorldState};

/// Decides one action per turn.
#[derive(Debug)]
pub struct PolicyEngine {
    config: PolicyConfig,
    rules: Vec<Box<dyn Rule>>,
    last_target: Option<Point>,
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl PolicyEngine {
    /// Create an engine with the default rule chain.
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self::with_rules(config, default_rules())
    }

    /// Create an engine with a custom rule chain.
    #[must_use]
    pub fn with_rules(config: PolicyConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            config,
            rules,
            last_target: None,
        }
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    /// The last movement target issued.
    ///
    /// Any rule that sets `path` counts, so powerup and boundary moves
    /// update it as well as the fallback.
    #[must_use]
    pub const fn last_target(&self) -> Option<Point> {
        self.last_target
    }

    /// Forget the last movement target. Called at session start.
    pub fn reset(&mut self) {
        self.last_target = None;
    }

    /// Decide this turn's action.
    ///
    /// Returns `None` when the controlled tank is not on the map. The
    /// returned action may be empty.
    pub fn decide(&mut self, world: &WorldState) -> Option<Action> {
        let Some(tank) = world.self_tank().and_then(GameObject::point) else {
            debug!(tank = world.self_id(), "controlled tank not on the map");
            return None;
        };

        let ctx = TurnContext::new(world, &self.config, tank, self.last_target);
        let mut action = Action::default();
        for rule in &self.rules {
            if let Some(directive) = rule.evaluate(&ctx, &action) {
                debug!(rule = rule.name(), ?directive, "rule fired");
                action.apply(directive);
            }
        }

        if let Some(target) = action.path {
            self.last_target = Some(target);
        }
        Some(action)
    }
}
