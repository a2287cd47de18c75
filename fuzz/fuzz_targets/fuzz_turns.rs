#![no_main]

//! Delta and decision fuzzer.
//!
//! Builds a world from structured input, then applies a sequence of deltas
//! and decides after each one, checking the sync and memo invariants.

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tankbot::world::Delta;
use tankbot::{GameObject, ObjectKind, PolicyEngine, Point, WorldState};

/// A fuzzer-generated object.
#[derive(Arbitrary, Debug, Clone)]
struct FuzzObject {
    /// Index into a small id pool so deletes hit existing objects.
    id: u8,
    /// Object type code, reduced into 1..=7.
    kind: u8,
    x: i16,
    y: i16,
    vx: i8,
    vy: i8,
}

impl FuzzObject {
    fn id(&self) -> String {
        match self.id % 8 {
            0 => "me".to_string(),
            1 => "them".to_string(),
            n => format!("o{n}"),
        }
    }

    fn object(&self) -> GameObject {
        let kind = ObjectKind::try_from(self.kind % 7 + 1).unwrap_or(ObjectKind::Wall);
        let p = Point::new(f64::from(self.x), f64::from(self.y));
        match kind {
            ObjectKind::Boundary | ObjectKind::ClosingBoundary => GameObject::polygon(
                kind,
                vec![p, Point::new(p.x + 400.0, p.y + 400.0)],
            ),
            ObjectKind::Bullet => GameObject::bullet(
                p,
                Point::new(f64::from(self.vx), f64::from(self.vy)),
                if self.vx % 2 == 0 { "them" } else { "me" },
            ),
            ObjectKind::Tank => GameObject::tank(p, 5),
            _ => GameObject::at(kind, p),
        }
    }
}

/// One fuzzed turn.
#[derive(Arbitrary, Debug)]
struct FuzzTurn {
    deleted: Vec<u8>,
    updated: Vec<FuzzObject>,
}

/// Structured input for turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnsInput {
    init: Vec<FuzzObject>,
    turns: Vec<FuzzTurn>,
}

fuzz_target!(|input: TurnsInput| {
    let mut world = WorldState::new("me", Some("them".to_string()));
    world.apply_init(input.init.iter().take(64).map(|o| (o.id(), o.object())));
    let _ = world.compute_bounds();
    let mut engine = PolicyEngine::default();

    for turn in input.turns.iter().take(32) {
        let deleted: Vec<String> = turn
            .deleted
            .iter()
            .map(|&id| FuzzObject { id, kind: 0, x: 0, y: 0, vx: 0, vy: 0 }.id())
            .collect();
        let updated: BTreeMap<String, GameObject> =
            turn.updated.iter().take(16).map(|o| (o.id(), o.object())).collect();
        let updated_ids: Vec<String> = updated.keys().cloned().collect();

        world.apply_delta(Delta { deleted, updated });
        for id in &updated_ids {
            assert!(world.contains(id));
        }

        if let Some(action) = engine.decide(&world) {
            if let Some(target) = action.path {
                assert_eq!(engine.last_target(), Some(target));
            }
        } else {
            assert!(world.self_tank().is_none());
        }
    }
});
