//! Property-based tests for world sync and spatial queries.
//!
//! Run with: cargo test --release prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::float_cmp)]

use std::collections::BTreeMap;

use proptest::prelude::*;

use tankbot::spatial::{bearing_degrees, distance, nearest, segment_clears};
use tankbot::world::Delta;
use tankbot::{GameObject, ObjectKind, PolicyEngine, Point, WorldState};

fn coord() -> impl Strategy<Value = f64> {
    -5000.0f64..5000.0
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn id() -> impl Strategy<Value = String> {
    "[a-f]{1,2}"
}

fn object() -> impl Strategy<Value = GameObject> {
    (1u8..=7, point()).prop_map(|(code, p)| {
        let kind = ObjectKind::try_from(code).unwrap();
        if kind.is_boundary() {
            GameObject::polygon(kind, vec![p, Point::new(p.x + 10.0, p.y + 10.0)])
        } else {
            GameObject::at(kind, p)
        }
    })
}

fn angle_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// After a delta, an id is present iff it was updated, or it was
    /// present before and not deleted.
    #[test]
    fn prop_delete_then_update(
        initial in prop::collection::btree_map(id(), object(), 0..12),
        deleted in prop::collection::vec(id(), 0..8),
        updated in prop::collection::btree_map(id(), object(), 0..8),
    ) {
        let mut world = WorldState::new("me", None);
        world.apply_init(initial.clone());
        world.apply_delta(Delta { deleted: deleted.clone(), updated: updated.clone() });

        let mut expected: BTreeMap<String, GameObject> = initial;
        for gone in &deleted {
            expected.remove(gone);
        }
        expected.extend(updated.clone());

        prop_assert_eq!(world.len(), expected.len());
        for (key, object) in &expected {
            prop_assert_eq!(world.get(key), Some(object));
        }
        for key in updated.keys() {
            prop_assert!(world.contains(key));
        }
    }

    /// Distance is symmetric and zero on the diagonal.
    #[test]
    fn prop_distance_symmetric(a in point(), b in point()) {
        prop_assert_eq!(distance(a, b), distance(b, a));
        prop_assert_eq!(distance(a, a), 0.0);
        prop_assert!(distance(a, b) >= 0.0);
    }

    /// Bearings stay in (-180, 180] and reverse by half a turn.
    #[test]
    fn prop_bearing_reverses(a in point(), b in point()) {
        prop_assume!(a != b);
        let forward = bearing_degrees(a, b);
        let back = bearing_degrees(b, a);
        prop_assert!(forward > -180.0 && forward <= 180.0);
        prop_assert!((angle_gap(forward, back) - 180.0).abs() < 1e-9);
    }

    /// Nearest never loses to another qualifying candidate.
    #[test]
    fn prop_nearest_is_minimal(
        from in point(),
        candidates in prop::collection::vec(point(), 0..16),
    ) {
        let found = nearest(candidates.iter().copied().enumerate(), from, |_| true);
        match found {
            None => prop_assert!(candidates.is_empty()),
            Some(best) => {
                for (i, p) in candidates.iter().enumerate() {
                    let d = distance(from, *p);
                    prop_assert!(best.distance <= d);
                    if d == best.distance {
                        prop_assert!(best.item <= i);
                    }
                }
            }
        }
    }

    /// A point on the line is blocked by any positive buffer.
    #[test]
    fn prop_segment_blocks_points_on_line(p1 in point(), p2 in point(), t in 0.0f64..1.0) {
        prop_assume!(distance(p1, p2) > 1.0);
        let on_line = Point::new(p1.x + (p2.x - p1.x) * t, p1.y + (p2.y - p1.y) * t);
        prop_assert!(!segment_clears(p1, p2, on_line, 1e-6));
    }

    /// Bounds are the vertex maxima and are fixed after the first computation.
    #[test]
    fn prop_bounds_are_vertex_maxima(
        boundaries in prop::collection::vec(prop::collection::vec(point(), 1..5), 1..4),
        later in point(),
    ) {
        let mut world = WorldState::new("me", None);
        world.apply_init(boundaries.iter().enumerate().map(|(i, vertices)| {
            (format!("b{i}"), GameObject::polygon(ObjectKind::Boundary, vertices.clone()))
        }));
        let bounds = world.compute_bounds().unwrap();

        let all = boundaries.iter().flatten();
        let max_x = all.clone().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = all.map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(bounds.width, max_x);
        prop_assert_eq!(bounds.height, max_y);

        world.apply_delta(Delta {
            deleted: Vec::new(),
            updated: BTreeMap::from([(
                "late".to_string(),
                GameObject::polygon(ObjectKind::Boundary, vec![later]),
            )]),
        });
        prop_assert!(world.compute_bounds().is_err());
        prop_assert_eq!(world.bounds(), Some(bounds));
    }

    /// Deciding over an arbitrary world never panics, and any move target
    /// becomes the engine's memo.
    #[test]
    fn prop_decide_total(
        objects in prop::collection::btree_map(id(), object(), 0..20),
        me in point(),
    ) {
        let mut world = WorldState::new("me", None);
        world.apply_init(objects);
        world.apply_init([("me".to_string(), GameObject::tank(me, 3))]);
        let mut engine = PolicyEngine::default();
        let action = engine.decide(&world).unwrap();
        if let Some(target) = action.path {
            prop_assert_eq!(engine.last_target(), Some(target));
        }
        if let Some(bearing) = action.shoot {
            prop_assert!(bearing.is_finite());
        }
    }
}
