//! Benchmarks for the per-turn decision path.
//!
//! The server expects an answer every turn, so `decide` over a busy arena
//! and delta application are the hot paths.

#![allow(missing_docs)]

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tankbot::world::Delta;
use tankbot::{GameObject, ObjectKind, PolicyEngine, Point, WorldState};

fn square(kind: ObjectKind, min: f64, max: f64) -> GameObject {
    GameObject::polygon(
        kind,
        vec![
            Point::new(min, max),
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
        ],
    )
}

/// A 1000x1000 arena with a wall grid, bullets in flight and a few powerups.
fn busy_world() -> WorldState {
    let mut objects = vec![
        ("edge".to_string(), square(ObjectKind::Boundary, 0.0, 1000.0)),
        ("ring".to_string(), square(ObjectKind::ClosingBoundary, 80.0, 920.0)),
        ("me".to_string(), GameObject::tank(Point::new(140.0, 500.0), 5)),
        ("them".to_string(), GameObject::tank(Point::new(700.0, 520.0), 5)),
    ];
    for i in 0..20 {
        for j in 0..10 {
            let kind = if (i + j) % 3 == 0 {
                ObjectKind::Wall
            } else {
                ObjectKind::DestructibleWall
            };
            let p = Point::new(25.0 + f64::from(i) * 50.0, 50.0 + f64::from(j) * 100.0);
            objects.push((format!("wall-{i}-{j}"), GameObject::at(kind, p)));
        }
    }
    for i in 0..30 {
        let p = Point::new(900.0 - f64::from(i) * 25.0, 300.0 + f64::from(i) * 10.0);
        objects.push((
            format!("bullet-{i}"),
            GameObject::bullet(p, Point::new(-12.0, 0.0), "them"),
        ));
    }
    for i in 0..5 {
        let p = Point::new(200.0 + f64::from(i) * 120.0, 800.0);
        objects.push((
            format!("powerup-{i}"),
            GameObject::at(ObjectKind::Powerup, p),
        ));
    }

    let mut world = WorldState::new("me", Some("them".to_string()));
    world.apply_init(objects);
    world
}

fn bench_decide(c: &mut Criterion) {
    let world = busy_world();
    let mut engine = PolicyEngine::default();

    c.bench_function("decide_busy_arena", |b| {
        b.iter(|| {
            engine.reset();
            black_box(engine.decide(black_box(&world)))
        });
    });
}

fn bench_apply_delta(c: &mut Criterion) {
    let base = busy_world();
    let delta = Delta {
        deleted: (0..10).map(|i| format!("bullet-{i}")).collect(),
        updated: (10..30)
            .map(|i| {
                let p = Point::new(600.0 - f64::from(i) * 10.0, 400.0);
                (
                    format!("bullet-{i}"),
                    GameObject::bullet(p, Point::new(-12.0, 0.0), "them"),
                )
            })
            .collect::<BTreeMap<_, _>>(),
    };

    c.bench_function("apply_delta_30_objects", |b| {
        b.iter(|| {
            let mut world = base.clone();
            world.apply_delta(black_box(delta.clone()));
            black_box(world.len())
        });
    });
}

criterion_group!(benches, bench_decide, bench_apply_delta);
criterion_main!(benches);
