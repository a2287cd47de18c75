// Allow unwrap and exact float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! tankbot: a bot for a turn-based 2D arena tank game.
//!
//! The bot keeps a local copy of the arena in sync with the server's
//! per-turn deltas and answers every turn with one action chosen by a
//! fixed-priority rule chain.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Session (handshake, turn loop)    │
//! ├─────────────────────────────────────┤
//! │  Protocol (line-delimited JSON)     │
//! ├─────────────────────────────────────┤
//! │  PolicyEngine (ordered rules)       │
//! ├─────────────────────────────────────┤
//! │  ThreatModel / spatial queries      │
//! ├─────────────────────────────────────┤
//! │  WorldState (objects, map bounds)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! The session owns the world exclusively; the only state carried between
//! turns besides the world is the engine's last movement target.

pub mod error;
pub mod geometry;
pub mod policy;
pub mod protocol;
pub mod replay;
pub mod session;
pub mod spatial;
pub mod threat;
pub mod world;

pub use error::{BotError, BotResult, ConfigError, Phase, ProtocolError, WorldError};
pub use geometry::{Point, Rect};
pub use policy::{Action, PolicyConfig, PolicyEngine, Rule};
pub use session::{Session, SessionReport, TurnRecord};
pub use world::{GameObject, ObjectKind, WorldState};
