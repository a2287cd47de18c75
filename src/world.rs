//! World model for the bot.
//!
//! Holds every object the server has told us about:
//! - Object records and their kinds
//! - Delta application (deletions, then full-record upserts)
//! - Map bounds, derived once after init

mod object;
mod state;

pub use object::{GameObject, ObjectKind, Position, TankState};
pub use state::{Delta, MapBounds, TurnUpdate, WorldState};
