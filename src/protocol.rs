//! Wire protocol.
//!
//! One JSON message per line in each direction. Inbound payloads are wrapped
//! as `{"message": {...}}`; the `END_INIT` and `END` sentinels arrive on
//! their own lines, bare or quoted. Outbound actions are bare objects.

mod codec;
mod message;

pub use codec::{Frame, MessageReader, MessageWriter, Signal};
pub use message::TankIds;
