//! The turn loop.
//!
//! A session reads the handshake and the init snapshots, fixes the map
//! bounds, then alternates between reading one turn message and writing at
//! most one action until the server sends `END`.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::BotResult;
use crate::policy::{Action, PolicyEngine};
use crate::protocol::{MessageReader, MessageWriter, TankIds};
use crate::world::{MapBounds, WorldState};

/// What happened on one turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TurnRecord {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// The action written, or `None` if the turn was skipped.
    pub action: Option<Action>,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    /// Turn messages processed.
    pub turns_played: u64,
    /// Actions written.
    pub actions_emitted: u64,
    /// Turns with no action because the controlled tank was absent.
    pub skipped_turns: u64,
    /// Actions that fired.
    pub shots: u64,
    /// Actions that set a movement target.
    pub moves: u64,
}

impl SessionReport {
    /// Fold one turn into the totals.
    pub fn record(&mut self, turn: &TurnRecord) {
        self.turns_played += 1;
        match turn.action {
            Some(action) => {
                self.actions_emitted += 1;
                self.shots += u64::from(action.shoot.is_some());
                self.moves += u64::from(action.path.is_some());
            }
            None => self.skipped_turns += 1,
        }
    }
}

/// A live session after the handshake.
#[derive(Debug)]
pub struct Session<R, W> {
    reader: MessageReader<R>,
    writer: MessageWriter<W>,
    engine: PolicyEngine,
    world: WorldState,
    bounds: MapBounds,
    turn: u64,
    report: SessionReport,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Run the handshake and init phase.
    ///
    /// Reads the tank identifiers, applies init snapshots up to `END_INIT`,
    /// computes the map bounds and resets the engine's memo.
    ///
    /// # Errors
    ///
    /// Returns an error on protocol violations, I/O failures, or when init
    /// carried no boundary.
    pub fn start(
        mut reader: MessageReader<R>,
        writer: MessageWriter<W>,
        mut engine: PolicyEngine,
    ) -> BotResult<Self> {
        let TankIds { own, enemy } = reader.read_handshake()?;
        if enemy.is_none() {
            warn!(tank = %own, "handshake has no enemy tank id, targeting any other tank");
        }
        let mut world = WorldState::new(own, enemy);

        let mut snapshots = 0usize;
        while let Some(snapshot) = reader.read_init()? {
            world.apply_init(snapshot.updated);
            snapshots += 1;
        }
        let bounds = world.compute_bounds()?;
        engine.reset();

        info!(
            tank = world.self_id(),
            enemy = world.enemy_id().unwrap_or("-"),
            snapshots,
            objects = world.len(),
            width = bounds.width,
            height = bounds.height,
            "session started"
        );

        Ok(Self {
            reader,
            writer,
            engine,
            world,
            bounds,
            turn: 0,
            report: SessionReport::default(),
        })
    }

    /// The synchronized world.
    #[must_use]
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// Map bounds fixed at init.
    #[must_use]
    pub const fn bounds(&self) -> MapBounds {
        self.bounds
    }

    /// Totals so far.
    #[must_use]
    pub const fn report(&self) -> SessionReport {
        self.report
    }

    /// Read one turn, decide, and write the action.
    ///
    /// Returns `Break` on the session-end signal without writing anything.
    /// When the controlled tank is absent the turn is skipped and nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error on protocol violations or I/O failures.
    pub fn play_turn(&mut self) -> BotResult<ControlFlow<(), TurnRecord>> {
        let update = self.reader.read_turn()?;
        if self.world.apply_turn(update).is_break() {
            return Ok(ControlFlow::Break(()));
        }

        self.turn += 1;
        let action = self.engine.decide(&self.world);
        if let Some(action) = &action {
            self.writer.write_action(action)?;
        }
        debug!(
            turn = self.turn,
            hp = self.world.tank_state().map(|tank| tank.hp),
            ?action,
            objects = self.world.len(),
            "turn played"
        );

        let record = TurnRecord {
            turn: self.turn,
            action,
        };
        self.report.record(&record);
        Ok(ControlFlow::Continue(record))
    }

    /// Play until `END`, passing each turn to `on_turn`.
    ///
    /// # Errors
    ///
    /// Stops at the first error.
    pub fn run_with<F>(mut self, mut on_turn: F) -> BotResult<SessionReport>
    where
        F: FnMut(&TurnRecord),
    {
        while let ControlFlow::Continue(record) = self.play_turn()? {
            on_turn(&record);
        }
        let report = self.report;
        info!(
            turns = report.turns_played,
            actions = report.actions_emitted,
            skipped = report.skipped_turns,
            shots = report.shots,
            moves = report.moves,
            "session ended"
        );
        Ok(report)
    }

    /// Play until `END`.
    ///
    /// # Errors
    ///
    /// Stops at the first error.
    pub fn run(self) -> BotResult<SessionReport> {
        self.run_with(|_| {})
    }
}

/// Run a whole session over the given streams.
///
/// # Errors
///
/// Returns the first protocol, world or I/O error.
pub fn play<R: BufRead, W: Write>(
    reader: MessageReader<R>,
    output: W,
    engine: PolicyEngine,
) -> BotResult<SessionReport> {
    Session::start(reader, MessageWriter::new(output), engine)?.run()
}
