//! Offline replay of recorded sessions.
//!
//! A transcript is the inbound side of a session, one line per message,
//! exactly as `play --record` wrote it. Replaying feeds it through the same
//! session loop with the outbound side discarded, so the actions shown are
//! the ones the bot would send for that input under a given configuration.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::BotResult;
use crate::policy::{Action, PolicyConfig, PolicyEngine};
use crate::protocol::{MessageReader, MessageWriter};
use crate::session::{Session, SessionReport, TurnRecord};
use crate::world::MapBounds;

/// Everything a replay produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replay {
    /// Map bounds fixed at init.
    pub bounds: MapBounds,
    /// Per-turn outcomes in order.
    pub turns: Vec<TurnRecord>,
    /// Session totals.
    pub report: SessionReport,
}

impl Replay {
    /// Replay a transcript from any buffered reader.
    ///
    /// # Errors
    ///
    /// Returns the same errors a live session would for this input.
    pub fn from_reader<R: BufRead>(input: R, config: PolicyConfig) -> BotResult<Self> {
        let session = Session::start(
            MessageReader::new(input),
            MessageWriter::new(io::sink()),
            PolicyEngine::new(config),
        )?;
        let bounds = session.bounds();
        let mut turns = Vec::new();
        let report = session.run_with(|record| turns.push(*record))?;
        Ok(Self {
            bounds,
            turns,
            report,
        })
    }

    /// Replay a transcript file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the replay fails.
    pub fn from_file(path: &Path, config: PolicyConfig) -> BotResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), config)
    }

    /// Render as plain text, one line per turn followed by a summary.
    ///
    /// ```text
    /// === REPLAY: 1000x1000 map, 3 turns ===
    /// turn 1: shoot 0.0, path (500.0, 500.0)
    /// turn 2: idle
    /// turn 3: skipped (tank absent)
    ///
    /// SUMMARY: 2 actions, 1 skipped, 1 shots, 1 moves
    /// ```
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut output = format!(
            "=== REPLAY: {}x{} map, {} turns ===\n",
            self.bounds.width, self.bounds.height, self.report.turns_played
        );
        for record in &self.turns {
            output.push_str(&format!("turn {}: {}\n", record.turn, describe(record.action)));
        }
        output.push_str(&format!(
            "\nSUMMARY: {} actions, {} skipped, {} shots, {} moves\n",
            self.report.actions_emitted,
            self.report.skipped_turns,
            self.report.shots,
            self.report.moves
        ));
        output
    }
}

fn describe(action: Option<Action>) -> String {
    let Some(action) = action else {
        return "skipped (tank absent)".to_string();
    };
    let mut parts = Vec::new();
    if let Some(bearing) = action.shoot {
        parts.push(format!("shoot {bearing:.1}"));
    }
    if let Some(target) = action.path {
        parts.push(format!("path ({:.1}, {:.1})", target.x, target.y));
    }
    if parts.is_empty() {
        "idle".to_string()
    } else {
        parts.join(", ")
    }
}
