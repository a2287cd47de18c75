//! Play command implementation.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tankbot::PolicyEngine;
use tankbot::protocol::MessageReader;
use tankbot::session;

use super::{CliError, load_config};

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration or transcript file cannot be
/// opened, or the session fails.
pub(crate) fn execute(config: Option<&Path>, record: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config)?;

    let mut reader = MessageReader::new(io::stdin().lock());
    if let Some(path) = record {
        let file = File::create(path).map_err(|e| {
            CliError::new(format!("Failed to create transcript {}: {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "recording transcript");
        reader = reader.with_recorder(Box::new(BufWriter::new(file)));
    }

    session::play(reader, io::stdout().lock(), PolicyEngine::new(config))?;
    Ok(())
}
