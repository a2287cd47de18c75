//! Replay command implementation.

use std::path::Path;

use tankbot::replay::Replay;

use super::{CliError, ReplayFormat, load_config};

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the replay fails.
pub(crate) fn execute(
    transcript: &Path,
    config: Option<&Path>,
    format: ReplayFormat,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let replay = Replay::from_file(transcript, config).map_err(|e| {
        CliError::new(format!("Failed to replay {}: {e}", transcript.display()))
    })?;

    match format {
        ReplayFormat::Text => print!("{}", replay.render_text()),
        ReplayFormat::Json => println!("{}", serde_json::to_string_pretty(&replay)?),
    }
    Ok(())
}
