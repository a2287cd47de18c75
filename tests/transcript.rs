//! Recording a live session and replaying the transcript offline.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::fs::File;
use std::io::{Cursor, Write};

use tankbot::protocol::MessageReader;
use tankbot::replay::Replay;
use tankbot::session;
use tankbot::{PolicyConfig, PolicyEngine};

const LIVE: &str = r#"
{"message": {"your-tank-id": "me", "enemy-tank-id": "them"}}

{"message": {"updated_objects": {"edge": {"type": 5, "position": [[0, 600], [0, 0], [600, 0], [600, 600]]}}}}
"END_INIT"
{"message": {"updated_objects": {"me": {"type": 1, "position": [100, 100], "hp": 5, "powerups": {}}}}}
{"message": {"updated_objects": {"them": {"type": 1, "position": [100, 250], "hp": 5, "powerups": {}}}}}
{"message": {"deleted_objects": ["them"], "updated_objects": {"pw": {"type": 7, "position": [300, 100]}}}}
"END"
"#;

#[test]
fn replay_reproduces_live_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.jsonl");

    let mut live_output = Vec::new();
    let reader = MessageReader::new(Cursor::new(LIVE))
        .with_recorder(Box::new(File::create(&path).unwrap()));
    let live = session::play(reader, &mut live_output, PolicyEngine::default()).unwrap();
    assert_eq!(live.turns_played, 3);
    assert_eq!(live.actions_emitted, 3);

    let recorded = std::fs::read_to_string(&path).unwrap();
    assert_eq!(recorded.lines().count(), 7);
    assert!(!recorded.lines().any(|line| line.trim().is_empty()));

    let replay = Replay::from_file(&path, PolicyConfig::default()).unwrap();
    assert_eq!(replay.report, live);

    let replayed: Vec<String> = replay
        .turns
        .iter()
        .map(|turn| serde_json::to_string(&turn.action.unwrap()).unwrap())
        .collect();
    let live_lines: Vec<&str> = std::str::from_utf8(&live_output).unwrap().lines().collect();
    assert_eq!(replayed, live_lines);
}

#[test]
fn replay_under_different_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LIVE.as_bytes()).unwrap();

    let timid = PolicyConfig {
        engagement_range: 10.0,
        ..PolicyConfig::default()
    };
    let replay = Replay::from_file(file.path(), timid).unwrap();
    assert_eq!(replay.report.shots, 0);
    assert!(replay.render_text().contains("SUMMARY: 3 actions, 0 skipped, 0 shots"));
}
