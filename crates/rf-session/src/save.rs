//! Save-game capture and restore.
//!
//! The on-disk format is pretty-printed JSON of [`SaveGame`]. It is a
//! convenience, not a compatibility surface; battles are ephemeral and
//! are never saved.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rf_core::PlayerState;
use rf_story::{NodeId, Progress};

use crate::error::SessionResult;

/// Everything needed to restore a session between battles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// The full player state.
    pub player: PlayerState,
    /// Learned skill ranks, keyed by skill id.
    pub skill_ranks: BTreeMap<String, u32>,
    /// Points spent per skill branch.
    pub branch_points: BTreeMap<String, u32>,
    /// The active chapter id.
    pub chapter: String,
    /// The active node id.
    pub node: NodeId,
    /// Story traversal progress.
    pub progress: Progress,
}

impl SaveGame {
    /// Write the save to a file.
    pub fn write_to(&self, path: &Path) -> SessionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a save from a file.
    pub fn read_from(path: &Path) -> SessionResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rf_core::bundle;

    #[test]
    fn round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut player = PlayerState::from_bundle(&bundle::preset::hunter());
        player.add_experience(150);
        player.set_flag("met_rearguard", true);

        let mut progress = Progress::new();
        progress.mark_visited("embers", NodeId::new(1));

        let save = SaveGame {
            saved_at: Utc::now(),
            player,
            skill_ranks: BTreeMap::from([("axe_bite".to_string(), 2)]),
            branch_points: BTreeMap::from([("reaver".to_string(), 2)]),
            chapter: "embers".to_string(),
            node: NodeId::sub(5, 1),
            progress,
        };
        save.write_to(&path).unwrap();

        let loaded = SaveGame::read_from(&path).unwrap();
        assert_eq!(loaded.player.level, 2);
        assert!(loaded.player.flag_is_set("met_rearguard"));
        assert_eq!(loaded.skill_ranks.get("axe_bite"), Some(&2));
        assert_eq!(loaded.node, NodeId::sub(5, 1));
        assert!(loaded.progress.has_visited("embers", NodeId::new(1)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SaveGame::read_from(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::error::SessionError::Io(_)));
    }
}
