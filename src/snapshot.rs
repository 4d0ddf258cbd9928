//! File-backed record source.
//!
//! The host application dumps its loaded data to a JSON snapshot; parent
//! references are zero-based indices into the same collection:
//!
//! ```json
//! {
//!   "game": "Example",
//!   "compiled": false,
//!   "sounds":  [{ "name": "snd_click" }],
//!   "objects": [{ "name": "obj_enemy" }, { "name": "obj_orc", "parent": 0 }]
//! }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::record::{Record, RecordKind, RecordSource};

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    game: Option<String>,
    #[serde(default)]
    compiled: bool,
    #[serde(default)]
    sounds: Vec<RawRecord>,
    #[serde(default)]
    sprites: Vec<RawRecord>,
    #[serde(default)]
    objects: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    name: String,
    #[serde(default)]
    parent: Option<usize>,
}

/// Records loaded from a host snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
    game: Option<String>,
    compiled: bool,
    sounds: Vec<Record>,
    sprites: Vec<Record>,
    objects: Vec<Record>,
}

impl SnapshotSource {
    /// Read and validate a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> ExportResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let source = Self::from_json(&content, path)?;
        tracing::debug!(
            target: "snapshot",
            "loaded {} ({}): {} sounds, {} sprites, {} objects",
            path.display(),
            source.game().unwrap_or("unnamed"),
            source.sounds.len(),
            source.sprites.len(),
            source.objects.len()
        );
        Ok(source)
    }

    /// Parse snapshot text. `path` is only used in error messages.
    pub fn from_json(content: &str, path: &Path) -> ExportResult<Self> {
        let raw: RawSnapshot =
            serde_json::from_str(content).map_err(|e| ExportError::InvalidSnapshot {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            game: raw.game,
            compiled: raw.compiled,
            sounds: resolve(raw.sounds, RecordKind::Sound, path)?,
            sprites: resolve(raw.sprites, RecordKind::Sprite, path)?,
            objects: resolve(raw.objects, RecordKind::Object, path)?,
        })
    }

    pub fn game(&self) -> Option<&str> {
        self.game.as_deref()
    }
}

/// Turn parent indices into parent names, rejecting dangling references.
fn resolve(raw: Vec<RawRecord>, kind: RecordKind, path: &Path) -> ExportResult<Vec<Record>> {
    let names: Vec<&str> = raw.iter().map(|r| r.name.as_str()).collect();
    raw.iter()
        .enumerate()
        .map(|(i, r)| {
            let parent = match r.parent {
                None => None,
                Some(p) => match names.get(p) {
                    Some(name) => Some((*name).to_string()),
                    None => {
                        return Err(ExportError::InvalidSnapshot {
                            path: path.to_path_buf(),
                            reason: format!(
                                "{kind}[{i}] '{}' references parent {p}, but only {} {kind} exist",
                                r.name,
                                names.len()
                            ),
                        });
                    }
                },
            };
            Ok(Record {
                name: r.name.clone(),
                parent,
            })
        })
        .collect()
}

impl RecordSource for SnapshotSource {
    fn check_available(&self) -> ExportResult<()> {
        if self.compiled {
            return Err(ExportError::PreconditionUnmet {
                reason: format!(
                    "{} was loaded from compiled data; no names or indices are available",
                    self.path.display()
                ),
            });
        }
        Ok(())
    }

    fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Sound => &self.sounds,
            RecordKind::Sprite => &self.sprites,
            RecordKind::Object => &self.objects,
        }
    }
}
