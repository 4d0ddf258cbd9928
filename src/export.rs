//! Exporter catalogue and the export pipeline.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ExportResult;
use crate::hierarchy::group_by_parent;
use crate::projector::project_index;
use crate::record::{RecordKind, RecordSource};
use crate::writer::{to_json_string, write_json};

/// Shape of an exported map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapShape {
    /// Position to name
    Index,
    /// Parent name to child names
    Hierarchy,
}

/// The metadata files this tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    Sounds,
    Sprites,
    Objects,
    ObjectTree,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Sounds,
        ExportKind::Sprites,
        ExportKind::Objects,
        ExportKind::ObjectTree,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Sounds => "sound_index_map.json",
            Self::Sprites => "sprite_index_map.json",
            Self::Objects => "object_index_map.json",
            Self::ObjectTree => "object_tree.json",
        }
    }

    pub fn record_kind(self) -> RecordKind {
        match self {
            Self::Sounds => RecordKind::Sound,
            Self::Sprites => RecordKind::Sprite,
            Self::Objects | Self::ObjectTree => RecordKind::Object,
        }
    }

    pub fn shape(self) -> MapShape {
        match self {
            Self::ObjectTree => MapShape::Hierarchy,
            _ => MapShape::Index,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sounds => "sounds",
            Self::Sprites => "sprites",
            Self::Objects => "objects",
            Self::ObjectTree => "object-tree",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("unknown export '{s}' (expected sounds, sprites, objects or object-tree)")
            })
    }
}

/// Outcome of one exporter.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub kind: ExportKind,
    pub path: PathBuf,
    /// Number of top-level keys written.
    pub entries: usize,
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exported {} entries to {}", self.entries, self.path.display())
    }
}

/// Build the map for `kind` and render it, without writing anything.
pub fn render(source: &dyn RecordSource, kind: ExportKind) -> ExportResult<(String, usize)> {
    source.check_available()?;
    let records = source.records(kind.record_kind());
    match kind.shape() {
        MapShape::Index => {
            let map = project_index(records);
            Ok((to_json_string(&map)?, map.len()))
        }
        MapShape::Hierarchy => {
            let map = group_by_parent(records);
            Ok((to_json_string(&map)?, map.len()))
        }
    }
}

/// Run one exporter, writing `out_dir/<file_name>`.
///
/// The precondition is checked before any transformation, so an unusable
/// source never touches the output directory.
pub fn run_export(
    source: &dyn RecordSource,
    kind: ExportKind,
    out_dir: &Path,
) -> ExportResult<ExportReport> {
    if let Err(e) = source.check_available() {
        tracing::warn!(target: "export", "{kind}: {e}");
        return Err(e);
    }

    tracing::info!(target: "export", "exporting {kind}");
    let records = source.records(kind.record_kind());
    let path = out_dir.join(kind.file_name());
    let entries = match kind.shape() {
        MapShape::Index => {
            let map = project_index(records);
            write_json(&map, &path)?;
            map.len()
        }
        MapShape::Hierarchy => {
            let map = group_by_parent(records);
            write_json(&map, &path)?;
            map.len()
        }
    };

    let report = ExportReport {
        kind,
        path,
        entries,
    };
    tracing::info!(target: "export", "{report}");
    Ok(report)
}

/// Run several exporters in order, stopping at the first failure.
pub fn run_exports(
    source: &dyn RecordSource,
    kinds: &[ExportKind],
    out_dir: &Path,
) -> ExportResult<Vec<ExportReport>> {
    source.check_available()?;
    kinds
        .iter()
        .map(|&kind| run_export(source, kind, out_dir))
        .collect()
}
