//! Records supplied by the host application and the source abstraction
//! the exporters read them through.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExportResult;

/// A named entity from the loaded game data (sound, sprite or object).
///
/// `parent` holds the name of the referenced record of the same kind, already
/// resolved by the source. `Some("")` is a reference to an unnamed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Record collections a source exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Sound,
    Sprite,
    Object,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sound => "sounds",
            Self::Sprite => "sprites",
            Self::Object => "objects",
        };
        f.write_str(name)
    }
}

/// Ordered, finite, restartable access to host records.
pub trait RecordSource {
    /// Fails with `ExportError::PreconditionUnmet` when the loaded data
    /// exposes no usable names.
    fn check_available(&self) -> ExportResult<()>;

    /// Records of one kind, in source order. Calling this again yields the
    /// same sequence.
    fn records(&self, kind: RecordKind) -> &[Record];
}

/// In-memory source, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub sounds: Vec<Record>,
    pub sprites: Vec<Record>,
    pub objects: Vec<Record>,
    /// Reason the data is unusable, if any.
    pub unavailable: Option<String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: RecordKind, records: Vec<Record>) -> Self {
        match kind {
            RecordKind::Sound => self.sounds = records,
            RecordKind::Sprite => self.sprites = records,
            RecordKind::Object => self.objects = records,
        }
        self
    }

    pub fn unavailable(mut self, reason: impl Into<String>) -> Self {
        self.unavailable = Some(reason.into());
        self
    }
}

impl RecordSource for MemorySource {
    fn check_available(&self) -> ExportResult<()> {
        match &self.unavailable {
            Some(reason) => Err(crate::error::ExportError::PreconditionUnmet {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Sound => &self.sounds,
            RecordKind::Sprite => &self.sprites,
            RecordKind::Object => &self.objects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_is_restartable() {
        let source = MemorySource::new().with(
            RecordKind::Sound,
            vec![Record::new("snd_click"), Record::new("snd_open")],
        );

        let first: Vec<_> = source.records(RecordKind::Sound).to_vec();
        let second: Vec<_> = source.records(RecordKind::Sound).to_vec();
        assert_eq!(first, second);
        assert!(source.records(RecordKind::Object).is_empty());
        assert!(source.check_available().is_ok());
    }

    #[test]
    fn test_unavailable_source() {
        let source = MemorySource::new().unavailable("compiled data");
        let err = source.check_available().unwrap_err();
        assert!(err.to_string().contains("compiled data"));
    }
}
