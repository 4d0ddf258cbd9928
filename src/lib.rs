pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod io;
pub mod logging;
pub mod paths;
pub mod projector;
pub mod record;
pub mod snapshot;
pub mod writer;

pub use config::Settings;
pub use error::{ConfigError, ExportError, ExportResult};
pub use export::{ExportKind, ExportReport, run_export, run_exports};
pub use hierarchy::{HierarchyMap, descendants, group_by_parent};
pub use paths::{PathConfig, resolve_output_dir};
pub use projector::{NameIndex, project_index};
pub use record::{MemorySource, Record, RecordKind, RecordSource};
pub use snapshot::SnapshotSource;
pub use writer::write_json;
