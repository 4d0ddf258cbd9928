//! Export command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::Settings;
use crate::error::{ConfigError, ExportError, ExportResult};
use crate::export::{ExportKind, ExportReport, render, run_exports};
use crate::io::{Envelope, ExitCode};
use crate::paths::PathConfig;
use crate::record::RecordSource;
use crate::snapshot::SnapshotSource;

/// Arguments for the export command after CLI parsing.
pub struct ExportArgs {
    pub kinds: Vec<ExportKind>,
    pub snapshot: Option<PathBuf>,
    pub paths: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub stdout: bool,
    pub json: bool,
}

/// Run export command.
pub fn run(args: ExportArgs, settings: &Settings) -> ExitCode {
    let started = Instant::now();
    let kinds = if args.kinds.is_empty() {
        ExportKind::ALL.to_vec()
    } else {
        args.kinds.clone()
    };

    if args.stdout {
        let [kind] = kinds[..] else {
            eprintln!("Error: --stdout needs exactly one export kind");
            return ExitCode::GeneralError;
        };
        return match print_single(&args, kind, settings) {
            Ok(()) => ExitCode::Success,
            Err(e) => report_error(&e, false),
        };
    }

    match execute(&args, &kinds, settings) {
        Ok(reports) => {
            if args.json {
                let count = reports.len();
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                let envelope = Envelope::success(reports)
                    .with_count(count)
                    .with_message(format!("Exported {count} file(s)"))
                    .with_duration_ms(elapsed_ms);
                match envelope.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::GeneralError;
                    }
                }
            } else {
                for report in &reports {
                    println!("{report}");
                }
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e, args.json),
    }
}

fn execute(
    args: &ExportArgs,
    kinds: &[ExportKind],
    settings: &Settings,
) -> ExportResult<Vec<ExportReport>> {
    let source = load_source(args, settings)?;
    source.check_available()?;
    let out_dir = match &args.out {
        Some(dir) => dir.clone(),
        None => {
            let paths_file = args.paths.as_ref().unwrap_or(&settings.paths.file);
            PathConfig::load(paths_file)?.resolve(&settings.paths.output_key)?
        }
    };
    run_exports(&source, kinds, &out_dir)
}

fn print_single(args: &ExportArgs, kind: ExportKind, settings: &Settings) -> ExportResult<()> {
    let source = load_source(args, settings)?;
    let (text, _) = render(&source, kind)?;
    println!("{text}");
    Ok(())
}

fn load_source(args: &ExportArgs, settings: &Settings) -> ExportResult<SnapshotSource> {
    let path: &Path = match (&args.snapshot, &settings.source.snapshot) {
        (Some(path), _) | (None, Some(path)) => path.as_path(),
        (None, None) => return Err(ConfigError::MissingSnapshot.into()),
    };
    SnapshotSource::load(path)
}

fn report_error(err: &ExportError, json: bool) -> ExitCode {
    if json {
        let envelope: Envelope<()> = Envelope::from_error(err);
        if let Ok(text) = envelope.to_json() {
            println!("{text}");
        }
    } else {
        eprintln!("Error: {err}");
        for suggestion in err.suggestions() {
            eprintln!("  hint: {suggestion}");
        }
    }
    err.exit_code()
}
