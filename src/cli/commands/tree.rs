//! Tree command - query an exported object_tree.json.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::ExportResult;
use crate::export::ExportKind;
use crate::hierarchy::{children, descendants, load_hierarchy};
use crate::io::{Envelope, ExitCode};
use crate::paths::PathConfig;

#[derive(Debug, Serialize)]
struct TreeResult {
    root: String,
    direct: bool,
    objects: Vec<String>,
}

/// Run tree command.
pub fn run(
    root: &str,
    file: Option<&Path>,
    direct: bool,
    json: bool,
    settings: &Settings,
) -> ExitCode {
    match query(root, file, direct, settings) {
        Ok(objects) if objects.is_empty() => {
            let message = format!("No descendants found for {root}");
            if json {
                let envelope: Envelope<()> = Envelope::not_found(message);
                if let Ok(text) = envelope.to_json() {
                    println!("{text}");
                }
            } else {
                println!("{message}");
            }
            ExitCode::GeneralError
        }
        Ok(objects) => {
            if json {
                let count = objects.len();
                let envelope = Envelope::success(TreeResult {
                    root: root.to_string(),
                    direct,
                    objects,
                })
                .with_count(count);
                match envelope.to_json() {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::GeneralError;
                    }
                }
            } else {
                println!("{} object(s) under {root}:", objects.len());
                for name in objects {
                    println!("  - {name}");
                }
            }
            ExitCode::Success
        }
        Err(e) => {
            if json {
                let envelope: Envelope<()> = Envelope::from_error(&e);
                if let Ok(text) = envelope.to_json() {
                    println!("{text}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            e.exit_code()
        }
    }
}

fn query(
    root: &str,
    file: Option<&Path>,
    direct: bool,
    settings: &Settings,
) -> ExportResult<Vec<String>> {
    let path: PathBuf = match file {
        Some(path) => path.to_path_buf(),
        None => PathConfig::load(&settings.paths.file)?
            .get(&settings.paths.output_key)?
            .join(ExportKind::ObjectTree.file_name()),
    };
    let tree = load_hierarchy(&path)?;

    if direct {
        Ok(children(&tree, root).to_vec())
    } else {
        Ok(descendants(&tree, root).into_iter().collect())
    }
}
