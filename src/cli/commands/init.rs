//! Init and Config commands.

use crate::config::Settings;
use crate::io::ExitCode;

/// Run init command - create settings and a paths.json template.
pub fn run_init(force: bool) -> ExitCode {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::IoError;
        }
    };

    match Settings::init_config_files(&cwd, force) {
        Ok(written) if written.is_empty() => {
            eprintln!("Configuration already exists in: {}", cwd.display());
            eprintln!("Use --force to overwrite");
            ExitCode::GeneralError
        }
        Ok(written) => {
            for path in written {
                println!("Created {}", path.display());
            }
            println!("Edit paths.json to point data_meta at your output folder.");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::IoError
        }
    }
}

/// Run config command - display current configuration.
pub fn run_config(config: &Settings) -> ExitCode {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    match toml::to_string_pretty(config) {
        Ok(toml_str) => {
            println!("{toml_str}");
            ExitCode::Success
        }
        Err(e) => {
            eprintln!("Error displaying config: {e}");
            ExitCode::GeneralError
        }
    }
}
