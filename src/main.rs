use clap::Parser;
use metamap::Settings;
use metamap::cli::commands::{self, export::ExportArgs};
use metamap::cli::{Cli, Commands};
use metamap::io::ExitCode;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut config = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::ConfigError.into();
        }
    };

    if cli.verbose {
        config.logging.default = "debug".to_string();
    }
    metamap::logging::init_with_config(&config.logging);

    let code = match cli.command {
        Commands::Init { force } => commands::init::run_init(force),
        Commands::Config => commands::init::run_config(&config),
        Commands::Export {
            kinds,
            snapshot,
            paths,
            out,
            stdout,
            json,
        } => commands::export::run(
            ExportArgs {
                kinds,
                snapshot,
                paths,
                out,
                stdout,
                json,
            },
            &config,
        ),
        Commands::Tree {
            root,
            file,
            direct,
            json,
        } => commands::tree::run(&root, file.as_deref(), direct, json, &config),
    };

    code.into()
}
