use metamap::Settings;
use std::env;
use tempfile::TempDir;

#[test]
fn test_env_override_with_double_underscore() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("settings.toml");
    std::fs::write(&config_path, "[paths]\noutput_key = \"from_file\"\n").unwrap();

    unsafe {
        env::set_var("METAMAP_PATHS__OUTPUT_KEY", "from_env");
        env::set_var("METAMAP_LOGGING__DEFAULT", "debug");
    }

    let settings = Settings::load_from(&config_path).unwrap();

    unsafe {
        env::remove_var("METAMAP_PATHS__OUTPUT_KEY");
        env::remove_var("METAMAP_LOGGING__DEFAULT");
    }

    assert_eq!(settings.paths.output_key, "from_env");
    assert_eq!(settings.logging.default, "debug");
    assert_eq!(settings.paths.file, std::path::PathBuf::from("paths.json"));
}
