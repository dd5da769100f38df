use std::path::PathBuf;

use clap::Parser;

use cube_field::cli::Cli;
use cube_field::config::{FileConfig, Settings, WindowConfig};
use cube_field::frame::Variant;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scene.cube_count, 500);
        assert_eq!(settings.scene.spread, 200.0);
        assert_eq!(settings.animation.variant, Variant::Animated);
        assert_eq!(settings.animation.rotation_step, 0.01);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.max_frames, None);
    }

    #[test]
    fn test_file_config_parses_partial_json() {
        let file = FileConfig::from_json(r#"{ "variant": "baseline", "cube_count": 12 }"#)
            .expect("valid json");
        assert_eq!(file.variant, Some(Variant::Baseline));
        assert_eq!(file.cube_count, Some(12));
        assert_eq!(file.seed, None);
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        assert!(FileConfig::from_json(r#"{ "cubes": 12 }"#).is_err());
    }

    #[test]
    fn test_file_config_window_defaults_missing_fields() {
        let file = FileConfig::from_json(r#"{ "window": { "width": 640 } }"#).expect("valid json");
        let window = file.window.expect("window section");
        assert_eq!(window.width, 640);
        assert_eq!(window.height, WindowConfig::default().height);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = FileConfig {
            rotation_step: Some(0.05),
            spread: Some(50.0),
            seed: Some(9),
            ..FileConfig::default()
        };
        let settings = Settings::default().merge_file(file);

        assert_eq!(settings.animation.rotation_step, 0.05);
        assert_eq!(settings.scene.spread, 50.0);
        assert_eq!(settings.scene.cube_count, 500);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            variant: Some(Variant::Baseline),
            cube_count: Some(10),
            seed: Some(1),
            ..FileConfig::default()
        };
        let cli = Cli::try_parse_from(["cube-field", "--cubes", "3", "--seed", "2", "--variant", "animated"])
            .expect("valid flags");
        let settings = Settings::default().merge_file(file).merge_cli(&cli);

        assert_eq!(settings.scene.cube_count, 3);
        assert_eq!(settings.seed, Some(2));
        assert_eq!(settings.animation.variant, Variant::Animated);
    }

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "cube-field",
            "--variant",
            "baseline",
            "--step",
            "0.02",
            "--frames",
            "120",
            "--config",
            "scene.json",
        ])
        .expect("valid flags");

        assert_eq!(cli.variant, Some(Variant::Baseline));
        assert_eq!(cli.rotation_step, Some(0.02));
        assert_eq!(cli.max_frames, Some(120));
        assert_eq!(cli.config, Some(PathBuf::from("scene.json")));
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["cube-field", "--variant", "spinning"]).is_err());
    }

    #[test]
    fn test_from_cli_reads_settings_file() {
        let path = std::env::temp_dir().join(format!("cube-field-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "cube_count": 64, "max_frames": 30 }"#).expect("write settings");

        let cli = Cli {
            config: Some(path.clone()),
            ..Cli::default()
        };
        let settings = Settings::from_cli(&cli);
        std::fs::remove_file(&path).ok();

        let settings = settings.expect("settings load");
        assert_eq!(settings.scene.cube_count, 64);
        assert_eq!(settings.max_frames, Some(30));
    }

    #[test]
    fn test_from_cli_missing_file_errors() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/cube-field.json")),
            ..Cli::default()
        };
        let err = Settings::from_cli(&cli).expect_err("missing file");
        assert!(format!("{:#}", err).contains("Failed to read settings file"));
    }
}
