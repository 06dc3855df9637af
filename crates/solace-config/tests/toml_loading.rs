//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use std::path::{Path, PathBuf};

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use solace_config::SolaceConfig;
use solace_core::EncodingProfile;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[artifacts]
model_path = "models/rf.json"
feature_list_path = "models/features.json"

[encoding]
profile = "enriched"
strict = true

[server]
host = "0.0.0.0"
port = 9100
workers = 2

[presentation]
detailed = false
report = false
report_filename = "summary.pdf"
"#,
        )?;

        let config: SolaceConfig = Figment::from(Serialized::defaults(SolaceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.artifacts.model_path, PathBuf::from("models/rf.json"));
        assert_eq!(
            config.artifacts.feature_list_path,
            PathBuf::from("models/features.json")
        );
        assert_eq!(config.encoding.profile, EncodingProfile::Enriched);
        assert!(config.encoding.strict);
        assert_eq!(config.server.bind_address(), "0.0.0.0:9100");
        assert_eq!(config.server.workers, 2);
        assert!(!config.presentation.detailed);
        assert!(!config.presentation.report);
        assert_eq!(config.presentation.report_filename, "summary.pdf");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
port = 8080
"#,
        )?;

        let config: SolaceConfig = Figment::from(Serialized::defaults(SolaceConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.workers, 4);
        assert_eq!(config.encoding.profile, EncodingProfile::Basic);
        assert!(config.presentation.detailed);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".solace")?;
        jail.create_file(
            ".solace/config.toml",
            r#"
[encoding]
profile = "enriched"
"#,
        )?;

        let config = SolaceConfig::load(None).expect("config loads");
        assert_eq!(config.encoding.profile, EncodingProfile::Enriched);
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_local_config() {
    Jail::expect_with(|jail| {
        jail.create_dir(".solace")?;
        jail.create_file(".solace/config.toml", "[server]\nport = 7000\n")?;
        jail.create_file("override.toml", "[server]\nport = 7100\n")?;

        let config = SolaceConfig::load(Some(Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.server.port, 7100);
        Ok(())
    });
}

#[test]
fn unknown_profile_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("bad.toml", "[encoding]\nprofile = \"deluxe\"\n")?;

        let result = SolaceConfig::load(Some(Path::new("bad.toml")));
        assert!(result.is_err(), "unknown profile must not deserialize");
        Ok(())
    });
}

#[test]
fn invalid_worker_count_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("zero.toml", "[server]\nworkers = 0\n")?;

        let err = SolaceConfig::load(Some(Path::new("zero.toml"))).expect_err("must fail");
        assert!(err.to_string().contains("server.workers"));
        Ok(())
    });
}
