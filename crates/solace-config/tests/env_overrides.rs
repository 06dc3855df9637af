use figment::Jail;
use solace_config::SolaceConfig;
use solace_core::EncodingProfile;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SOLACE_SERVER__PORT", "9000");
        jail.set_env("SOLACE_ENCODING__STRICT", "true");
        jail.set_env("SOLACE_ENCODING__PROFILE", "enriched");

        let config = SolaceConfig::load(None).expect("config loads");
        assert_eq!(config.server.port, 9000);
        assert!(config.encoding.strict);
        assert_eq!(config.encoding.profile, EncodingProfile::Enriched);
        Ok(())
    });
}

#[test]
fn env_beats_explicit_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("solace.toml", "[server]\nport = 7000\nworkers = 8\n")?;
        jail.set_env("SOLACE_SERVER__PORT", "7500");

        let config =
            SolaceConfig::load(Some(std::path::Path::new("solace.toml"))).expect("config loads");
        assert_eq!(config.server.port, 7500);
        assert_eq!(config.server.workers, 8);
        Ok(())
    });
}

#[test]
fn env_overrides_artifact_paths() {
    Jail::expect_with(|jail| {
        jail.set_env("SOLACE_ARTIFACTS__MODEL_PATH", "/srv/models/rf.json");

        let config = SolaceConfig::load(None).expect("config loads");
        assert_eq!(
            config.artifacts.model_path,
            std::path::PathBuf::from("/srv/models/rf.json")
        );
        assert_eq!(
            config.artifacts.feature_list_path,
            std::path::PathBuf::from("artifacts/feature_list.json")
        );
        Ok(())
    });
}
