#![allow(dead_code)]

use std::path::PathBuf;

use solace_config::SolaceConfig;
use solace_core::EncodingProfile;
use solace_server::PredictionService;

pub fn artifact(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../artifacts")
        .join(relative)
}

pub fn basic_config() -> SolaceConfig {
    let mut config = SolaceConfig::default();
    config.artifacts.model_path = artifact("model.json");
    config.artifacts.feature_list_path = artifact("feature_list.json");
    config
}

pub fn enriched_config() -> SolaceConfig {
    let mut config = SolaceConfig::default();
    config.artifacts.model_path = artifact("enriched/model.json");
    config.artifacts.feature_list_path = artifact("enriched/feature_list.json");
    config.encoding.profile = EncodingProfile::Enriched;
    config
}

pub fn service(config: &SolaceConfig) -> PredictionService {
    PredictionService::from_config(config).expect("bundled artifacts load")
}

pub const SAMPLE_BODY: &str = r#"{"Age":30,"Gender":"Male","work_interfere":"Often","remote_work":"No","leave":"Don't know","benefits":"Yes","anonymity":"Yes"}"#;

pub const SAMPLE_FORM: &str = "Age=30&Gender=Male&work_interfere=Often&remote_work=No&leave=Don%27t+know&benefits=Yes&anonymity=Yes";
