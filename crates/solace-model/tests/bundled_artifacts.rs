//! The demo artifacts shipped in `artifacts/` load and agree with the encoder.

use std::path::PathBuf;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use solace_core::{EncodingProfile, Label, RawInput, RecommendationTier};
use solace_encoder::{EncodingSchema, FeatureEncoder, FeatureList};
use solace_model::{ModelArtifact, Predictor};

fn artifact(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../artifacts")
        .join(relative)
}

fn pipeline(profile: EncodingProfile, dir: &str) -> (FeatureEncoder, Predictor) {
    let features = FeatureList::from_file(&artifact(&format!("{dir}feature_list.json")))
        .expect("feature list");
    let model = ModelArtifact::load(&artifact(&format!("{dir}model.json"))).expect("model");
    let predictor = Predictor::new(model, &features).expect("model matches feature list");
    let encoder = FeatureEncoder::new(
        EncodingSchema::for_profile(profile),
        Arc::new(features),
        false,
    )
    .expect("encoder");
    (encoder, predictor)
}

fn sample() -> RawInput {
    RawInput::new()
        .with("Age", 30)
        .with("Gender", "Male")
        .with("work_interfere", "Often")
        .with("remote_work", "No")
        .with("leave", "Don't know")
        .with("benefits", "Yes")
        .with("anonymity", "Yes")
}

#[test]
fn basic_forest_predicts_sample() {
    let (encoder, predictor) = pipeline(EncodingProfile::Basic, "");
    assert_eq!(predictor.kind(), "random_forest");
    assert_eq!(predictor.n_features(), 15);

    let prediction = predictor
        .predict(&encoder.encode(&sample()).expect("encodes"))
        .expect("predicts");
    assert_eq!(prediction.label, Label::Likely);
    assert!((prediction.probability - (0.86 + 0.74 + 0.79) / 3.0).abs() < 1e-9);
    assert_eq!(prediction.tier(), RecommendationTier::ProactiveConsultation);
}

#[test]
fn basic_forest_is_deterministic() {
    let (encoder, predictor) = pipeline(EncodingProfile::Basic, "");
    let vector = encoder.encode(&sample()).expect("encodes");
    let first = predictor.predict(&vector).expect("first");
    let second = predictor.predict(&vector).expect("second");
    assert_eq!(first, second);
}

#[rstest]
#[case("Often", "Very difficult")]
#[case("Sometimes", "Somewhat easy")]
#[case("Rarely", "Very easy")]
#[case("Never", "Somewhat difficult")]
#[case("Unknown", "Don't know")]
fn label_follows_probability_for_every_answer(#[case] interfere: &str, #[case] leave: &str) {
    let (encoder, predictor) = pipeline(EncodingProfile::Basic, "");
    let input = sample()
        .with("work_interfere", interfere)
        .with("leave", leave);
    let prediction = predictor
        .predict(&encoder.encode(&input).expect("encodes"))
        .expect("predicts");

    assert!((0.0..=1.0).contains(&prediction.probability));
    assert_eq!(prediction.label, Label::from_probability(prediction.probability));
}

#[test]
fn enriched_logistic_predicts_a_probability() {
    let (encoder, predictor) = pipeline(EncodingProfile::Enriched, "enriched/");
    assert_eq!(predictor.kind(), "logistic_regression");
    assert_eq!(predictor.n_features(), 27);

    let input = sample()
        .with("care_options", "Yes")
        .with("wellness_program", "No")
        .with("mental_health_consequence", "Maybe");
    let prediction = predictor
        .predict(&encoder.encode(&input).expect("encodes"))
        .expect("predicts");
    assert!((0.0..=1.0).contains(&prediction.probability));
}

#[test]
fn basic_model_does_not_fit_enriched_features() {
    let features = FeatureList::from_file(&artifact("enriched/feature_list.json")).unwrap();
    let model = ModelArtifact::load(&artifact("model.json")).unwrap();
    assert!(Predictor::new(model, &features).is_err());
}
