//! Banner, recommendation text and the CLI summary for a [`Prediction`].

use solace_core::responses::PredictionSummary;
use solace_core::{Label, Prediction, RecommendationTier};

pub const LIKELY_HEADLINE: &str = "Likely to Seek Mental Health Treatment";
pub const NOT_LIKELY_HEADLINE: &str = "Not Likely to Seek Mental Health Treatment";

/// Plain-text outcome, used where emoji cannot be rendered (PDF).
#[must_use]
pub const fn headline(label: Label) -> &'static str {
    match label {
        Label::Likely => LIKELY_HEADLINE,
        Label::NotLikely => NOT_LIKELY_HEADLINE,
    }
}

/// Success / warning banner shown by the interactive surfaces.
#[must_use]
pub const fn banner(label: Label) -> &'static str {
    match label {
        Label::Likely => "✅ Likely to Seek Mental Health Treatment",
        Label::NotLikely => "❌ Not Likely to Seek Mental Health Treatment",
    }
}

/// Advisory text for a recommendation tier.
#[must_use]
pub const fn recommendation(tier: RecommendationTier) -> &'static str {
    match tier {
        RecommendationTier::ProactiveConsultation => {
            "High likelihood of seeking treatment. Consider a proactive consultation \
             with a mental health professional and review the support your employer offers."
        }
        RecommendationTier::IncreasedSupport => {
            "Moderate likelihood of seeking treatment. Increased support from peers, \
             managers or an employee assistance program may help."
        }
        RecommendationTier::StableEnvironment => {
            "Low likelihood of seeking treatment. The current environment appears stable; \
             keep monitoring well-being and stay aware of available resources."
        }
    }
}

/// Probability as shown to people: percent, two decimals.
#[must_use]
pub fn format_percent(prediction: &Prediction) -> String {
    format!("{:.2}%", prediction.probability_percent())
}

/// Build the `solace predict` / `solace ask` response.
#[must_use]
pub fn summarize(prediction: &Prediction) -> PredictionSummary {
    let tier = prediction.tier();
    PredictionSummary {
        prediction: prediction.label.as_class(),
        label: prediction.label,
        probability: (prediction.probability_percent() * 100.0).round() / 100.0,
        recommendation_tier: tier,
        recommendation: recommendation(tier).to_string(),
        report_path: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prediction(p: f64) -> Prediction {
        Prediction::from_probability(p).expect("valid probability")
    }

    #[test]
    fn banding_follows_probability() {
        assert_eq!(
            summarize(&prediction(0.8)).recommendation_tier,
            RecommendationTier::ProactiveConsultation
        );
        assert_eq!(
            summarize(&prediction(0.6)).recommendation_tier,
            RecommendationTier::IncreasedSupport
        );
        assert_eq!(
            summarize(&prediction(0.3)).recommendation_tier,
            RecommendationTier::StableEnvironment
        );
    }

    #[test]
    fn summary_rounds_percent_and_carries_text() {
        let summary = summarize(&prediction(2.39 / 3.0));
        assert_eq!(summary.prediction, 1);
        assert!((summary.probability - 79.67).abs() < 1e-9);
        assert!(summary.recommendation.contains("proactive consultation"));
        assert!(summary.report_path.is_none());
    }

    #[test]
    fn banners_match_label() {
        assert_eq!(
            banner(Label::Likely),
            "✅ Likely to Seek Mental Health Treatment"
        );
        assert_eq!(
            banner(Label::NotLikely),
            "❌ Not Likely to Seek Mental Health Treatment"
        );
        assert!(banner(Label::NotLikely).ends_with(headline(Label::NotLikely)));
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(&prediction(0.5)), "50.00%");
    }
}
