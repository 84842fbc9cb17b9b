use serde::{Deserialize, Serialize};

use super::domain::ApplicantRecord;
use super::features::{self, FeatureVector};
use super::model::{ModelError, ProbabilisticClassifier};

/// Default probability cutoff for the threshold policy.
pub const DEFAULT_APPROVAL_THRESHOLD: f64 = 0.5;

/// How a probability becomes a label.
///
/// The canonical deployment policy is `ProbabilityThreshold`; `ModelLabel`
/// defers to the artifact's own binary output instead. The two can disagree
/// near the boundary, so the choice is a fixed configuration decision and
/// is never reconciled silently at request time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DecisionPolicy {
    ProbabilityThreshold { threshold: f64 },
    ModelLabel,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        DecisionPolicy::ProbabilityThreshold {
            threshold: DEFAULT_APPROVAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Approved,
    Rejected,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::Approved => "Approved",
            EligibilityStatus::Rejected => "Rejected",
        }
    }
}

/// Result bundle for one submission. Immutable once created; lives only for
/// the request/response cycle and echoes everything the report layer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityOutcome {
    pub status: EligibilityStatus,
    pub approval_probability: f64,
    pub risk_score: f64,
    pub applicant: ApplicantRecord,
}

/// Applies the configured decision policy to classifier output.
pub struct DecisionEngine<C> {
    classifier: C,
    policy: DecisionPolicy,
}

impl<C: ProbabilisticClassifier> DecisionEngine<C> {
    pub fn new(classifier: C, policy: DecisionPolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }

    /// Score one built vector and package the outcome. Does not mutate the
    /// vector or the record; classifier failures surface to the caller.
    pub fn decide(
        &self,
        applicant: &ApplicantRecord,
        vector: &FeatureVector,
    ) -> Result<EligibilityOutcome, ModelError> {
        let [_, approval_probability] = self.classifier.predict_proba(vector)?;

        let approved = match self.policy {
            DecisionPolicy::ProbabilityThreshold { threshold } => {
                approval_probability > threshold
            }
            DecisionPolicy::ModelLabel => self.classifier.predict(vector)?,
        };

        let status = if approved {
            EligibilityStatus::Approved
        } else {
            EligibilityStatus::Rejected
        };

        // Display quantity recomputed from the raw record with the same
        // fixed weights the feature builder uses.
        let risk_score = features::risk_score(
            applicant.age,
            applicant.bmi,
            applicant.chronic_condition.is_present(),
        );

        Ok(EligibilityOutcome {
            status,
            approval_probability,
            risk_score,
            applicant: applicant.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::underwriting::features;
    use crate::workflows::underwriting::testutil::{fixed_probability_model, sample_record};

    #[test]
    fn strict_threshold_comparison_rejects_at_the_boundary() {
        let record = sample_record();
        let model = fixed_probability_model(0.55);
        let vector = features::build(&record, model.schema());

        let engine = DecisionEngine::new(
            model,
            DecisionPolicy::ProbabilityThreshold { threshold: 0.55 },
        );
        let outcome = engine.decide(&record, &vector).expect("decision succeeds");

        assert_eq!(outcome.status, EligibilityStatus::Rejected);
    }

    #[test]
    fn raising_the_threshold_never_flips_rejected_to_approved() {
        let record = sample_record();
        let model = fixed_probability_model(0.61);
        let vector = features::build(&record, model.schema());

        let mut previous_approved = true;
        for threshold in [0.1, 0.3, 0.5, 0.6, 0.61, 0.7, 0.9] {
            let engine = DecisionEngine::new(
                fixed_probability_model(0.61),
                DecisionPolicy::ProbabilityThreshold { threshold },
            );
            let outcome = engine.decide(&record, &vector).expect("decision succeeds");
            let approved = outcome.status == EligibilityStatus::Approved;

            assert!(
                previous_approved || !approved,
                "label flipped back to approved at threshold {threshold}"
            );
            previous_approved = approved;
        }
    }

    #[test]
    fn model_label_policy_defers_to_the_artifact() {
        let record = sample_record();
        let model = fixed_probability_model(0.61);
        let vector = features::build(&record, model.schema());

        // p = 0.61 with the model's own 0.5 cutoff approves even when a
        // stricter threshold policy would not.
        let engine = DecisionEngine::new(model, DecisionPolicy::ModelLabel);
        let outcome = engine.decide(&record, &vector).expect("decision succeeds");
        assert_eq!(outcome.status, EligibilityStatus::Approved);
    }

    #[test]
    fn outcome_echoes_the_submitted_record() {
        let record = sample_record();
        let model = fixed_probability_model(0.61);
        let vector = features::build(&record, model.schema());

        let engine = DecisionEngine::new(model, DecisionPolicy::default());
        let outcome = engine.decide(&record, &vector).expect("decision succeeds");

        assert_eq!(outcome.applicant, record);
        assert!((outcome.risk_score - 57.3).abs() < 1e-9);
    }
}
