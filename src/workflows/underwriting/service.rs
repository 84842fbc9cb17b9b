use tracing::debug;

use super::decision::{DecisionEngine, DecisionPolicy, EligibilityOutcome};
use super::domain::ApplicantRecord;
use super::features;
use super::intake::{IntakeGuard, IntakeViolation};
use super::model::{ModelError, ProbabilisticClassifier};

/// Service composing the intake guard, feature builder, and decision
/// engine behind one entry point shared by the HTTP and CLI surfaces.
///
/// Stateless across submissions: every call scores its own record against
/// the injected read-only classifier.
pub struct UnderwritingService<C> {
    guard: IntakeGuard,
    engine: DecisionEngine<C>,
}

impl<C: ProbabilisticClassifier> UnderwritingService<C> {
    pub fn new(classifier: C, policy: DecisionPolicy) -> Self {
        Self {
            guard: IntakeGuard,
            engine: DecisionEngine::new(classifier, policy),
        }
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.engine.policy()
    }

    /// Validate, build the feature vector, and score one submission.
    ///
    /// Intake violations short-circuit before any feature work happens.
    pub fn assess(&self, applicant: &ApplicantRecord) -> Result<EligibilityOutcome, UnderwritingError> {
        self.guard.check(applicant)?;

        let schema = self.engine.classifier().schema();
        let vector = features::build(applicant, schema);
        debug!(
            customer = %applicant.customer_name,
            columns = vector.len(),
            "scoring submission"
        );

        let outcome = self.engine.decide(applicant, &vector)?;
        Ok(outcome)
    }
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Model(#[from] ModelError),
}
