//! Insurance eligibility underwriting: intake validation, feature
//! derivation, classifier invocation, and result packaging.

pub mod batch;
pub mod decision;
pub mod domain;
pub mod features;
pub mod intake;
pub mod model;
pub mod report;
pub mod service;

pub use decision::{
    DecisionEngine, DecisionPolicy, EligibilityOutcome, EligibilityStatus,
    DEFAULT_APPROVAL_THRESHOLD,
};
pub use domain::ApplicantRecord;
pub use features::FeatureVector;
pub use intake::{IntakeGuard, IntakeViolation};
pub use model::{LogisticModel, ModelError, ModelSchema, ProbabilisticClassifier};
pub use report::EligibilityReport;
pub use service::{UnderwritingError, UnderwritingService};
