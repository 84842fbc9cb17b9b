use super::domain::ApplicantRecord;

/// Validation errors raised before any feature building happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("customer name must not be empty")]
    MissingCustomerName,
    #[error("{field} must be between {min} and {max}, found {found}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
}

struct NumericBound {
    field: &'static str,
    min: f64,
    max: f64,
    value: fn(&ApplicantRecord) -> f64,
}

/// Accepted domains for every numeric form field, mirroring the intake form
/// bounds the model was trained against.
const NUMERIC_BOUNDS: [NumericBound; 9] = [
    NumericBound {
        field: "age",
        min: 18.0,
        max: 100.0,
        value: |record| record.age as f64,
    },
    NumericBound {
        field: "dependents",
        min: 0.0,
        max: 10.0,
        value: |record| record.dependents as f64,
    },
    NumericBound {
        field: "income",
        min: 1_000.0,
        max: 10_000_000.0,
        value: |record| record.income as f64,
    },
    NumericBound {
        field: "savings",
        min: 0.0,
        max: 10_000_000.0,
        value: |record| record.savings as f64,
    },
    NumericBound {
        field: "premium",
        min: 100.0,
        max: 500_000.0,
        value: |record| record.premium as f64,
    },
    NumericBound {
        field: "policy_tenure",
        min: 1.0,
        max: 50.0,
        value: |record| record.policy_tenure as f64,
    },
    NumericBound {
        field: "claims_count",
        min: 0.0,
        max: 20.0,
        value: |record| record.claims_count as f64,
    },
    NumericBound {
        field: "past_claims_amount",
        min: 0.0,
        max: 10_000_000.0,
        value: |record| record.past_claims_amount as f64,
    },
    NumericBound {
        field: "bmi",
        min: 10.0,
        max: 50.0,
        value: |record| record.bmi,
    },
];

/// Guard rejecting submissions the pipeline must never score.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn check(&self, record: &ApplicantRecord) -> Result<(), IntakeViolation> {
        if record.customer_name.trim().is_empty() {
            return Err(IntakeViolation::MissingCustomerName);
        }

        for bound in &NUMERIC_BOUNDS {
            let found = (bound.value)(record);
            if !found.is_finite() || found < bound.min || found > bound.max {
                return Err(IntakeViolation::OutOfRange {
                    field: bound.field,
                    min: bound.min,
                    max: bound.max,
                    found,
                });
            }
        }

        Ok(())
    }
}
