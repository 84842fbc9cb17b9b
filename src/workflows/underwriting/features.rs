use std::collections::HashMap;

use super::domain::ApplicantRecord;
use super::model::ModelSchema;

/// Heuristic risk-score weights. These are fixed display/explainability
/// constants, not learned parameters, so they never change between
/// deployments of the same artifact.
pub const RISK_WEIGHT_AGE: f64 = 0.4;
pub const RISK_WEIGHT_BMI: f64 = 0.3;
pub const RISK_WEIGHT_CHRONIC: f64 = 30.0;

/// Deterministic linear combination of age, BMI, and chronic-condition
/// status, reported alongside the model probability.
pub fn risk_score(age: u32, bmi: f64, chronic: bool) -> f64 {
    let chronic_num = if chronic { 1.0 } else { 0.0 };
    RISK_WEIGHT_AGE * age as f64 + RISK_WEIGHT_BMI * bmi + RISK_WEIGHT_CHRONIC * chronic_num
}

/// Engineered quantities computed from the raw record before any
/// categorical expansion. The `+ 1` denominators guard against zero
/// premiums and zero tenures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub income_premium_ratio: f64,
    pub claim_frequency: f64,
    pub chronic_condition_num: f64,
    pub risk_score: f64,
}

impl DerivedFeatures {
    pub fn from_record(record: &ApplicantRecord) -> Self {
        let chronic = record.chronic_condition.is_present();
        Self {
            income_premium_ratio: record.income as f64 / (record.premium as f64 + 1.0),
            claim_frequency: record.claims_count as f64 / (record.policy_tenure as f64 + 1.0),
            chronic_condition_num: if chronic { 1.0 } else { 0.0 },
            risk_score: risk_score(record.age, record.bmi, chronic),
        }
    }
}

/// The numeric row handed to the classifier: exactly the schema's columns,
/// in the schema's order. Built per submission, never cached or shared.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<f64>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| self.values[index])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Base numeric columns and the raw/derived value each one carries.
fn base_columns(record: &ApplicantRecord, derived: &DerivedFeatures) -> [(&'static str, f64); 13] {
    [
        ("Age", record.age as f64),
        ("Dependents", record.dependents as f64),
        ("Income", record.income as f64),
        ("Existing_Savings", record.savings as f64),
        ("Premium", record.premium as f64),
        ("Policy_Tenure", record.policy_tenure as f64),
        ("Claims_Count", record.claims_count as f64),
        ("Past_Claims_Amount", record.past_claims_amount as f64),
        ("BMI", record.bmi),
        ("Income_Premium_Ratio", derived.income_premium_ratio),
        ("Claim_Frequency", derived.claim_frequency),
        ("Chronic_Condition_Num", derived.chronic_condition_num),
        ("Risk_Score", derived.risk_score),
    ]
}

/// Map a raw record into the fixed-order vector the classifier expects.
///
/// Every schema column starts at zero; base and derived values overwrite
/// their columns, then each categorical field raises exactly the one
/// indicator the record selects. A selected indicator the schema does not
/// carry is the reference-category case: the field contributes all zeros
/// and the submission still scores.
pub fn build(record: &ApplicantRecord, schema: &ModelSchema) -> FeatureVector {
    let derived = DerivedFeatures::from_record(record);

    let mut assigned: HashMap<String, f64> = HashMap::with_capacity(schema.len());
    for (column, value) in base_columns(record, &derived) {
        assigned.insert(column.to_string(), value);
    }

    for column in record.indicator_columns() {
        if schema.contains(&column) {
            assigned.insert(column, 1.0);
        }
        // Reference category or a value unseen at training time: every
        // indicator for the field stays at zero.
    }

    let values = schema
        .columns()
        .iter()
        .map(|column| assigned.get(column).copied().unwrap_or(0.0))
        .collect();

    FeatureVector {
        columns: schema.columns().to_vec(),
        values,
    }
}
