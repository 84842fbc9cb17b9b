use chrono::NaiveDate;
use serde::Serialize;

use super::decision::{EligibilityOutcome, EligibilityStatus};
use super::domain::ApplicantRecord;

/// One echoed form field, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputLine {
    pub label: &'static str,
    pub value: String,
}

/// Serializable view of an eligibility result, carrying every field the
/// presentation layer needs: nothing is computed for display and then
/// discarded.
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityReport {
    pub customer_name: String,
    pub status: EligibilityStatus,
    pub status_label: &'static str,
    pub approval_probability: f64,
    pub approval_probability_pct: f64,
    pub risk_score: f64,
    pub generated_on: NaiveDate,
    pub inputs: Vec<InputLine>,
}

impl EligibilityReport {
    pub fn new(outcome: &EligibilityOutcome, generated_on: NaiveDate) -> Self {
        Self {
            customer_name: outcome.applicant.customer_name.clone(),
            status: outcome.status,
            status_label: outcome.status.label(),
            approval_probability: outcome.approval_probability,
            approval_probability_pct: outcome.approval_probability * 100.0,
            risk_score: outcome.risk_score,
            generated_on,
            inputs: input_lines(&outcome.applicant),
        }
    }

    /// Plain-text rendering used by the CLI; the layout mirrors the
    /// downloadable customer report.
    pub fn render_text(&self) -> String {
        let mut lines = vec![
            "Insurance Eligibility Report".to_string(),
            format!("Generated: {}", self.generated_on),
            String::new(),
            format!("Customer Name: {}", self.customer_name),
            format!("Status: {}", self.status_label),
            format!(
                "Approval Probability: {:.2}%",
                self.approval_probability_pct
            ),
            format!("Risk Score: {:.2}", self.risk_score),
            String::new(),
            "Submitted Details".to_string(),
        ];

        for input in &self.inputs {
            lines.push(format!("- {}: {}", input.label, input.value));
        }

        lines.join("\n")
    }
}

fn input_lines(applicant: &ApplicantRecord) -> Vec<InputLine> {
    vec![
        InputLine {
            label: "Age",
            value: applicant.age.to_string(),
        },
        InputLine {
            label: "Dependents",
            value: applicant.dependents.to_string(),
        },
        InputLine {
            label: "Annual Income",
            value: applicant.income.to_string(),
        },
        InputLine {
            label: "Existing Savings",
            value: applicant.savings.to_string(),
        },
        InputLine {
            label: "Premium",
            value: applicant.premium.to_string(),
        },
        InputLine {
            label: "Policy Tenure (Years)",
            value: applicant.policy_tenure.to_string(),
        },
        InputLine {
            label: "Claims Count",
            value: applicant.claims_count.to_string(),
        },
        InputLine {
            label: "Past Claims Amount",
            value: applicant.past_claims_amount.to_string(),
        },
        InputLine {
            label: "BMI",
            value: format!("{:.1}", applicant.bmi),
        },
        InputLine {
            label: "Gender",
            value: applicant.gender.label().to_string(),
        },
        InputLine {
            label: "Marital Status",
            value: applicant.marital_status.label().to_string(),
        },
        InputLine {
            label: "Location",
            value: applicant.location.label().to_string(),
        },
        InputLine {
            label: "Profession",
            value: applicant.profession.label().to_string(),
        },
        InputLine {
            label: "Policy Type",
            value: applicant.policy_type.label().to_string(),
        },
        InputLine {
            label: "Smoking Status",
            value: applicant.smoking_status.label().to_string(),
        },
        InputLine {
            label: "Chronic Condition",
            value: applicant.chronic_condition.label().to_string(),
        },
        InputLine {
            label: "Alcohol Consumption",
            value: applicant.alcohol_consumption.label().to_string(),
        },
        InputLine {
            label: "Exercise",
            value: applicant.exercise.label().to_string(),
        },
    ]
}
