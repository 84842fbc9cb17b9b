use serde::{Deserialize, Serialize};

/// One customer's form answers, exactly as submitted.
///
/// `customer_name` is validated but never fed to the model; everything else
/// either maps to a base numeric column or expands into indicator columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub customer_name: String,
    pub age: u32,
    pub dependents: u32,
    pub income: u32,
    pub savings: u32,
    pub premium: u32,
    pub policy_tenure: u32,
    pub claims_count: u32,
    pub past_claims_amount: u32,
    pub bmi: f64,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub location: Location,
    pub profession: Profession,
    pub policy_type: PolicyType,
    pub smoking_status: SmokingStatus,
    pub chronic_condition: ChronicCondition,
    pub alcohol_consumption: AlcoholConsumption,
    pub exercise: ExerciseHabit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Urban,
    #[serde(rename = "Semi-Urban")]
    SemiUrban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profession {
    #[serde(rename = "IT")]
    It,
    Healthcare,
    Labor,
    Teacher,
    Retired,
    Unemployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyType {
    Life,
    Vehicle,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokingStatus {
    Smoker,
    #[serde(rename = "Non-Smoker")]
    NonSmoker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChronicCondition {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlcoholConsumption {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExerciseHabit {
    Regular,
    Irregular,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
        }
    }
}

impl Location {
    pub const fn label(self) -> &'static str {
        match self {
            Location::Urban => "Urban",
            Location::SemiUrban => "Semi-Urban",
            Location::Rural => "Rural",
        }
    }
}

impl Profession {
    pub const fn label(self) -> &'static str {
        match self {
            Profession::It => "IT",
            Profession::Healthcare => "Healthcare",
            Profession::Labor => "Labor",
            Profession::Teacher => "Teacher",
            Profession::Retired => "Retired",
            Profession::Unemployed => "Unemployed",
        }
    }
}

impl PolicyType {
    pub const fn label(self) -> &'static str {
        match self {
            PolicyType::Life => "Life",
            PolicyType::Vehicle => "Vehicle",
            PolicyType::Home => "Home",
        }
    }
}

impl SmokingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SmokingStatus::Smoker => "Smoker",
            SmokingStatus::NonSmoker => "Non-Smoker",
        }
    }
}

impl ChronicCondition {
    pub const fn label(self) -> &'static str {
        match self {
            ChronicCondition::Yes => "Yes",
            ChronicCondition::No => "No",
        }
    }

    pub const fn is_present(self) -> bool {
        matches!(self, ChronicCondition::Yes)
    }
}

impl AlcoholConsumption {
    pub const fn label(self) -> &'static str {
        match self {
            AlcoholConsumption::Yes => "Yes",
            AlcoholConsumption::No => "No",
        }
    }
}

impl ExerciseHabit {
    pub const fn label(self) -> &'static str {
        match self {
            ExerciseHabit::Regular => "Regular",
            ExerciseHabit::Irregular => "Irregular",
        }
    }
}

impl ApplicantRecord {
    /// Indicator column names selected by this record, one per categorical
    /// field, following the `{Field}_{Value}` convention the trained schema
    /// uses. Reference categories are handled downstream: a selected column
    /// the schema does not carry simply stays at zero.
    pub fn indicator_columns(&self) -> [String; 9] {
        [
            format!("Gender_{}", self.gender.label()),
            format!("Marital_Status_{}", self.marital_status.label()),
            format!("Location_{}", self.location.label()),
            format!("Profession_{}", self.profession.label()),
            format!("Policy_Type_{}", self.policy_type.label()),
            format!("Smoking_Status_{}", self.smoking_status.label()),
            format!("Chronic_Condition_{}", self.chronic_condition.label()),
            format!("Alcohol_Consumption_{}", self.alcohol_consumption.label()),
            format!("Exercise_{}", self.exercise.label()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::underwriting::testutil::sample_record;

    #[test]
    fn indicator_columns_follow_naming_convention() {
        let record = sample_record();
        let columns = record.indicator_columns();

        assert!(columns.contains(&"Gender_Male".to_string()));
        assert!(columns.contains(&"Location_Semi-Urban".to_string()));
        assert!(columns.contains(&"Profession_IT".to_string()));
        assert!(columns.contains(&"Smoking_Status_Non-Smoker".to_string()));
        assert!(columns.contains(&"Chronic_Condition_Yes".to_string()));
        assert_eq!(columns.len(), 9);
    }

    #[test]
    fn hyphenated_labels_round_trip_through_serde() {
        let location: Location = serde_json::from_str("\"Semi-Urban\"").expect("parses");
        assert_eq!(location, Location::SemiUrban);

        let smoking: SmokingStatus = serde_json::from_str("\"Non-Smoker\"").expect("parses");
        assert_eq!(smoking, SmokingStatus::NonSmoker);

        let profession: Profession = serde_json::from_str("\"IT\"").expect("parses");
        assert_eq!(profession, Profession::It);
        assert_eq!(
            serde_json::to_string(&profession).expect("serializes"),
            "\"IT\""
        );
    }
}
