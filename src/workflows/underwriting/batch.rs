use std::io::Read;

use serde::Deserialize;

use super::domain::{
    AlcoholConsumption, ApplicantRecord, ChronicCondition, ExerciseHabit, Gender, Location,
    MaritalStatus, PolicyType, Profession, SmokingStatus,
};

/// Column headers match the intake form labels so exported submission
/// sheets load without remapping.
#[derive(Debug, Deserialize)]
struct SubmissionRow {
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Dependents")]
    dependents: u32,
    #[serde(rename = "Annual Income")]
    income: u32,
    #[serde(rename = "Existing Savings")]
    savings: u32,
    #[serde(rename = "Premium")]
    premium: u32,
    #[serde(rename = "Policy Tenure")]
    policy_tenure: u32,
    #[serde(rename = "Claims Count")]
    claims_count: u32,
    #[serde(rename = "Past Claims Amount")]
    past_claims_amount: u32,
    #[serde(rename = "BMI")]
    bmi: f64,
    #[serde(rename = "Gender")]
    gender: Gender,
    #[serde(rename = "Marital Status")]
    marital_status: MaritalStatus,
    #[serde(rename = "Location")]
    location: Location,
    #[serde(rename = "Profession")]
    profession: Profession,
    #[serde(rename = "Policy Type")]
    policy_type: PolicyType,
    #[serde(rename = "Smoking Status")]
    smoking_status: SmokingStatus,
    #[serde(rename = "Chronic Condition")]
    chronic_condition: ChronicCondition,
    #[serde(rename = "Alcohol Consumption")]
    alcohol_consumption: AlcoholConsumption,
    #[serde(rename = "Exercise")]
    exercise: ExerciseHabit,
}

impl From<SubmissionRow> for ApplicantRecord {
    fn from(row: SubmissionRow) -> Self {
        ApplicantRecord {
            customer_name: row.customer_name,
            age: row.age,
            dependents: row.dependents,
            income: row.income,
            savings: row.savings,
            premium: row.premium,
            policy_tenure: row.policy_tenure,
            claims_count: row.claims_count,
            past_claims_amount: row.past_claims_amount,
            bmi: row.bmi,
            gender: row.gender,
            marital_status: row.marital_status,
            location: row.location,
            profession: row.profession,
            policy_type: row.policy_type,
            smoking_status: row.smoking_status,
            chronic_condition: row.chronic_condition,
            alcohol_consumption: row.alcohol_consumption,
            exercise: row.exercise,
        }
    }
}

/// Parse a submission sheet into applicant records. A malformed row fails
/// the whole parse; per-row intake violations are the caller's concern.
pub fn parse_applicants<R: Read>(reader: R) -> Result<Vec<ApplicantRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut applicants = Vec::new();
    for row in csv_reader.deserialize::<SubmissionRow>() {
        applicants.push(row?.into());
    }

    Ok(applicants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Customer Name,Age,Dependents,Annual Income,Existing Savings,Premium,Policy Tenure,Claims Count,Past Claims Amount,BMI,Gender,Marital Status,Location,Profession,Policy Type,Smoking Status,Chronic Condition,Alcohol Consumption,Exercise";

    #[test]
    fn parses_a_submission_sheet() {
        let csv = format!(
            "{HEADER}\nAsha Rao,45,2,600000,100000,6000,5,1,0,31.0,Male,Married,Semi-Urban,IT,Life,Non-Smoker,Yes,No,Regular\nRavi Kumar,30,0,500000,50000,5000,5,0,0,22.0,Male,Single,Urban,Healthcare,Vehicle,Smoker,No,Yes,Irregular\n"
        );

        let applicants = parse_applicants(Cursor::new(csv)).expect("sheet parses");

        assert_eq!(applicants.len(), 2);
        assert_eq!(applicants[0].customer_name, "Asha Rao");
        assert_eq!(applicants[0].location, Location::SemiUrban);
        assert_eq!(applicants[0].chronic_condition, ChronicCondition::Yes);
        assert_eq!(applicants[1].profession, Profession::Healthcare);
        assert_eq!(applicants[1].smoking_status, SmokingStatus::Smoker);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let csv = format!(
            "{HEADER}\n Asha Rao ,45,2,600000,100000,6000,5,1,0,31.0, Male ,Married,Urban,IT,Life,Non-Smoker,No,No,Regular\n"
        );

        let applicants = parse_applicants(Cursor::new(csv)).expect("sheet parses");
        assert_eq!(applicants[0].customer_name, "Asha Rao");
        assert_eq!(applicants[0].gender, Gender::Male);
    }

    #[test]
    fn malformed_rows_fail_the_parse() {
        let csv = format!("{HEADER}\nAsha Rao,not-a-number,2,600000,100000,6000,5,1,0,31.0,Male,Married,Urban,IT,Life,Non-Smoker,No,No,Regular\n");

        assert!(parse_applicants(Cursor::new(csv)).is_err());
    }

    #[test]
    fn unknown_categorical_values_fail_the_parse() {
        let csv = format!("{HEADER}\nAsha Rao,45,2,600000,100000,6000,5,1,0,31.0,Male,Married,Suburban,IT,Life,Non-Smoker,No,No,Regular\n");

        assert!(parse_applicants(Cursor::new(csv)).is_err());
    }
}
