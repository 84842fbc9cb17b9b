use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::features::FeatureVector;

/// Errors raised while loading or invoking the classifier artifact.
///
/// All of these are configuration failures: the system has no transient
/// dependency, so nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact at {path}")]
    Artifact {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact is not valid JSON")]
    Malformed(#[from] serde_json::Error),
    #[error("artifact declares {columns} columns but carries {coefficients} coefficients")]
    SchemaMismatch {
        columns: usize,
        coefficients: usize,
    },
    #[error("artifact repeats the column {0}")]
    DuplicateColumn(String),
    #[error("feature vector carries {found} values, model expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// The fixed, ordered column list a trained classifier expects, fixed at
/// training time and shipped alongside the weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    columns: Vec<String>,
    names: HashSet<String>,
}

impl ModelSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, ModelError> {
        let mut names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.clone()) {
                return Err(ModelError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self { columns, names })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.names.contains(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// The two operations the decision layer needs from a pre-fit binary
/// classifier, plus the companion column schema. Artifact format stays
/// behind this seam.
pub trait ProbabilisticClassifier {
    fn schema(&self) -> &ModelSchema;

    /// `[P(rejected), P(approved)]` for one feature vector.
    fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2], ModelError>;

    /// The model's own binary output; `true` means approved.
    fn predict(&self, vector: &FeatureVector) -> Result<bool, ModelError>;
}

/// Serialized form of the exported artifact.
#[derive(Debug, Deserialize)]
struct LogisticArtifact {
    columns: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
}

/// Pre-fit logistic regression consumed as a black box. Loaded once at
/// startup and shared read-only; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    schema: ModelSchema,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let mut raw = String::new();
        File::open(path)
            .and_then(|mut file| file.read_to_string(&mut raw))
            .map_err(|source| ModelError::Artifact {
                path: path.display().to_string(),
                source,
            })?;

        let artifact: LogisticArtifact = serde_json::from_str(&raw)?;
        Self::from_parts(artifact.columns, artifact.coefficients, artifact.intercept)
    }

    pub fn from_parts(
        columns: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ModelError> {
        if columns.len() != coefficients.len() {
            return Err(ModelError::SchemaMismatch {
                columns: columns.len(),
                coefficients: coefficients.len(),
            });
        }

        Ok(Self {
            schema: ModelSchema::new(columns)?,
            coefficients,
            intercept,
        })
    }

    fn decision_value(&self, vector: &FeatureVector) -> Result<f64, ModelError> {
        let values = vector.values();
        if values.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: values.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(values)
            .map(|(weight, value)| weight * value)
            .sum();
        Ok(dot + self.intercept)
    }
}

impl ProbabilisticClassifier for LogisticModel {
    fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    fn predict_proba(&self, vector: &FeatureVector) -> Result<[f64; 2], ModelError> {
        let approved = sigmoid(self.decision_value(vector)?);
        Ok([1.0 - approved, approved])
    }

    fn predict(&self, vector: &FeatureVector) -> Result<bool, ModelError> {
        let [_, approved] = self.predict_proba(vector)?;
        Ok(approved > 0.5)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_misaligned_artifact() {
        let result = LogisticModel::from_parts(
            vec!["Age".to_string(), "BMI".to_string()],
            vec![0.1],
            0.0,
        );

        assert!(matches!(
            result,
            Err(ModelError::SchemaMismatch {
                columns: 2,
                coefficients: 1
            })
        ));
    }

    #[test]
    fn rejects_duplicate_schema_columns() {
        let result = ModelSchema::new(vec!["Age".to_string(), "Age".to_string()]);
        assert!(matches!(result, Err(ModelError::DuplicateColumn(_))));
    }

    #[test]
    fn intercept_only_model_reports_sigmoid_of_intercept() {
        let model = LogisticModel::from_parts(vec![], vec![], 0.0).expect("valid artifact");
        let vector = FeatureVector::from_parts(vec![], vec![]);

        let [rejected, approved] = model.predict_proba(&vector).expect("prediction succeeds");
        assert!((approved - 0.5).abs() < 1e-12);
        assert!((rejected - 0.5).abs() < 1e-12);
        assert!(!model.predict(&vector).expect("prediction succeeds"));
    }

    #[test]
    fn dimension_mismatch_is_fatal_not_silent() {
        let model = LogisticModel::from_parts(vec!["Age".to_string()], vec![0.2], 0.0)
            .expect("valid artifact");
        let vector = FeatureVector::from_parts(
            vec!["Age".to_string(), "BMI".to_string()],
            vec![40.0, 22.0],
        );

        assert!(matches!(
            model.predict_proba(&vector),
            Err(ModelError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn positive_decision_values_favor_approval() {
        let model = LogisticModel::from_parts(vec!["Income_Premium_Ratio".to_string()], vec![0.05], -1.0)
            .expect("valid artifact");
        let vector = FeatureVector::from_parts(vec!["Income_Premium_Ratio".to_string()], vec![100.0]);

        let [_, approved] = model.predict_proba(&vector).expect("prediction succeeds");
        assert!(approved > 0.9);
        assert!(model.predict(&vector).expect("prediction succeeds"));
    }
}
