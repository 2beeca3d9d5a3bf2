//! SVM model bundle loading and validation

use crate::SvmError;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Class label as exported by the training pipeline.
///
/// Exporters write either the string labels or the integer class ids, so
/// both are accepted and rendered as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Text(s) => f.write_str(s),
            ClassLabel::Number(n) => write!(f, "{}", n),
            ClassLabel::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Serialized model bundle, exactly as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmModelBundle {
    /// Scaler means, one per feature
    pub mean: Vec<f64>,
    /// Scaler scales, one per feature
    pub scale: Vec<f64>,
    /// Support vectors in standardized feature space (S rows of F values)
    pub support_vectors: Vec<Vec<f64>>,
    /// Dual coefficients, one per support vector
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
    /// RBF kernel width
    pub gamma: f64,
    /// Class labels in sorted order: `[negative, positive]`
    pub classes: Vec<ClassLabel>,
}

/// Validated, immutable SVM parameters.
///
/// Built once per session and shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct SvmModel {
    pub(crate) mean: Array1<f64>,
    pub(crate) scale: Array1<f64>,
    pub(crate) support_vectors: Array2<f64>,
    pub(crate) dual_coef: Array1<f64>,
    pub(crate) intercept: f64,
    pub(crate) gamma: f64,
    pub(crate) classes: [String; 2],
}

fn fatal(msg: impl Into<String>) -> SvmError {
    SvmError::FatalConfig(msg.into())
}

fn check_finite(field: &str, values: &[f64]) -> Result<(), SvmError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(fatal(format!("{}[{}] is not finite", field, i))),
        None => Ok(()),
    }
}

impl SvmModel {
    /// Validate a bundle and build the model.
    ///
    /// Every shape and value check happens here so that evaluation never has
    /// to re-check the parameters.
    pub fn from_bundle(bundle: SvmModelBundle) -> Result<Self, SvmError> {
        let n_features = bundle.mean.len();
        if n_features == 0 {
            return Err(fatal("mean is empty"));
        }
        if bundle.scale.len() != n_features {
            return Err(fatal(format!(
                "scale has {} entries, mean has {}",
                bundle.scale.len(),
                n_features
            )));
        }

        let n_support = bundle.support_vectors.len();
        if n_support == 0 {
            return Err(fatal("no support vectors"));
        }
        for (j, row) in bundle.support_vectors.iter().enumerate() {
            if row.len() != n_features {
                return Err(fatal(format!(
                    "support vector {} has {} features, mean has {}",
                    j,
                    row.len(),
                    n_features
                )));
            }
        }
        if bundle.dual_coef.len() != n_support {
            return Err(fatal(format!(
                "dual_coef has {} entries for {} support vectors",
                bundle.dual_coef.len(),
                n_support
            )));
        }
        if bundle.classes.len() != 2 {
            return Err(fatal(format!(
                "expected 2 classes for a binary model, got {}",
                bundle.classes.len()
            )));
        }

        check_finite("mean", &bundle.mean)?;
        check_finite("scale", &bundle.scale)?;
        check_finite("dual_coef", &bundle.dual_coef)?;
        if let Some(i) = bundle.scale.iter().position(|&s| s == 0.0) {
            return Err(fatal(format!("scale[{}] is zero", i)));
        }
        for (j, row) in bundle.support_vectors.iter().enumerate() {
            check_finite(&format!("support_vectors[{}]", j), row)?;
        }
        if !bundle.intercept.is_finite() {
            return Err(fatal("intercept is not finite"));
        }
        if !(bundle.gamma.is_finite() && bundle.gamma > 0.0) {
            return Err(fatal(format!("gamma must be positive, got {}", bundle.gamma)));
        }

        let flat: Vec<f64> = bundle.support_vectors.into_iter().flatten().collect();
        let support_vectors = Array2::from_shape_vec((n_support, n_features), flat)
            .map_err(|e| fatal(format!("support vector matrix: {}", e)))?;

        let classes = [bundle.classes[0].to_string(), bundle.classes[1].to_string()];

        debug!(
            "Validated SVM bundle: features={}, SVs={}, gamma={}",
            n_features, n_support, bundle.gamma
        );

        Ok(Self {
            mean: Array1::from(bundle.mean),
            scale: Array1::from(bundle.scale),
            support_vectors,
            dual_coef: Array1::from(bundle.dual_coef),
            intercept: bundle.intercept,
            gamma: bundle.gamma,
            classes,
        })
    }

    /// Parse and validate a JSON bundle
    pub fn from_json_str(json: &str) -> Result<Self, SvmError> {
        let bundle: SvmModelBundle = serde_json::from_str(json)?;
        Self::from_bundle(bundle)
    }

    /// Read, parse and validate a JSON bundle
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SvmError> {
        let bundle: SvmModelBundle = serde_json::from_reader(reader)?;
        Self::from_bundle(bundle)
    }

    /// Load a JSON bundle from disk. The file is closed before validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SvmError> {
        let path = path.as_ref();
        info!("Loading SVM model from {}", path.display());

        let bundle: SvmModelBundle = {
            let file = File::open(path)?;
            serde_json::from_reader(BufReader::new(file))?
        };
        let model = Self::from_bundle(bundle)?;

        info!(
            "Loaded SVM model: features={}, SVs={}, classes={:?}",
            model.n_features(),
            model.n_support_vectors(),
            model.classes
        );
        Ok(model)
    }

    /// Export back to the serialized form
    pub fn to_bundle(&self) -> SvmModelBundle {
        SvmModelBundle {
            mean: self.mean.to_vec(),
            scale: self.scale.to_vec(),
            support_vectors: self.support_vectors.rows().into_iter().map(|r| r.to_vec()).collect(),
            dual_coef: self.dual_coef.to_vec(),
            intercept: self.intercept,
            gamma: self.gamma,
            classes: self.classes.iter().cloned().map(ClassLabel::Text).collect(),
        }
    }

    /// Feature count F
    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Support vector count S
    pub fn n_support_vectors(&self) -> usize {
        self.support_vectors.nrows()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// `[negative, positive]` class labels
    pub fn classes(&self) -> &[String; 2] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY_MODEL: &str = r#"{
        "mean": [0.0, 0.0],
        "scale": [1.0, 1.0],
        "support_vectors": [[0.0, 0.0]],
        "dual_coef": [1.0],
        "intercept": -0.5,
        "gamma": 1.0,
        "classes": ["no", "yes"]
    }"#;

    fn tiny_bundle() -> SvmModelBundle {
        serde_json::from_str(TINY_MODEL).unwrap()
    }

    #[test]
    fn test_load_from_str() {
        let model = SvmModel::from_json_str(TINY_MODEL).unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.n_support_vectors(), 1);
        assert_eq!(model.classes(), &["no".to_string(), "yes".to_string()]);
        assert_eq!(model.intercept(), -0.5);
    }

    #[test]
    fn test_mean_length_mismatch_is_fatal() {
        let mut bundle = tiny_bundle();
        bundle.mean = vec![0.0, 0.0, 0.0];
        bundle.scale = vec![1.0, 1.0, 1.0];
        let err = SvmModel::from_bundle(bundle).unwrap_err();
        assert!(matches!(err, SvmError::FatalConfig(_)));
        assert!(err.is_fatal_config());
    }

    #[test]
    fn test_scale_length_mismatch_is_fatal() {
        let mut bundle = tiny_bundle();
        bundle.scale = vec![1.0];
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_dual_coef_count_mismatch_is_fatal() {
        let mut bundle = tiny_bundle();
        bundle.dual_coef = vec![1.0, -1.0];
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_ragged_support_vectors_are_fatal() {
        let mut bundle = tiny_bundle();
        bundle.support_vectors = vec![vec![0.0, 0.0], vec![1.0]];
        bundle.dual_coef = vec![1.0, 1.0];
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_zero_scale_is_fatal() {
        let mut bundle = tiny_bundle();
        bundle.scale = vec![1.0, 0.0];
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_three_classes_are_fatal() {
        let mut bundle = tiny_bundle();
        bundle.classes.push(ClassLabel::Text("maybe".into()));
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_bad_gamma_is_fatal() {
        let mut bundle = tiny_bundle();
        bundle.gamma = -1.0;
        assert!(matches!(SvmModel::from_bundle(bundle), Err(SvmError::FatalConfig(_))));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let err = SvmModel::from_json_str(r#"{"mean": [0.0]}"#).unwrap_err();
        assert!(matches!(err, SvmError::ModelParse(_)));
        assert!(err.is_fatal_config());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = SvmModel::load("/nonexistent/svm_smile_model.json").unwrap_err();
        assert!(matches!(err, SvmError::ModelRead(_)));
        assert!(err.is_fatal_config());
    }

    #[test]
    fn test_numeric_class_labels() {
        let json = TINY_MODEL.replace(r#"["no", "yes"]"#, "[0, 1]");
        let model = SvmModel::from_json_str(&json).unwrap();
        assert_eq!(model.classes(), &["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_bundle_export_matches_input() {
        let model = SvmModel::from_json_str(TINY_MODEL).unwrap();
        let bundle = model.to_bundle();
        assert_eq!(bundle.support_vectors, vec![vec![0.0, 0.0]]);
        assert_eq!(bundle.classes[1], ClassLabel::Text("yes".into()));
    }
}
