//! RBF kernel SVM decision function

use crate::model::SvmModel;
use crate::SvmError;
use tracing::trace;

impl SvmModel {
    /// Raw decision value `f(x)` for one feature vector.
    ///
    /// Features are standardized with the stored scaler, then scored as
    /// `intercept + Σ dual_coef[j] · exp(-gamma · ‖x - sv_j‖²)`.
    pub fn decision_score(&self, features: &[f64]) -> Result<f64, SvmError> {
        if features.len() != self.n_features() {
            return Err(SvmError::ShapeMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }

        let x: Vec<f64> = features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&v, (&m, &s))| (v - m) / s)
            .collect();

        let mut sum = 0.0;
        for (sv, &coef) in self.support_vectors.rows().into_iter().zip(self.dual_coef.iter()) {
            let mut dist2 = 0.0;
            for (&xi, &si) in x.iter().zip(sv.iter()) {
                let diff = xi - si;
                dist2 += diff * diff;
            }
            sum += coef * (-self.gamma * dist2).exp();
        }
        let score = sum + self.intercept;

        trace!("features={:?}, score={}", features, score);
        Ok(score)
    }

    /// Label for a decision value. A score of exactly 0 is the positive class.
    pub fn label_for_score(&self, score: f64) -> &str {
        if score >= 0.0 {
            &self.classes[1]
        } else {
            &self.classes[0]
        }
    }

    /// Predicted class label for one feature vector
    pub fn predict_label(&self, features: &[f64]) -> Result<&str, SvmError> {
        let score = self.decision_score(features)?;
        Ok(self.label_for_score(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SvmModelBundle;
    use crate::ClassLabel;
    use proptest::prelude::*;

    fn tiny_model() -> SvmModel {
        SvmModel::from_bundle(SvmModelBundle {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
            support_vectors: vec![vec![0.0, 0.0]],
            dual_coef: vec![1.0],
            intercept: -0.5,
            gamma: 1.0,
            classes: vec![ClassLabel::Text("no".into()), ClassLabel::Text("yes".into())],
        })
        .unwrap()
    }

    fn two_vector_model() -> SvmModel {
        SvmModel::from_bundle(SvmModelBundle {
            mean: vec![1.0, 2.0],
            scale: vec![2.0, 0.5],
            support_vectors: vec![vec![0.0, 0.0], vec![1.0, -1.0]],
            dual_coef: vec![0.8, -1.3],
            intercept: 0.1,
            gamma: 0.5,
            classes: vec![ClassLabel::Text("neutral".into()), ClassLabel::Text("smile".into())],
        })
        .unwrap()
    }

    #[test]
    fn test_score_at_support_vector() {
        let model = tiny_model();
        let score = model.decision_score(&[0.0, 0.0]).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
        assert_eq!(model.predict_label(&[0.0, 0.0]).unwrap(), "yes");
    }

    #[test]
    fn test_score_far_from_support_vector() {
        let model = tiny_model();
        let score = model.decision_score(&[3.0, 0.0]).unwrap();
        let expected = (-9.0f64).exp() - 0.5;
        assert!((score - expected).abs() < 1e-12);
        assert!((score - (-0.49988)).abs() < 1e-5);
        assert_eq!(model.predict_label(&[3.0, 0.0]).unwrap(), "no");
    }

    #[test]
    fn test_standardization_applied() {
        let model = two_vector_model();
        // (3 - 1) / 2 = 1, (1.5 - 2) / 0.5 = -1  ->  exactly the second support vector
        let score = model.decision_score(&[3.0, 1.5]).unwrap();
        let d2_first = 1.0 + 1.0;
        let expected = 0.8 * (-0.5f64 * d2_first).exp() - 1.3 + 0.1;
        assert!((score - expected).abs() < 1e-12);
        assert_eq!(model.label_for_score(score), "neutral");
    }

    #[test]
    fn test_zero_score_is_positive() {
        let model = tiny_model();
        assert_eq!(model.label_for_score(0.0), "yes");
        assert_eq!(model.label_for_score(-0.0), "yes");
        assert_eq!(model.label_for_score(-1e-300), "no");
    }

    #[test]
    fn test_shape_mismatch() {
        let model = tiny_model();
        let err = model.decision_score(&[0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SvmError::ShapeMismatch { expected: 2, actual: 3 }));
        assert!(!err.is_fatal_config());
        assert!(model.predict_label(&[1.0]).is_err());
    }

    proptest! {
        #[test]
        fn prop_decision_score_is_pure(a in -10.0f64..10.0, b in -10.0f64..10.0) {
            let model = two_vector_model();
            let first = model.decision_score(&[a, b]).unwrap();
            let second = model.decision_score(&[a, b]).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn prop_score_bounded_by_coefficients(a in -10.0f64..10.0, b in -10.0f64..10.0) {
            // Every kernel value lies in (0, 1]
            let model = two_vector_model();
            let score = model.decision_score(&[a, b]).unwrap();
            prop_assert!(score <= 0.1 + 0.8 + 1e-12);
            prop_assert!(score >= 0.1 - 1.3 - 1e-12);
        }
    }
}
