//! Feature Vector Assembly

use crate::landmark::{Landmark, MouthContour};
use crate::statistics::StatisticalFeatures;
use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 5;

/// Added to the corner-to-corner width before dividing.
/// Must stay at this exact value for parity with trained models.
pub const WIDTH_EPSILON: f64 = 1e-8;

/// Feature names, in vector order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] =
    ["mar", "smile_curve", "asym", "spread_x", "spread_y"];

/// Geometric mouth-shape features for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// `[mar, smile_curve, asym, spread_x, spread_y]`
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Mouth aperture: vertical extent of the normalized contour
    pub fn mar(&self) -> f64 {
        self.values[0]
    }

    /// Mean corner height minus mean contour height
    pub fn smile_curve(&self) -> f64 {
        self.values[1]
    }

    /// Left corner height minus right corner height
    pub fn asym(&self) -> f64 {
        self.values[2]
    }

    pub fn spread_x(&self) -> f64 {
        self.values[3]
    }

    pub fn spread_y(&self) -> f64 {
        self.values[4]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl fmt::Display for FeatureVector {
    /// `mar=0.1234 smile_curve=-0.0500 ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in FEATURE_NAMES.iter().zip(self.values.iter()).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:.4}", name, value)?;
        }
        Ok(())
    }
}

impl AsRef<[f64]> for FeatureVector {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Turns a mouth contour into a [`FeatureVector`].
///
/// Points are expressed relative to the leftmost corner and divided by the
/// corner-to-corner distance, which makes the result invariant to translation
/// and uniform scale but not to rotation or per-axis scaling.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a validated contour
    pub fn extract(&self, contour: &MouthContour) -> FeatureVector {
        let left = contour.leftmost();
        let right = contour.rightmost();

        // Zero-width contours are not special-cased; the epsilon keeps them finite.
        let width = left.distance(&right) + WIDTH_EPSILON;

        let n = contour.len();
        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        for p in contour.points() {
            xs.push((p.x - left.x) / width);
            ys.push((p.y - left.y) / width);
        }

        let left_y = (left.y - left.y) / width;
        let right_y = (right.y - left.y) / width;

        let x_stats = StatisticalFeatures::compute(&xs);
        let y_stats = StatisticalFeatures::compute(&ys);

        let mar = y_stats.range();
        let smile_curve = (left_y + right_y) / 2.0 - y_stats.mean;
        let asym = left_y - right_y;
        let spread_x = x_stats.std_dev;
        let spread_y = y_stats.std_dev;

        trace!(
            "Extracted lip features: width={:.6} mar={:.4} curve={:.4} asym={:.4}",
            width,
            mar,
            smile_curve,
            asym
        );

        FeatureVector {
            values: [mar, smile_curve, asym, spread_x, spread_y],
        }
    }

    /// Validate raw points and extract features.
    ///
    /// Fails with [`FeatureError::InvalidInput`] on an empty or non-finite point set.
    pub fn extract_from_points(&self, points: &[Landmark]) -> Result<FeatureVector, FeatureError> {
        let contour = MouthContour::new(points.to_vec())?;
        Ok(self.extract(&contour))
    }
}
