//! Lip landmarks and mouth contours

use crate::FeatureError;
use serde::{Deserialize, Serialize};

/// Face-mesh indices of the lip subset, in the order the classifier was trained with
pub const LIPS_INDICES: [usize; 40] = [
    61, 146, 91, 181, 84, 17, 314, 405, 321, 375,
    291, 308, 324, 318, 402, 317, 14, 87, 178, 88,
    95, 185, 40, 39, 37, 0, 267, 269, 270, 409,
    415, 310, 311, 312, 13, 82, 81, 42, 183, 78,
];

/// Largest coordinate magnitude a contour accepts.
///
/// Landmarks live in the unit image frame and may stray slightly outside it;
/// anything this far out is tracker garbage and would overflow the width.
pub const MAX_COORDINATE: f64 = 1e6;

/// A tracked 2D point, normalized to the unit image frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Landmark {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Center point, where reaction effects are anchored
    pub fn center(&self) -> Landmark {
        Landmark::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Ordered, non-empty set of lip landmarks for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MouthContour {
    points: Vec<Landmark>,
}

impl MouthContour {
    /// Build a contour from lip points.
    ///
    /// Rejects empty input and coordinates that are non-finite or larger in
    /// magnitude than [`MAX_COORDINATE`]; these come from tracking noise and
    /// callers are expected to skip the frame.
    pub fn new(points: Vec<Landmark>) -> Result<Self, FeatureError> {
        if points.is_empty() {
            return Err(FeatureError::InvalidInput("mouth contour is empty".into()));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(FeatureError::InvalidInput(format!(
                "landmark {} has a non-finite coordinate",
                i
            )));
        }
        if let Some(i) = points
            .iter()
            .position(|p| p.x.abs() > MAX_COORDINATE || p.y.abs() > MAX_COORDINATE)
        {
            return Err(FeatureError::InvalidInput(format!(
                "landmark {} is outside the image frame by more than {}",
                i, MAX_COORDINATE
            )));
        }
        Ok(Self { points })
    }

    /// Select the lip subset ([`LIPS_INDICES`]) from a full face mesh
    pub fn from_face_mesh(mesh: &[Landmark]) -> Result<Self, FeatureError> {
        let mut points = Vec::with_capacity(LIPS_INDICES.len());
        for &idx in LIPS_INDICES.iter() {
            let p = mesh.get(idx).ok_or_else(|| {
                FeatureError::InvalidInput(format!(
                    "face mesh has {} points, lip index {} is out of range",
                    mesh.len(),
                    idx
                ))
            })?;
            points.push(*p);
        }
        Self::new(points)
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Leftmost point (minimum x). The first one wins on ties.
    pub fn leftmost(&self) -> Landmark {
        let mut best = self.points[0];
        for p in &self.points[1..] {
            if p.x < best.x {
                best = *p;
            }
        }
        best
    }

    /// Rightmost point (maximum x). The first one wins on ties.
    pub fn rightmost(&self) -> Landmark {
        let mut best = self.points[0];
        for p in &self.points[1..] {
            if p.x > best.x {
                best = *p;
            }
        }
        best
    }

    /// Bounding box of all points
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

impl TryFrom<Vec<Landmark>> for MouthContour {
    type Error = FeatureError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}
