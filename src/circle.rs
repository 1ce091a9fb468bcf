//! Regular polygons approximating circles.
use crate::*;
use std::f64::consts::TAU;

/// Scale applied to coordinates which are later read back as fixed point.
///
/// Three decimal places are written, so a unit circle scaled by this factor keeps
/// six significant digits per coordinate.
pub const FIXED_POINT_SCALE: f64 = 1000.0;

/// Generate `count` points evenly spaced around a unit circle.
///
/// Point `i` sits at angle `phase + i * 2π / count`, offset by `translate`.
/// The returned iterator is lazy and single use; call again to regenerate.
///
/// # Example
/// ```rust
/// use polyfix::*;
/// let pts = make_points(4, 0.0, [1.0, 0.0]).collect::<Vec<_>>();
///
/// assert_eq!(pts.len(), 4);
/// assert!((pts[0][0] - 2.0).abs() < 1e-9);
/// assert!((pts[1][1] - 1.0).abs() < 1e-9);
/// ```
pub fn make_points(count: usize, phase: f64, translate: Point2) -> CirclePoints {
    CirclePoints {
        count,
        next: 0,
        phase,
        translate,
        scale: 1.0,
    }
}

#[derive(Clone, Debug)]
pub struct CirclePoints {
    count: usize,
    next: usize,
    phase: f64,
    translate: Point2,
    scale: f64,
}

impl CirclePoints {
    /// Scale the radius by [`FIXED_POINT_SCALE`].
    pub fn scaled(self) -> Self {
        self.with_scale(FIXED_POINT_SCALE)
    }

    /// Scale the radius by `scale`. The translation is not scaled.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The angle between neighbouring points.
    pub fn step(&self) -> f64 {
        TAU / self.count as f64
    }
}

impl Iterator for CirclePoints {
    type Item = Point2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }

        let angle = self.phase + self.next as f64 * self.step();
        self.next += 1;
        Some(polar(angle).scale(self.scale).add(self.translate))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CirclePoints {}

/// A named circle polygon, as described in fixture plans.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CircleParams {
    pub name: String,
    #[serde(default)]
    pub phase: f64,
    #[serde(default = "origin")]
    pub translate: Point2,
    #[serde(default = "unit")]
    pub scale: f64,
}

fn origin() -> Point2 {
    Point2::zero()
}

fn unit() -> f64 {
    1.0
}

impl CircleParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phase: 0.0,
            translate: Point2::zero(),
            scale: 1.0,
        }
    }

    pub fn phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn translate(mut self, translate: Point2) -> Self {
        self.translate = translate;
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Generate the points for a `count`-gon.
    pub fn points(&self, count: usize) -> CirclePoints {
        make_points(count, self.phase, self.translate).with_scale(self.scale)
    }

    /// Build the polygon record for a `count`-gon.
    pub fn record(&self, count: usize) -> Result<PolygonRecord> {
        PolygonRecord::new(self.name.clone(), self.points(count))
    }
}
