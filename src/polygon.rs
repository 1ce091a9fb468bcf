use crate::*;

/// A named polygon, as declared in a fixture file.
///
/// Point order is significant; it defines the winding of the boundary.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct PolygonRecord {
    name: String,
    points: Vec<Point2>,
}

/// Unchecked form of [`PolygonRecord`], validated on the way in.
#[derive(serde::Deserialize)]
struct RawRecord {
    name: String,
    points: Vec<Point2>,
}

impl TryFrom<RawRecord> for PolygonRecord {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        PolygonRecord::new(raw.name, raw.points)
    }
}

impl PolygonRecord {
    pub fn new<N, I>(name: N, points: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = Point2>,
    {
        let name = check_name(name.into())?;
        let points = points.into_iter().collect();
        Ok(PolygonRecord { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pts(&self) -> &[Point2] {
        &self.points
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point2> + '_ {
        self.points.iter().copied()
    }
}

/// Names are single whitespace-free tokens since fixture lines are split on whitespace.
pub(crate) fn check_name(name: String) -> Result<String> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        Err(Error::InvalidName(name))
    } else {
        Ok(name)
    }
}

impl Area for PolygonRecord {
    /// 2D plan area, zero for fewer than 3 points.
    ///
    /// # Example
    /// ```rust
    /// use polyfix::*;
    /// let p = PolygonRecord::new("rect", [
    ///     [0.0, 0.0],
    ///     [2.0, 0.0],
    ///     [2.0, 3.0],
    ///     [0.0, 3.0]
    /// ]).unwrap();
    ///
    /// assert!((p.area() - 6.0).abs() < 1e-3);
    /// ```
    fn area(&self) -> f64 {
        let pts = self.pts();
        if pts.len() < 3 {
            return 0.0;
        }

        // https://stackoverflow.com/questions/451426/how-do-i-calculate-the-area-of-a-2d-polygon
        pts.iter()
            .zip(pts.iter().cycle().skip(1))
            .map(|([ax, ay], [bx, by])| ax * by - ay * bx)
            .sum::<f64>()
            .abs()
            * 0.5
    }
}
