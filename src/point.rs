use std::ops;

pub trait Point: Copy + Sized + IntoIterator<Item = f64> {
    /// Set all the values to this value.
    fn all(v: f64) -> Self;

    /// Set all values to zero.
    fn zero() -> Self {
        Self::all(0.)
    }

    /// Scale point by multiplying all dimensions by `scalar`.
    fn scale(self, scalar: f64) -> Self;

    /// Calculate the magnitude of the vector.
    fn mag(self) -> f64 {
        self.into_iter()
            .zip(self)
            .map(|(a, b)| a * b)
            .sum::<f64>()
            .sqrt()
    }

    /// Perform a transformation on each pair of dimensions.
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self;
}

pub trait Add<Rhs = Self> {
    fn add(self, rhs: Rhs) -> Self;
    fn sub(self, rhs: Rhs) -> Self
    where
        Self: Sized + Copy,
        Rhs: Point,
    {
        self.add(rhs.scale(-1.0))
    }
}

/// 2D Point (X,Y).
pub type Point2 = [f64; 2];

impl Add for Point2 {
    fn add(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Add::add)
    }

    fn sub(self, rhs: Self) -> Self {
        xfm(self, rhs, ops::Sub::sub)
    }
}
impl Point for Point2 {
    fn all(v: f64) -> Self {
        [v; 2]
    }
    fn scale(self, scalar: f64) -> Self {
        self.map(|f| f * scalar)
    }
    fn xfm<F: Fn(f64, f64) -> f64>(self, b: Self, f: F) -> Self {
        let [ax, ay] = self;
        let [bx, by] = b;
        [f(ax, bx), f(ay, by)]
    }
}

/// The unit vector at `angle` radians from the positive X axis.
pub fn polar(angle: f64) -> Point2 {
    let (sin, cos) = angle.sin_cos();
    [cos, sin]
}

/// Round each dimension to `places` decimal places.
///
/// Matches what `{:.N}` formatting would print, so it can be used to compare written
/// coordinates against the values that produced them.
pub fn round_to(p: Point2, places: i32) -> Point2 {
    let f = 10f64.powi(places);
    p.map(|x| (x * f).round() / f)
}

/// Helper function which effectively transforms to [`Point::xfm`].
#[inline(always)]
pub fn xfm<P: Point, F: Fn(f64, f64) -> f64>(a: P, b: P, f: F) -> P {
    P::xfm(a, b, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_adding() {
        let p = [0.0, 1.0].add([3.0, 1.0]);
        assert_eq!(p, [3.0, 2.0]);

        let p = [0.0, 1.0].sub([3.0, 1.0]);
        assert_eq!(p, [-3.0, 0.0]);
    }

    #[test]
    fn point_scaling() {
        let p = [0.0, 1.0].scale(2.0);
        assert_eq!(p, [0.0, 2.0]);

        let p = [-2.0, 0.5].scale(-0.5);
        assert_eq!(p, [1.0, -0.25]);
    }

    #[test]
    fn mag_testing() {
        let m = [3.0, 4.0].mag() - 5.0;
        assert!(m.abs() < 1e-11);

        let m = [3.0, -4.0].mag() - 5.0;
        assert!(m.abs() < 1e-11);

        let m = [-3.0, 4.0].mag() - 5.0;
        assert!(m.abs() < 1e-11);
    }

    #[test]
    fn polar_testing() {
        let [x, y] = polar(0.0);
        assert!((x - 1.0).abs() < 1e-11 && y.abs() < 1e-11);

        let [x, y] = polar(std::f64::consts::FRAC_PI_2);
        assert!(x.abs() < 1e-11 && (y - 1.0).abs() < 1e-11);

        let m = polar(1.234).mag() - 1.0;
        assert!(m.abs() < 1e-11);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to([0.12345, -2.0006], 3), [0.123, -2.001]);
        assert_eq!(round_to([1.0, 0.0], 3), [1.0, 0.0]);
    }
}
