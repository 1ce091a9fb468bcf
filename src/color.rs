use crate::*;
use std::fmt;

/// An RGB colour with each channel in the range `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb([f64; 3]);

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Result<Self> {
        for c in [r, g, b] {
            // NaN fails the range test
            if !(0.0..=1.0).contains(&c) {
                return Err(Error::ColorRange(c));
            }
        }
        Ok(Rgb([r, g, b]))
    }

    pub fn channels(&self) -> [f64; 3] {
        self.0
    }
}

impl TryFrom<[f64; 3]> for Rgb {
    type Error = Error;

    fn try_from([r, g, b]: [f64; 3]) -> Result<Self> {
        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(c: Rgb) -> Self {
        c.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{:.3} {:.3} {:.3}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_checking() {
        assert!(Rgb::new(0.0, 0.5, 1.0).is_ok());
        assert!(matches!(Rgb::new(1.1, 0.0, 0.0), Err(Error::ColorRange(c)) if c == 1.1));
        assert!(matches!(Rgb::new(0.0, -0.1, 0.0), Err(Error::ColorRange(_))));
        assert!(matches!(Rgb::new(0.0, 0.0, f64::NAN), Err(Error::ColorRange(_))));
    }

    #[test]
    fn display_three_decimals() {
        let c = Rgb::new(1.0, 0.25, 0.0).unwrap();
        assert_eq!(c.to_string(), "1.000 0.250 0.000");
    }

    #[test]
    fn json_checked() {
        let c: Rgb = serde_json::from_str("[0, 0.5, 1]").unwrap();
        assert_eq!(c.channels(), [0.0, 0.5, 1.0]);
        assert!(serde_json::from_str::<Rgb>("[0, 2, 1]").is_err());
    }
}
