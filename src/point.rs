use std::fmt;

/// A Cartesian point, in output units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// X
    pub x: f64,
    /// Y
    pub y: f64,
    /// Z
    pub z: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Point {
        Point { x, y, z }
    }

    /// Multiplies every coordinate.
    pub fn scaled(self, scale: f64) -> Point {
        Point {
            x: self.x * scale,
            y: self.y * scale,
            z: self.z * scale,
        }
    }
}

/// Formats the coordinates as `x y z` with six fractional digits.
///
/// # Examples
///
/// ```
/// use asdp::Point;
/// assert_eq!("0.000000 0.050000 -1.500000", Point::new(0., 0.05, -1.5).to_string());
/// ```
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} {:.6} {:.6}", self.x, self.y, self.z)
    }
}
