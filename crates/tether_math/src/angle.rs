//! Typed angles
//!
//! Keeps degrees and radians apart so an orientation can't silently be built
//! from the wrong unit.

/// Angle in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Degree(pub f32);

/// Angle in radians
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Radian(pub f32);

impl Degree {
    /// Raw value in degrees
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn to_radians(self) -> Radian {
        Radian(self.0.to_radians())
    }
}

impl Radian {
    /// Raw value in radians
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    #[inline]
    pub fn to_degrees(self) -> Degree {
        Degree(self.0.to_degrees())
    }
}

impl From<Degree> for Radian {
    fn from(d: Degree) -> Self {
        d.to_radians()
    }
}

impl From<Radian> for Degree {
    fn from(r: Radian) -> Self {
        r.to_degrees()
    }
}
