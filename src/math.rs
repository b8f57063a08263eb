//! 2D vector math used by the gesture classifier and dispatcher.

/// 2D vector in a y-up coordinate frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean distance between two points
    pub fn distance(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0001 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::ZERO
        }
    }

    /// Counter-clockwise angle from the +x axis in degrees, in [0, 360)
    pub fn angle_degrees(&self) -> f32 {
        let angle = self.y.atan2(self.x).to_degrees();
        if angle < 0.0 {
            // -0.0001 + 360.0 can round up to 360.0 in f32
            (angle + 360.0) % 360.0
        } else {
            angle
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_quadrants() {
        assert_eq!(Vec2::new(1.0, 0.0).angle_degrees(), 0.0);
        assert!((Vec2::new(0.0, 1.0).angle_degrees() - 90.0).abs() < 0.001);
        assert!((Vec2::new(-1.0, 0.0).angle_degrees() - 180.0).abs() < 0.001);
        assert!((Vec2::new(0.0, -1.0).angle_degrees() - 270.0).abs() < 0.001);
    }

    #[test]
    fn test_angle_never_reaches_full_turn() {
        let angle = Vec2::new(1.0, -0.000_001).angle_degrees();
        assert!((0.0..360.0).contains(&angle));
    }

    #[test]
    fn test_normalize_zero_vector() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        let unit = Vec2::new(3.0, 4.0).normalize();
        assert!((unit.length() - 1.0).abs() < 0.0001);
    }
}
