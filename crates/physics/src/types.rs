use std::ops::{Add, AddAssign, Mul, Sub};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    pub const BACK: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    pub const LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
    pub const RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the ground plane.
    #[must_use]
    pub const fn on_plane(x: f64, z: f64) -> Self {
        Self::new(x, 0.0, z)
    }

    #[must_use]
    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).length()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Static spherical obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f64,
}

impl Obstacle {
    #[must_use]
    pub const fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Whether a sphere at `pos` with `radius` overlaps this obstacle.
    #[must_use]
    pub fn overlaps(&self, pos: Vec3, radius: f64) -> bool {
        let reach = self.radius + radius;
        let delta = pos - self.center;
        delta.dot(delta) < reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_on_plane() {
        let a = Vec3::on_plane(0.0, 0.0);
        let b = Vec3::on_plane(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn obstacle_overlap_is_strict() {
        let o = Obstacle::new(Vec3::on_plane(2.0, 0.0), 1.0);
        assert!(o.overlaps(Vec3::on_plane(0.6, 0.0), 0.5));
        assert!(!o.overlaps(Vec3::on_plane(0.5, 0.0), 0.5));
    }
}
