use glam::Vec3;

use crate::math::{bezier_point, bezier_velocity, hermite_point, hermite_velocity};

/// One independently parameterized piece of a spline, blended over a local
/// parameter `u` in [0, 1].
pub trait Segment {
    /// Position on the segment at local parameter `u`
    fn point(&self, u: f32) -> Vec3;

    /// Derivative with respect to the local parameter
    fn derivative(&self, u: f32) -> Vec3;
}

/// Straight segment between two control points
#[derive(Debug, Clone, Copy)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment for LineSegment {
    fn point(&self, u: f32) -> Vec3 {
        self.start.lerp(self.end, u)
    }

    fn derivative(&self, _u: f32) -> Vec3 {
        self.end - self.start
    }
}

/// Cubic Hermite segment: two endpoints with an outgoing and an incoming
/// tangent. Kochanek-Bartels segments use this form with derived tangents.
#[derive(Debug, Clone, Copy)]
pub struct HermiteSegment {
    pub p0: Vec3,
    pub p1: Vec3,
    pub m0: Vec3,
    pub m1: Vec3,
}

impl Segment for HermiteSegment {
    fn point(&self, u: f32) -> Vec3 {
        hermite_point(self.p0, self.p1, self.m0, self.m1, u)
    }

    fn derivative(&self, u: f32) -> Vec3 {
        hermite_velocity(self.p0, self.p1, self.m0, self.m1, u)
    }
}

/// Cubic Bezier segment: two anchors and two interior control points
#[derive(Debug, Clone, Copy)]
pub struct BezierSegment {
    pub b0: Vec3,
    pub b1: Vec3,
    pub b2: Vec3,
    pub b3: Vec3,
}

impl Segment for BezierSegment {
    fn point(&self, u: f32) -> Vec3 {
        bezier_point(self.b0, self.b1, self.b2, self.b3, u)
    }

    fn derivative(&self, u: f32) -> Vec3 {
        bezier_velocity(self.b0, self.b1, self.b2, self.b3, u)
    }
}
