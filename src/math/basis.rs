use glam::Vec3;

/// Cubic Hermite blend of two endpoints and their tangents at local parameter `u` in [0, 1].
pub fn hermite_point(p0: Vec3, p1: Vec3, m0: Vec3, m1: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;

    p0 * (2.0 * u3 - 3.0 * u2 + 1.0)
        + m0 * (u3 - 2.0 * u2 + u)
        + p1 * (-2.0 * u3 + 3.0 * u2)
        + m1 * (u3 - u2)
}

/// Derivative of `hermite_point` with respect to `u`.
pub fn hermite_velocity(p0: Vec3, p1: Vec3, m0: Vec3, m1: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;

    p0 * (6.0 * u2 - 6.0 * u)
        + m0 * (3.0 * u2 - 4.0 * u + 1.0)
        + p1 * (6.0 * u - 6.0 * u2)
        + m1 * (3.0 * u2 - 2.0 * u)
}

/// Cubic Bezier blend of four control points at local parameter `u` in [0, 1].
pub fn bezier_point(b0: Vec3, b1: Vec3, b2: Vec3, b3: Vec3, u: f32) -> Vec3 {
    let v = 1.0 - u;
    let v2 = v * v;
    let u2 = u * u;

    b0 * (v2 * v) + b1 * (3.0 * v2 * u) + b2 * (3.0 * v * u2) + b3 * (u2 * u)
}

/// Derivative of `bezier_point` with respect to `u`.
pub fn bezier_velocity(b0: Vec3, b1: Vec3, b2: Vec3, b3: Vec3, u: f32) -> Vec3 {
    let v = 1.0 - u;

    (b1 - b0) * (3.0 * v * v) + (b2 - b1) * (6.0 * v * u) + (b3 - b2) * (3.0 * u * u)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-5;

    #[test]
    fn hermite_interpolates_endpoints() {
        let p0 = Vec3::new(1.0, 2.0, 3.0);
        let p1 = Vec3::new(-4.0, 0.0, 5.0);
        let m0 = Vec3::new(1.0, 0.0, 0.0);
        let m1 = Vec3::new(0.0, 1.0, 0.0);

        assert!((hermite_point(p0, p1, m0, m1, 0.0) - p0).length() < TOL);
        assert!((hermite_point(p0, p1, m0, m1, 1.0) - p1).length() < TOL);
    }

    #[test]
    fn hermite_velocity_matches_tangents_at_endpoints() {
        let p0 = Vec3::ZERO;
        let p1 = Vec3::new(3.0, 0.0, 0.0);
        let m0 = Vec3::new(0.0, 2.0, 0.0);
        let m1 = Vec3::new(0.0, 0.0, -1.0);

        assert!((hermite_velocity(p0, p1, m0, m1, 0.0) - m0).length() < TOL);
        assert!((hermite_velocity(p0, p1, m0, m1, 1.0) - m1).length() < TOL);
    }

    #[test]
    fn bezier_interpolates_anchor_points() {
        let b0 = Vec3::new(0.0, 0.0, 0.0);
        let b1 = Vec3::new(1.0, 2.0, 0.0);
        let b2 = Vec3::new(3.0, 2.0, 0.0);
        let b3 = Vec3::new(4.0, 0.0, 0.0);

        assert!((bezier_point(b0, b1, b2, b3, 0.0) - b0).length() < TOL);
        assert!((bezier_point(b0, b1, b2, b3, 1.0) - b3).length() < TOL);
    }

    #[test]
    fn bezier_velocity_points_along_control_legs_at_endpoints() {
        let b0 = Vec3::ZERO;
        let b1 = Vec3::new(0.0, 1.0, 0.0);
        let b2 = Vec3::new(1.0, 1.0, 0.0);
        let b3 = Vec3::new(1.0, 0.0, 0.0);

        // At u=0 the derivative is 3*(b1-b0), at u=1 it is 3*(b3-b2)
        assert!((bezier_velocity(b0, b1, b2, b3, 0.0) - (b1 - b0) * 3.0).length() < TOL);
        assert!((bezier_velocity(b0, b1, b2, b3, 1.0) - (b3 - b2) * 3.0).length() < TOL);
    }

    #[test]
    fn bezier_straight_line_stays_on_line() {
        let b0 = Vec3::ZERO;
        let b3 = Vec3::new(3.0, 0.0, 0.0);
        let b1 = Vec3::new(1.0, 0.0, 0.0);
        let b2 = Vec3::new(2.0, 0.0, 0.0);

        for i in 0..=10 {
            let u = i as f32 / 10.0;
            let p = bezier_point(b0, b1, b2, b3, u);
            assert!(p.y.abs() < TOL && p.z.abs() < TOL);
        }
    }
}
