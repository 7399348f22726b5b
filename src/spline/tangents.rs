//! Tangent derivation for the Hermite-family splines.
//!
//! Natural-spline tangents come from the tridiagonal system of the natural
//! cubic spline (solved with the Thomas algorithm, vectorized over Vec3).
//! Kochanek-Bartels tangents expand the tension/continuity/bias formulas;
//! with all three at zero they reduce to averaged-neighbor (Catmull-Rom)
//! tangents, which the smoothed Bezier variant also uses.

use glam::Vec3;

/// First-derivative tangents of the natural cubic spline through `points`,
/// assuming a uniform local parameter per segment.
pub fn natural(points: &[Vec3]) -> Vec<Vec3> {
    let n = points.len();
    debug_assert!(n >= 2, "natural tangents need at least two points");

    // Tridiagonal system:
    //   2 m0     +   m1      = 3 (p1 - p0)
    //   m_{i-1}  + 4 m_i + m_{i+1} = 3 (p_{i+1} - p_{i-1})
    //   m_{n-2}  + 2 m_{n-1} = 3 (p_{n-1} - p_{n-2})
    let mut diag = vec![4.0f32; n];
    let mut rhs = vec![Vec3::ZERO; n];

    diag[0] = 2.0;
    diag[n - 1] = 2.0;
    rhs[0] = (points[1] - points[0]) * 3.0;
    rhs[n - 1] = (points[n - 1] - points[n - 2]) * 3.0;
    for i in 1..n - 1 {
        rhs[i] = (points[i + 1] - points[i - 1]) * 3.0;
    }

    // Thomas forward sweep (sub- and super-diagonals are all 1)
    for i in 1..n {
        let w = 1.0 / diag[i - 1];
        diag[i] -= w;
        rhs[i] = rhs[i] - rhs[i - 1] * w;
    }

    // Back substitution
    let mut tangents = vec![Vec3::ZERO; n];
    tangents[n - 1] = rhs[n - 1] / diag[n - 1];
    for i in (0..n - 1).rev() {
        tangents[i] = (rhs[i] - tangents[i + 1]) / diag[i];
    }
    tangents
}

/// Kochanek-Bartels tangents. Returns `(outgoing, incoming)` per point;
/// segment `i` blends with `outgoing[i]` and `incoming[i + 1]`.
pub fn kochanek_bartels(
    points: &[Vec3],
    tension: f32,
    continuity: f32,
    bias: f32,
) -> (Vec<Vec3>, Vec<Vec3>) {
    let n = points.len();
    debug_assert!(n >= 2, "kochanek-bartels tangents need at least two points");

    let mut outgoing = vec![Vec3::ZERO; n];
    let mut incoming = vec![Vec3::ZERO; n];

    for i in 1..n - 1 {
        let prev = points[i] - points[i - 1];
        let next = points[i + 1] - points[i];

        outgoing[i] = prev * ((1.0 - tension) * (1.0 + bias) * (1.0 + continuity) * 0.5)
            + next * ((1.0 - tension) * (1.0 - bias) * (1.0 - continuity) * 0.5);
        incoming[i] = prev * ((1.0 - tension) * (1.0 + bias) * (1.0 - continuity) * 0.5)
            + next * ((1.0 - tension) * (1.0 - bias) * (1.0 + continuity) * 0.5);
    }

    // One-sided differences at the ends
    outgoing[0] = (points[1] - points[0]) * (1.0 - tension);
    incoming[0] = outgoing[0];
    incoming[n - 1] = (points[n - 1] - points[n - 2]) * (1.0 - tension);
    outgoing[n - 1] = incoming[n - 1];

    (outgoing, incoming)
}

/// Averaged-neighbor tangents: interior tangents span the two neighboring
/// points, endpoint tangents fall back to the adjacent chord.
pub fn averaged_neighbors(points: &[Vec3]) -> Vec<Vec3> {
    let n = points.len();
    debug_assert!(n >= 2, "averaged tangents need at least two points");

    let mut tangents = vec![Vec3::ZERO; n];
    tangents[0] = points[1] - points[0];
    tangents[n - 1] = points[n - 1] - points[n - 2];
    for i in 1..n - 1 {
        tangents[i] = (points[i + 1] - points[i - 1]) * 0.5;
    }
    tangents
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-4;

    #[test]
    fn natural_tangents_on_a_line_follow_the_line() {
        let points = [
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        ];
        for m in natural(&points) {
            assert!((m - Vec3::X).length() < TOL, "expected unit X, got {m:?}");
        }
    }

    #[test]
    fn natural_tangents_two_points_use_the_chord() {
        let points = [Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0)];
        let tangents = natural(&points);
        assert!((tangents[0] - Vec3::new(0.0, 2.0, 0.0)).length() < TOL);
        assert!((tangents[1] - Vec3::new(0.0, 2.0, 0.0)).length() < TOL);
    }

    #[test]
    fn kochanek_bartels_at_zero_is_catmull_rom() {
        let points = [
            Vec3::ZERO,
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(4.0, -1.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
        ];
        let (outgoing, incoming) = kochanek_bartels(&points, 0.0, 0.0, 0.0);
        let averaged = averaged_neighbors(&points);

        for i in 1..points.len() - 1 {
            assert!((outgoing[i] - averaged[i]).length() < TOL);
            assert!((incoming[i] - averaged[i]).length() < TOL);
        }
    }

    #[test]
    fn full_tension_flattens_interior_tangents() {
        let points = [
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ];
        let (outgoing, incoming) = kochanek_bartels(&points, 1.0, 0.0, 0.0);
        assert!(outgoing[1].length() < TOL);
        assert!(incoming[1].length() < TOL);
    }
}
