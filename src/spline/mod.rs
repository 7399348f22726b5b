//! Parametric 3D curves over authored control points.
//!
//! Four interpolation variants share one contract: a continuous position and
//! velocity over a single scalar parameter spanning all segments, a total
//! length integrated at build time, and a fixed-step sampling for drawing the
//! curve. The parameter is not true arc length: the repaired author
//! timestamps are rescaled onto `[0, total_length]`, so segment ownership
//! follows authored pacing while the endpoints line up with the measured
//! length.

mod build;
mod segment;
pub mod tangents;

pub use build::{
    repair_times, BuildError, BuiltSpline, ControlPoint, SplineBuilder, SplineSource,
    DEFAULT_LENGTH_PRECISION,
};
pub use segment::{BezierSegment, HermiteSegment, LineSegment, Segment};

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Interpolation scheme used to build a spline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SplineType {
    Linear,
    Hermite,
    KochanekBartels,
    Bezier,
    SmoothBezier,
}

impl SplineType {
    /// Minimum number of control points one segment of this variant requires
    pub fn min_control_points(self) -> usize {
        match self {
            SplineType::Linear | SplineType::Hermite | SplineType::KochanekBartels => 2,
            SplineType::Bezier => 4,
            SplineType::SmoothBezier => 3,
        }
    }
}

/// A built, immutable curve. Rebuilds publish a fresh instance behind an
/// `Arc` so an in-flight camera tick never observes a half-built curve.
pub trait Curve {
    /// Position at `param`; out-of-range parameters clamp to the endpoints
    fn position(&self, param: f32) -> Vec3;

    /// Derivative of `position` at `param`, used as a direction indicator
    fn velocity(&self, param: f32) -> Vec3;

    /// Upper end of the parameter range, measured at build time
    fn total_length(&self) -> f32;

    /// Sampling step used for length integration and render points
    fn length_precision(&self) -> f32;

    /// Authored control positions, in order
    fn control_points(&self) -> &[Vec3];

    /// Parameter value of each control point, parallel to `control_points`
    fn params(&self) -> &[f32];

    /// Fixed-step parameter sampling spanning the whole curve, for
    /// visualization. Recomputed on every call.
    fn render_points(&self) -> Vec<f32> {
        let total = self.total_length();
        let step = self.length_precision();
        let mut out = Vec::with_capacity((total / step) as usize + 2);
        let mut param = 0.0;
        while param < total {
            out.push(param);
            param += step;
        }
        out.push(total);
        out
    }
}

/// Shared handle to a published curve
pub type SharedCurve = Arc<dyn Curve + Send + Sync>;

/// Generic curve carrier: per-variant segments plus the parameter bookkeeping
/// common to every variant.
pub struct Spline<S: Segment> {
    segments: Vec<S>,
    control_points: Vec<Vec3>,
    params: Vec<f32>,
    /// Parameter at each segment boundary, `segments.len() + 1` entries
    anchors: Vec<f32>,
    total_length: f32,
    length_precision: f32,
}

impl<S: Segment> Spline<S> {
    /// Assembles the carrier from variant output. `anchor_indices` selects
    /// the control points that bound segments (all of them except for the
    /// stride-3 Bezier layout); `times` is the repaired, strictly increasing
    /// author time per control point.
    pub(crate) fn assemble(
        segments: Vec<S>,
        control_points: Vec<Vec3>,
        times: &[f32],
        anchor_indices: &[usize],
        length_precision: f32,
    ) -> Self {
        debug_assert_eq!(anchor_indices.len(), segments.len() + 1);
        debug_assert_eq!(times.len(), control_points.len());

        let total_length = integrate_length(&segments, times, anchor_indices, length_precision);

        // Affine rescale of the author time axis onto [0, total_length]
        let t0 = times[0];
        let span = times[times.len() - 1] - t0;
        let scale = if span > 0.0 && total_length > 0.0 {
            total_length / span
        } else {
            0.0
        };
        let params: Vec<f32> = times.iter().map(|t| (t - t0) * scale).collect();
        let anchors: Vec<f32> = anchor_indices.iter().map(|&i| params[i]).collect();

        Self {
            segments,
            control_points,
            params,
            anchors,
            total_length,
            length_precision,
        }
    }

    /// Maps a (clamped) parameter to its owning segment and local parameter
    fn locate(&self, param: f32) -> (usize, f32) {
        // Binary search over anchor parameters, then normalize into [0, 1]
        let mut lo = 0usize;
        let mut hi = self.segments.len() - 1;
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.anchors[mid] <= param {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        let span = self.anchors[lo + 1] - self.anchors[lo];
        let u = if span > 0.0 {
            ((param - self.anchors[lo]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (lo, u)
    }

    fn degenerate(&self) -> bool {
        self.total_length <= f32::EPSILON
    }
}

impl<S: Segment> Curve for Spline<S> {
    fn position(&self, param: f32) -> Vec3 {
        if self.degenerate() {
            return self.control_points[0];
        }
        let param = param.clamp(0.0, self.total_length);
        let (index, u) = self.locate(param);
        self.segments[index].point(u)
    }

    fn velocity(&self, param: f32) -> Vec3 {
        if self.degenerate() {
            return Vec3::ZERO;
        }
        let param = param.clamp(0.0, self.total_length);
        let (index, u) = self.locate(param);
        let span = self.anchors[index + 1] - self.anchors[index];
        if span > 0.0 {
            self.segments[index].derivative(u) / span
        } else {
            Vec3::ZERO
        }
    }

    fn total_length(&self) -> f32 {
        self.total_length
    }

    fn length_precision(&self) -> f32 {
        self.length_precision
    }

    fn control_points(&self) -> &[Vec3] {
        &self.control_points
    }

    fn params(&self) -> &[f32] {
        &self.params
    }
}

/// Approximates the curve length by summing chord lengths of a fixed-step
/// sampling of each segment. Step count is proportional to the segment's
/// author time span at `precision` resolution; cubic arcs have no closed
/// form, so this runs once per build.
fn integrate_length<S: Segment>(
    segments: &[S],
    times: &[f32],
    anchor_indices: &[usize],
    precision: f32,
) -> f32 {
    let mut total = 0.0;
    for (i, segment) in segments.iter().enumerate() {
        let span = times[anchor_indices[i + 1]] - times[anchor_indices[i]];
        let steps = ((span / precision).ceil() as usize).max(1);
        let du = 1.0 / steps as f32;

        let mut prev = segment.point(0.0);
        for k in 1..=steps {
            let next = segment.point(du * k as f32);
            total += (next - prev).length();
            prev = next;
        }
    }
    total
}
