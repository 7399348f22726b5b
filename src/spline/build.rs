use std::sync::Arc;

use glam::Vec3;

use super::{
    tangents, BezierSegment, Curve, HermiteSegment, LineSegment, SharedCurve, Spline, SplineType,
};

/// Default sampling step for length integration and render points
pub const DEFAULT_LENGTH_PRECISION: f32 = 0.001;

/// Authored curve anchor: position, optional tangent hint, author-assigned
/// time. Build input only; the built curve owns its own copies.
#[derive(Debug, Clone, Copy)]
pub struct ControlPoint {
    pub position: Vec3,
    pub tangent: Option<Vec3>,
    pub time: f32,
}

impl ControlPoint {
    pub fn new(position: Vec3, time: f32) -> Self {
        Self {
            position,
            tangent: None,
            time,
        }
    }

    pub fn with_tangent(position: Vec3, tangent: Vec3, time: f32) -> Self {
        Self {
            position,
            tangent: Some(tangent),
            time,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{spline_type:?} spline needs at least {required} control points, got {got}")]
    InsufficientControlPoints {
        spline_type: SplineType,
        required: usize,
        got: usize,
    },
    #[error("control point {index}: time cannot be made strictly increasing by additive repair")]
    NonMonotonicTime { index: usize },
    #[error("length precision must be positive, got {0}")]
    InvalidPrecision(f32),
}

/// Rewrites author times so the sequence is strictly increasing. A time that
/// is not strictly greater than the previous accepted time becomes
/// `previous + original`, preserving relative-offset authoring. Already
/// increasing sequences pass through unchanged. Fails when the additive rule
/// cannot restore strictness (the offending original time is zero or
/// negative).
pub fn repair_times(times: &[f32]) -> Result<Vec<f32>, BuildError> {
    let mut repaired = Vec::with_capacity(times.len());
    let mut last = f32::NEG_INFINITY;
    for (index, &time) in times.iter().enumerate() {
        let accepted = if time > last { time } else { last + time };
        if accepted <= last {
            return Err(BuildError::NonMonotonicTime { index });
        }
        repaired.push(accepted);
        last = accepted;
    }
    Ok(repaired)
}

/// A successfully built curve together with the corrected time sequence the
/// repair produced. The corrected times are the new source of truth for the
/// authoring side; the caller's input is never mutated.
pub struct BuiltSpline {
    pub curve: SharedCurve,
    pub times: Vec<f32>,
}

impl std::fmt::Debug for BuiltSpline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltSpline")
            .field("total_length", &self.curve.total_length())
            .field("times", &self.times)
            .finish()
    }
}

/// Assembles a curve variant from raw authored control points
#[derive(Debug, Clone)]
pub struct SplineBuilder {
    spline_type: SplineType,
    length_precision: f32,
    tension: f32,
    continuity: f32,
    bias: f32,
    points: Vec<ControlPoint>,
}

impl SplineBuilder {
    pub fn new(spline_type: SplineType) -> Self {
        Self {
            spline_type,
            length_precision: DEFAULT_LENGTH_PRECISION,
            tension: 0.0,
            continuity: 0.0,
            bias: 0.0,
            points: Vec::new(),
        }
    }

    pub fn length_precision(mut self, precision: f32) -> Self {
        self.length_precision = precision;
        self
    }

    /// Global Kochanek-Bartels shape parameters; ignored by other variants
    pub fn kochanek_bartels_params(mut self, tension: f32, continuity: f32, bias: f32) -> Self {
        self.tension = tension;
        self.continuity = continuity;
        self.bias = bias;
        self
    }

    pub fn point(mut self, point: ControlPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn points(mut self, points: impl IntoIterator<Item = ControlPoint>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn spline_type(&self) -> SplineType {
        self.spline_type
    }

    pub fn set_spline_type(&mut self, spline_type: SplineType) {
        self.spline_type = spline_type;
    }

    /// Mutable access for authoring edits; pair with `SplineSource::invalidate`
    pub fn points_mut(&mut self) -> &mut Vec<ControlPoint> {
        &mut self.points
    }

    pub fn build(&self) -> Result<BuiltSpline, BuildError> {
        if self.length_precision <= 0.0 {
            return Err(BuildError::InvalidPrecision(self.length_precision));
        }

        let required = self.spline_type.min_control_points();
        if self.points.len() < required {
            return Err(BuildError::InsufficientControlPoints {
                spline_type: self.spline_type,
                required,
                got: self.points.len(),
            });
        }

        // Stride-3 Bezier consumes anchors in groups of four with shared
        // endpoints; points that do not complete a segment are dropped.
        let mut points: &[ControlPoint] = &self.points;
        if self.spline_type == SplineType::Bezier {
            let usable = points.len() - (points.len() - 1) % 3;
            if usable < points.len() {
                log::warn!(
                    "bezier spline: dropping {} trailing control point(s) that do not complete a segment",
                    points.len() - usable
                );
                points = &points[..usable];
            }
        }

        let raw_times: Vec<f32> = points.iter().map(|p| p.time).collect();
        let times = repair_times(&raw_times)?;
        let positions: Vec<Vec3> = points.iter().map(|p| p.position).collect();

        let curve: SharedCurve = match self.spline_type {
            SplineType::Linear => build_linear(positions, &times, self.length_precision),
            SplineType::Hermite => {
                let tangents = authored_tangents(points)
                    .unwrap_or_else(|| tangents::natural(&positions));
                build_hermite_pairs(positions, tangents.clone(), tangents, &times, self.length_precision)
            }
            SplineType::KochanekBartels => {
                let (outgoing, incoming) =
                    tangents::kochanek_bartels(&positions, self.tension, self.continuity, self.bias);
                build_hermite_pairs(positions, outgoing, incoming, &times, self.length_precision)
            }
            SplineType::Bezier => build_bezier(positions, &times, self.length_precision),
            SplineType::SmoothBezier => {
                build_smooth_bezier(positions, &times, self.length_precision)
            }
        };

        Ok(BuiltSpline { curve, times })
    }
}

/// Tangent hints are honored only when every point carries one; partial hints
/// fall back to derived tangents for the whole curve.
fn authored_tangents(points: &[ControlPoint]) -> Option<Vec<Vec3>> {
    points.iter().map(|p| p.tangent).collect()
}

fn consecutive_anchor_indices(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn build_linear(positions: Vec<Vec3>, times: &[f32], precision: f32) -> SharedCurve {
    let segments: Vec<LineSegment> = positions
        .windows(2)
        .map(|w| LineSegment { start: w[0], end: w[1] })
        .collect();
    let anchors = consecutive_anchor_indices(positions.len());
    Arc::new(Spline::assemble(segments, positions, times, &anchors, precision))
}

fn build_hermite_pairs(
    positions: Vec<Vec3>,
    outgoing: Vec<Vec3>,
    incoming: Vec<Vec3>,
    times: &[f32],
    precision: f32,
) -> SharedCurve {
    let segments: Vec<HermiteSegment> = (0..positions.len() - 1)
        .map(|i| HermiteSegment {
            p0: positions[i],
            p1: positions[i + 1],
            m0: outgoing[i],
            m1: incoming[i + 1],
        })
        .collect();
    let anchors = consecutive_anchor_indices(positions.len());
    Arc::new(Spline::assemble(segments, positions, times, &anchors, precision))
}

fn build_bezier(positions: Vec<Vec3>, times: &[f32], precision: f32) -> SharedCurve {
    let segment_count = (positions.len() - 1) / 3;
    let segments: Vec<BezierSegment> = (0..segment_count)
        .map(|s| {
            let i = s * 3;
            BezierSegment {
                b0: positions[i],
                b1: positions[i + 1],
                b2: positions[i + 2],
                b3: positions[i + 3],
            }
        })
        .collect();
    let anchors: Vec<usize> = (0..=segment_count).map(|s| s * 3).collect();
    Arc::new(Spline::assemble(segments, positions, times, &anchors, precision))
}

/// Smoothed Bezier: every authored point is an anchor, interior control
/// points are derived from averaged-neighbor tangents so adjacent segments
/// share a tangent direction at each anchor.
fn build_smooth_bezier(positions: Vec<Vec3>, times: &[f32], precision: f32) -> SharedCurve {
    let tangents = tangents::averaged_neighbors(&positions);
    let segments: Vec<BezierSegment> = (0..positions.len() - 1)
        .map(|i| BezierSegment {
            b0: positions[i],
            b1: positions[i] + tangents[i] / 3.0,
            b2: positions[i + 1] - tangents[i + 1] / 3.0,
            b3: positions[i + 1],
        })
        .collect();
    let anchors = consecutive_anchor_indices(positions.len());
    Arc::new(Spline::assemble(segments, positions, times, &anchors, precision))
}

/// Owns the authoring configuration and the currently published curve.
/// Edits mark the source dirty; the first query after that rebuilds and
/// publishes a fresh immutable curve, so readers holding the previous handle
/// are never disturbed.
pub struct SplineSource {
    builder: SplineBuilder,
    cached: Option<SharedCurve>,
}

impl SplineSource {
    pub fn new(builder: SplineBuilder) -> Self {
        Self {
            builder,
            cached: None,
        }
    }

    /// Mutable access to the authoring configuration; marks the source dirty
    pub fn edit(&mut self) -> &mut SplineBuilder {
        self.cached = None;
        &mut self.builder
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns the published curve, rebuilding it first if an edit or an
    /// explicit `invalidate` marked the cached one stale.
    pub fn curve(&mut self) -> Result<SharedCurve, BuildError> {
        if let Some(curve) = &self.cached {
            return Ok(Arc::clone(curve));
        }
        let built = self.builder.build()?;
        self.cached = Some(Arc::clone(&built.curve));
        Ok(built.curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_leaves_valid_sequences_alone() {
        let times = [0.0, 1.0, 2.5];
        assert_eq!(repair_times(&times).unwrap(), times);
    }

    #[test]
    fn repair_applies_additive_rule_once() {
        // 1.5 is not greater than 2.0, so it becomes 2.0 + 1.5
        let repaired = repair_times(&[0.0, 2.0, 1.5]).unwrap();
        assert_eq!(repaired, vec![0.0, 2.0, 3.5]);
    }

    #[test]
    fn repair_rejects_unfixable_collision() {
        let err = repair_times(&[0.0, 0.0, 5.0]).unwrap_err();
        assert!(matches!(err, BuildError::NonMonotonicTime { index: 1 }));
    }
}
