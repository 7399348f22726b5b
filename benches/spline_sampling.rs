use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use path_camera::spline::{ControlPoint, Curve, SharedCurve, SplineBuilder, SplineType};

/// Helix-shaped control points, one second of author time per point
fn helix_points(count: usize) -> Vec<ControlPoint> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * 0.4;
            ControlPoint::new(
                Vec3::new(angle.cos() * 5.0, i as f32 * 0.25, angle.sin() * 5.0),
                i as f32,
            )
        })
        .collect()
}

fn build_curve(spline_type: SplineType, count: usize) -> SharedCurve {
    SplineBuilder::new(spline_type)
        .length_precision(0.01)
        .points(helix_points(count))
        .build()
        .unwrap()
        .curve
}

const VARIANTS: [SplineType; 5] = [
    SplineType::Linear,
    SplineType::Hermite,
    SplineType::KochanekBartels,
    SplineType::Bezier,
    SplineType::SmoothBezier,
];

/// Benchmark: build (including length integration) per variant
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for spline_type in VARIANTS {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{spline_type:?}")),
            &spline_type,
            |b, &spline_type| {
                let builder = SplineBuilder::new(spline_type)
                    .length_precision(0.01)
                    .points(helix_points(64));
                b.iter(|| black_box(builder.build().unwrap()))
            },
        );
    }
    group.finish();
}

/// Benchmark: position lookups swept across the whole parameter range
fn bench_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("position");
    for spline_type in VARIANTS {
        let curve = build_curve(spline_type, 64);
        let total = curve.total_length();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{spline_type:?}")),
            &curve,
            |b, curve| {
                let mut param = 0.0f32;
                b.iter(|| {
                    param = (param + 0.37) % total;
                    black_box(curve.position(black_box(param)))
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: velocity lookup on the variant the camera queries twice a tick
fn bench_velocity(c: &mut Criterion) {
    let curve = build_curve(SplineType::SmoothBezier, 64);
    let total = curve.total_length();

    c.bench_function("velocity_smooth_bezier", |b| {
        let mut param = 0.0f32;
        b.iter(|| {
            param = (param + 0.37) % total;
            black_box(curve.velocity(black_box(param)))
        })
    });
}

/// Benchmark: render-point sampling for visualization
fn bench_render_points(c: &mut Criterion) {
    let curve = build_curve(SplineType::Linear, 64);

    c.bench_function("render_points_linear", |b| {
        b.iter(|| black_box(curve.render_points()))
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_position,
    bench_velocity,
    bench_render_points
);
criterion_main!(benches);
