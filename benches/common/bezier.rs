use criterion::{black_box, BenchmarkId, Criterion};
use nbezier_viz::{Algorithm, BezierCurve};
use crate::common::samples::CONTROLS;

const ITERATIONS: usize = 6;

pub fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for algorithm in Algorithm::ALL {
        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| {
                for controls in CONTROLS.iter() {
                    let mut curve = BezierCurve::new();
                    curve.generate(controls, ITERATIONS, algorithm);
                    black_box(curve);
                }
            })
        });
    }
    group.finish();
}

pub fn steps(c: &mut Criterion) {
    c.bench_function("steps", |b| {
        b.iter(|| {
            for controls in CONTROLS.iter() {
                let mut curve = BezierCurve::new();
                black_box(curve.generate_with_steps(controls, ITERATIONS, Algorithm::DivideAndConquer));
            }
        })
    });
}

pub fn refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh");
    for algorithm in Algorithm::ALL {
        let curves: Vec<BezierCurve> = CONTROLS.iter().map(|controls| {
            let mut curve = BezierCurve::new();
            curve.generate(controls, ITERATIONS, algorithm);
            curve
        }).collect();

        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            let mut curves = curves.clone();
            b.iter(|| {
                for (curve, controls) in curves.iter_mut().zip(CONTROLS.iter()) {
                    curve.refresh(controls, |p| { black_box(p); });
                }
            })
        });
    }
    group.finish();
}

pub fn all(c: &mut Criterion) {
    generate(c);
    steps(c);
    refresh(c);
}
