use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cube_field::frame::{AnimationConfig, FrameLoop, ManualScheduler};
use cube_field::mesh::uv_sphere;
use cube_field::random::SeededRandom;
use cube_field::scene::{build_scene, Camera, SceneConfig, SceneGraph};
use cube_field::{RenderTarget, Viewport};

/// Render target that only touches the graph
struct NullTarget;

impl RenderTarget for NullTarget {
    fn render(&mut self, graph: &SceneGraph, _camera: &Camera) -> anyhow::Result<()> {
        black_box(graph.len());
        Ok(())
    }
}

fn viewport() -> Viewport {
    Viewport::new(1920, 1080, 1.0)
}

/// Benchmark: scene construction for growing batch sizes
fn bench_build_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_scene");

    for count in [0usize, 500, 5_000] {
        let config = SceneConfig {
            cube_count: count,
            ..SceneConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(count), &config, |b, config| {
            b.iter(|| {
                let mut rng = SeededRandom::seeded(7);
                black_box(build_scene(config, viewport(), &mut rng))
            })
        });
    }

    group.finish();
}

/// Benchmark: one frame loop iteration over the default scene
fn bench_frame_tick(c: &mut Criterion) {
    let mut state = build_scene(&SceneConfig::default(), viewport(), &mut SeededRandom::seeded(7));
    let mut target = NullTarget;
    let mut frame_loop = FrameLoop::new(ManualScheduler::new(), AnimationConfig::default());
    frame_loop
        .start(&mut state, &mut target)
        .expect("first frame");

    c.bench_function("frame_tick_500_cubes", |b| {
        b.iter(|| {
            frame_loop
                .tick(&mut state, &mut target)
                .expect("frame");
        })
    });
}

/// Benchmark: sphere tessellation at the scene's resolution
fn bench_sphere_mesh(c: &mut Criterion) {
    c.bench_function("uv_sphere_30x30", |b| {
        b.iter(|| black_box(uv_sphere(black_box(4.0), 30, 30)))
    });
}

criterion_group!(benches, bench_build_scene, bench_frame_tick, bench_sphere_mesh);
criterion_main!(benches);
