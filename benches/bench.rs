use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tumble::{narrow::{self, Aabb}, BodyDesc, Fp, Vec2, World, WorldConfig};

fn hexagon(offset: Vec2) -> Vec<Vec2> {
    [
        Vec2::new(0.0, 0.5),
        Vec2::new(0.5, 0.2),
        Vec2::new(0.5, -0.2),
        Vec2::new(0.0, -0.5),
        Vec2::new(-0.5, -0.2),
        Vec2::new(-0.5, 0.2),
    ]
    .iter()
    .map(|v| *v + offset)
    .collect()
}

fn pile() -> World {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world.create(BodyDesc::rect(0.0, 560.0, 800.0, 40.0).fixed()).unwrap();
    for i in 0..100 {
        let (x, y) = ((i % 20) as Fp * 38.0, (i / 20) as Fp * 40.0);
        let desc = match i % 3 {
            0 => BodyDesc::rect(x, y, 30.0, 30.0),
            1 => BodyDesc::circle(x, y, 14.0).with_angle_physics(),
            _ => BodyDesc::rect(x, y, 30.0, 30.0).with_rect_vertices().with_angle_physics(),
        };
        world.create(desc).unwrap();
    }
    world
}

fn criterion_benchmark(c: &mut Criterion) {
    let a = hexagon(Vec2::new(0.5, 0.5));
    let b = hexagon(Vec2::new(0.9, 0.8));
    c.bench_function("sat hexagon mtv", |bench| bench.iter(|| narrow::polygons_mtv(black_box(&a), black_box(&b))));

    let r1 = Aabb::new(0.0, 0.0, 1.0, 1.0);
    let r2 = Aabb::new(0.5, 0.8, 1.5, 1.8);
    c.bench_function("aabb mtv", |bench| bench.iter(|| narrow::aabb_mtv(black_box(&r1), black_box(&r2))));

    c.bench_function("step 100 bodies", |bench| {
        let mut world = pile();
        bench.iter(|| world.step())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
