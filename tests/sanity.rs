use tumble::{BodyDesc, CollisionType, Fp, Vec2, World, WorldConfig};

struct Lcg(u64);
impl Lcg {
    fn next(&mut self) -> Fp {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 40) as Fp / (1u64 << 24) as Fp
    }
}

fn crowded_world(seed: u64) -> World {
    let mut rng = Lcg(seed);
    let mut world = World::new(WorldConfig::default()).unwrap();
    world.create(BodyDesc::rect(0.0, 550.0, 800.0, 50.0).fixed()).unwrap();
    world
        .create(BodyDesc::polygon(200.0, 400.0, 200.0, 100.0, vec![
            Vec2::new(0.0, 100.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(200.0, 100.0),
        ]).fixed())
        .unwrap();
    for i in 0..40 {
        let (x, y) = (rng.next() * 760.0, rng.next() * 300.0);
        let (vx, vy) = (rng.next() * 8.0 - 4.0, rng.next() * 4.0 - 2.0);
        let desc = match i % 4 {
            0 => BodyDesc::rect(x, y, 20.0 + rng.next() * 20.0, 20.0),
            1 => BodyDesc::circle(x, y, 5.0 + rng.next() * 10.0).with_angle_physics(),
            2 => BodyDesc::rect(x, y, 30.0, 30.0).with_rect_vertices().with_angle(0.3, 0.05).with_angle_physics(),
            // coincident vertices must not poison the narrowphase
            _ => BodyDesc::polygon(x, y, 20.0, 20.0, vec![Vec2::ZERO, Vec2::ZERO, Vec2::new(20.0, 20.0), Vec2::new(0.0, 20.0)]),
        };
        world.create(desc.with_velocity(vx, vy)).unwrap();
    }
    world
}

#[test]
fn crowded_world_stays_finite() {
    let mut world = crowded_world(7);
    for _ in 0..300 {
        world.step();
        for (_, body) in world.bodies() {
            assert!(body.is_finite(), "{:?}", body);
            // later dynamic contacts may nudge a contained body slightly past the edge
            assert!(body.pos.x > -100.0 && body.pos.x < 900.0, "{:?}", body);
            assert!(body.pos.y < 700.0, "{:?}", body);
        }
    }
}

#[test]
fn stepping_is_deterministic() {
    let (mut a, mut b) = (crowded_world(42), crowded_world(42));
    for _ in 0..100 {
        a.step();
        b.step();
    }
    for ((_, x), (_, y)) in a.bodies().zip(b.bodies()) {
        assert_eq!(x.pos, y.pos);
        assert_eq!(x.vel, y.vel);
        assert_eq!(x.angle, y.angle);
    }
}

#[test]
fn degenerate_polygon_collides_as_box() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world.create(BodyDesc::rect(0.0, 500.0, 800.0, 100.0).fixed()).unwrap();
    let flat = world
        .create(BodyDesc::polygon(100.0, 400.0, 30.0, 30.0, vec![Vec2::ZERO, Vec2::new(30.0, 0.0)]))
        .unwrap();
    for _ in 0..100 {
        world.step();
    }
    let flat = world.body(flat).unwrap();
    assert_eq!(flat.collision_type(), CollisionType::Polygon);
    assert!((flat.pos.y + 30.0 - 500.0).abs() < 0.1);
    assert!(flat.on_ground);
}
