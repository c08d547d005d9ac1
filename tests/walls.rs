use tumble::{BodyDesc, World, WorldConfig};

#[test]
fn right_wall_contains_fast_body() {
    let mut world = World::new(WorldConfig::new().with_gravity(0.0)).unwrap();
    let handle = world.create(BodyDesc::rect(100.0, 100.0, 50.0, 50.0).with_velocity(10.0, 0.0)).unwrap();

    let mut touched = false;
    for _ in 0..100 {
        world.step();
        let body = world.body(handle).unwrap();
        assert!(body.pos.x + body.size.x <= 800.0);
        if body.pos.x + body.size.x == 800.0 {
            assert_eq!(body.vel.x, 0.0);
            touched = true;
        }
    }
    assert!(touched);
}

#[test]
fn left_wall_contains_body() {
    let mut world = World::new(WorldConfig::new().with_gravity(0.0)).unwrap();
    let handle = world.create(BodyDesc::rect(30.0, 100.0, 20.0, 20.0).with_velocity(-7.0, 0.0)).unwrap();
    for _ in 0..20 {
        world.step();
        assert!(world.body(handle).unwrap().pos.x >= 0.0);
    }
    let body = world.body(handle).unwrap();
    assert_eq!(body.pos.x, 0.0);
    assert_eq!(body.vel.x, 0.0);
}

#[test]
fn static_wall_blocks_body() {
    let mut world = World::new(WorldConfig::new().with_gravity(0.0)).unwrap();
    world.create(BodyDesc::rect(400.0, 0.0, 20.0, 600.0).fixed()).unwrap();
    let handle = world.create(BodyDesc::rect(300.0, 100.0, 20.0, 20.0).with_velocity(6.0, 0.0)).unwrap();
    for _ in 0..40 {
        world.step();
        assert!(world.body(handle).unwrap().pos.x + 20.0 <= 400.0);
    }
    assert_eq!(world.body(handle).unwrap().vel.x, 0.0);
}

#[test]
fn ground_friction_brings_body_to_rest() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    let handle = world.create(BodyDesc::rect(100.0, 580.0, 20.0, 20.0).with_velocity(8.0, 0.0)).unwrap();
    for _ in 0..60 {
        world.step();
    }
    let body = world.body(handle).unwrap();
    assert_eq!(body.vel.x, 0.0);
    assert!(body.pos.x > 100.0);
}

#[test]
fn wall_contact_zeroes_outward_velocity() {
    let mut world = World::new(WorldConfig::new().with_gravity(0.0)).unwrap();
    let handle = world.create(BodyDesc::rect(-4.0, 100.0, 20.0, 20.0).with_velocity(1.0, 0.0)).unwrap();
    world.step();
    let body = world.body(handle).unwrap();
    assert_eq!(body.pos.x, 0.0);
    assert_eq!(body.vel.x, 0.0);
}
