use crate::{Vec2, narrow::{self, Aabb, Circle, Intersect}};

/// A body's collision geometry in world space, ready for a narrowphase query.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    Rect(Aabb),
    /// At least three world-space vertices.
    Poly(Vec<Vec2>),
    Circle(Circle),
}

impl Intersect for Collider {
    fn get_bounding_box(&self) -> Aabb {
        match self {
            Collider::Rect(aabb) => *aabb,
            Collider::Poly(verts) => Aabb::from_points(verts),
            Collider::Circle(c) => c.get_bounding_box(),
        }
    }

    fn point_test(&self, point: Vec2) -> bool {
        match self {
            Collider::Rect(aabb) => aabb.point_test(point),
            Collider::Poly(verts) => narrow::point_in_polygon(point, verts),
            Collider::Circle(c) => c.point_test(point),
        }
    }
}

pub fn contact(a: &Collider, b: &Collider) -> Option<Vec2> {
    //! Single narrowphase dispatch. Returns the MTV that separates `a` from `b`.
    if !a.get_bounding_box().overlap_test(&b.get_bounding_box()) {
        return None;
    }

    // rects meet polygons as 4-vertex polygons
    match (a, b) {
        (Collider::Poly(pa), Collider::Poly(pb)) => narrow::polygons_mtv(pa, pb),
        (Collider::Poly(pa), Collider::Rect(rb)) => narrow::polygons_mtv(pa, &rb.corners()),
        (Collider::Rect(ra), Collider::Poly(pb)) => narrow::polygons_mtv(&ra.corners(), pb),
        (Collider::Rect(ra), Collider::Rect(rb)) => narrow::aabb_mtv(ra, rb),

        (Collider::Circle(ca), Collider::Rect(rb)) => narrow::circle_aabb_mtv(ca, rb),
        (Collider::Rect(ra), Collider::Circle(cb)) => narrow::circle_aabb_mtv(cb, ra).map(|m| -m),
        (Collider::Circle(ca), Collider::Poly(pb)) => narrow::circle_poly_mtv(ca, pb),
        (Collider::Poly(pa), Collider::Circle(cb)) => narrow::circle_poly_mtv(cb, pa).map(|m| -m),
        (Collider::Circle(ca), Collider::Circle(cb)) => narrow::circle_circle_mtv(ca, cb),
    }
}
