//! Narrowphase data and logic module.
//!
//! Every penetration query here returns the minimum translation vector (MTV) that moves the
//! *first* shape out of the second, or `None` when the shapes are separated or only touching.

pub mod contact;

use crate::{Fp, Vec2};

pub use contact::{contact, Collider};

// ---------- Point & Line ---------- //

#[inline]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    //! Returns the point on segment `a->b` nearest to `p`. Zero-length segments return `a`.
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    //! Crossing-number test. Works for concave and self-touching outlines as well.
    let len = poly.len();
    if len < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = len - 1;
    for i in 0..len {
        let (a, b) = (poly[i], poly[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[inline]
pub fn centroid(poly: &[Vec2]) -> Vec2 {
    //! Vertex average. Empty input yields the origin.
    if poly.is_empty() {
        return Vec2::ZERO;
    }
    poly.iter().fold(Vec2::ZERO, |acc, v| acc + *v) / poly.len() as Fp
}

// ---------- Aabb & Circle ---------- //

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Aabb {
        Aabb {
            min: Vec2::new(minx, miny),
            max: Vec2::new(maxx, maxy),
        }
    }
    #[inline]
    pub fn from_rect(pos: Vec2, size: Vec2) -> Aabb {
        Aabb { min: pos, max: pos + size }
    }
    pub fn from_points(points: &[Vec2]) -> Aabb {
        let (mut min, mut max) = (Vec2::splat(Fp::MAX), Vec2::splat(Fp::MIN));
        for p in points {
            min = min.min(*p);
            max = max.max(*p);
        }
        Aabb { min, max }
    }

    #[inline]
    pub fn minx_maxy(self) -> Vec2 {
        Vec2::new(self.min.x, self.max.y)
    }
    #[inline]
    pub fn maxx_miny(self) -> Vec2 {
        Vec2::new(self.max.x, self.min.y)
    }
    #[inline]
    pub fn corners(self) -> [Vec2; 4] {
        //! Corners in edge order, starting at `min`.
        [self.min, self.maxx_miny(), self.max, self.minx_maxy()]
    }
    #[inline]
    pub fn overlap_test(&self, other: &Aabb) -> bool {
        //! Strict overlap: boxes sharing only an edge do not overlap.
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub rad: Fp,
    pub pos: Vec2,
}
impl Circle {
    #[inline]
    pub fn new(rad: Fp, posx: Fp, posy: Fp) -> Circle {
        Circle {
            rad: rad.abs(),
            pos: Vec2::new(posx, posy),
        }
    }
}

// ---------- Intersect ---------- //

pub trait Intersect {
    fn get_bounding_box(&self) -> Aabb;
    fn point_test(&self, point: Vec2) -> bool;
}

impl Intersect for Aabb {
    #[inline]
    fn get_bounding_box(&self) -> Aabb {
        *self
    }
    #[inline]
    fn point_test(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}
impl Intersect for Circle {
    #[inline]
    fn get_bounding_box(&self) -> Aabb {
        let splat = Vec2::splat(self.rad);
        Aabb {
            min: self.pos - splat,
            max: self.pos + splat,
        }
    }
    #[inline]
    fn point_test(&self, point: Vec2) -> bool {
        self.rad * self.rad >= (self.pos - point).length_squared()
    }
}

// ---------- Separating Axis ---------- //

#[inline]
fn edge_normals(poly: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let len = poly.len();
    (0..len).map(move |i| {
        let edge = poly[(i + 1) % len] - poly[i];
        // degenerate edges produce a zero axis, skipped by callers
        Vec2::new(-edge.y, edge.x).normalize_or_zero()
    })
}

pub fn get_axes(poly: &[Vec2]) -> Vec<Vec2> {
    //! Returns the unit normal of every edge `poly[i] -> poly[i + 1]`, wrapping at the end.
    //! Zero-length edges yield `Vec2::ZERO`.
    edge_normals(poly).collect()
}

#[inline]
pub fn project(poly: &[Vec2], axis: Vec2) -> (Fp, Fp) {
    //! Returns the `(min, max)` scalar projection of `poly` onto `axis`.
    poly.iter().fold((Fp::MAX, Fp::MIN), |(min, max), v| {
        let d = v.dot(axis);
        (min.min(d), max.max(d))
    })
}

pub fn polygons_mtv(a: &[Vec2], b: &[Vec2]) -> Option<Vec2> {
    //! Separating axis test over both polygons' edge normals. Returns the MTV that pushes `a`
    //! away from `b`'s centroid, or `None` if a separating axis exists or either polygon has
    //! fewer than three vertices.
    if a.len() < 3 || b.len() < 3 {
        return None;
    }

    let mut overlap = Fp::MAX;
    let mut axis = Vec2::ZERO;
    for n in edge_normals(a).chain(edge_normals(b)) {
        if n == Vec2::ZERO {
            continue;
        }
        let (amin, amax) = project(a, n);
        let (bmin, bmax) = project(b, n);
        let o = amax.min(bmax) - amin.max(bmin);
        if o <= 0.0 {
            return None; // separating axis found
        }
        if o < overlap {
            overlap = o;
            axis = n;
        }
    }
    if axis == Vec2::ZERO {
        return None; // fully degenerate input
    }

    if (centroid(a) - centroid(b)).dot(axis) < 0.0 {
        axis = -axis;
    }
    Some(axis * overlap)
}

pub fn aabb_mtv(a: &Aabb, b: &Aabb) -> Option<Vec2> {
    //! Edge-to-edge penetration along x and y; the shallower axis wins, ties go to y.
    let left = a.max.x - b.min.x; // push a toward -x
    let right = b.max.x - a.min.x; // push a toward +x
    let up = a.max.y - b.min.y; // push a toward -y
    let down = b.max.y - a.min.y; // push a toward +y
    if left <= 0.0 || right <= 0.0 || up <= 0.0 || down <= 0.0 {
        return None;
    }

    let dx = if left < right { -left } else { right };
    let dy = if up < down { -up } else { down };
    if dx.abs() < dy.abs() {
        Some(Vec2::new(dx, 0.0))
    } else {
        Some(Vec2::new(0.0, dy))
    }
}

// ---------- Circles ---------- //

pub fn circle_aabb_mtv(circle: &Circle, aabb: &Aabb) -> Option<Vec2> {
    //! Clamped-rect closest point. A centre inside the box is pushed out through the nearest side.
    let closest = circle.pos.clamp(aabb.min, aabb.max);
    let d = circle.pos - closest;
    let dist2 = d.length_squared();
    if dist2 > 0.0 {
        if dist2 >= circle.rad * circle.rad {
            return None;
        }
        let dist = dist2.sqrt();
        return Some(d / dist * (circle.rad - dist));
    }

    let p = circle.pos;
    let sides = [
        (p.x - aabb.min.x, Vec2::new(-1.0, 0.0)),
        (aabb.max.x - p.x, Vec2::new(1.0, 0.0)),
        (p.y - aabb.min.y, Vec2::new(0.0, -1.0)),
        (aabb.max.y - p.y, Vec2::new(0.0, 1.0)),
    ];
    let (depth, dir) = sides
        .into_iter()
        .fold((Fp::MAX, Vec2::ZERO), |best, side| if side.0 < best.0 { side } else { best });
    Some(dir * (depth + circle.rad))
}

pub fn circle_poly_mtv(circle: &Circle, poly: &[Vec2]) -> Option<Vec2> {
    //! Closest point on the polygon outline; centres inside the polygon are pushed out through
    //! the nearest edge. Polygons with fewer than three vertices never collide.
    let len = poly.len();
    if len < 3 {
        return None;
    }

    let mut closest = poly[0];
    let mut best = Fp::MAX;
    let mut edge = 0;
    for i in 0..len {
        let q = closest_point_on_segment(circle.pos, poly[i], poly[(i + 1) % len]);
        let d2 = (circle.pos - q).length_squared();
        if d2 < best {
            best = d2;
            closest = q;
            edge = i;
        }
    }

    let dist = best.sqrt();
    if dist > 0.0 && !point_in_polygon(circle.pos, poly) {
        if dist >= circle.rad {
            return None;
        }
        return Some((circle.pos - closest) / dist * (circle.rad - dist));
    }

    // centre inside, or exactly on the outline
    let e = poly[(edge + 1) % len] - poly[edge];
    let mut n = Vec2::new(-e.y, e.x).normalize_or_zero();
    if n.dot(closest - centroid(poly)) < 0.0 {
        n = -n;
    }
    Some(n * (dist + circle.rad))
}

pub fn circle_circle_mtv(a: &Circle, b: &Circle) -> Option<Vec2> {
    let d = a.pos - b.pos;
    let srad = a.rad + b.rad;
    let dist2 = d.length_squared();
    if dist2 >= srad * srad {
        return None;
    }
    let dist = dist2.sqrt();
    let dir = if dist > 0.0 { d / dist } else { Vec2::new(0.0, -1.0) };
    Some(dir * (srad - dist))
}

// ---------- Transform ---------- //

pub fn world_vertices(local: &[Vec2], pos: Vec2, size: Vec2, angle: Fp) -> Vec<Vec2> {
    //! Translates `local` vertices by `pos`, rotating about the box centre `size / 2` first
    //! when `angle` is nonzero.
    if angle == 0.0 {
        return local.iter().map(|v| pos + *v).collect();
    }
    let centre = size * 0.5;
    let rot = Vec2::from_angle(angle);
    local.iter().map(|v| pos + centre + rot.rotate(*v - centre)).collect()
}
