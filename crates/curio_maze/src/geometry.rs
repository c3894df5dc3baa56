//! 2D vector math and ray casting against wall cells.
//!
//! Wall cells are unit squares centered on their integer grid coordinates,
//! matching the simulator's round-to-nearest-cell collision rule. A ray cast
//! decomposes each wall into its four boundary edges and takes the nearest
//! parametric segment intersection over all of them.

use serde::{Deserialize, Serialize};

/// Determinant magnitude below which two directions count as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// A 2D point or direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(&self, other: Vec2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Intersection of segments `p1->p2` and `p3->p4`, if any.
///
/// Parametric form with a determinant test: parallel (or degenerate)
/// segments yield `None` rather than an error, and both parameters must lie
/// in [0, 1] for the crossing to count.
#[must_use]
pub fn segment_intersection(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    let d1 = Vec2::new(p2.x - p1.x, p2.y - p1.y);
    let d2 = Vec2::new(p4.x - p3.x, p4.y - p3.y);

    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let ox = p3.x - p1.x;
    let oy = p3.y - p1.y;
    let t = (ox * d2.y - oy * d2.x) / denom;
    let u = (ox * d1.y - oy * d1.x) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Vec2::new(p1.x + t * d1.x, p1.y + t * d1.y))
    } else {
        None
    }
}

/// The four boundary edges of the unit wall cell centered at `(cx, cy)`.
#[must_use]
pub fn wall_edges(cx: i64, cy: i64) -> [(Vec2, Vec2); 4] {
    let x0 = cx as f64 - 0.5;
    let x1 = cx as f64 + 0.5;
    let y0 = cy as f64 - 0.5;
    let y1 = cy as f64 + 0.5;
    [
        (Vec2::new(x0, y0), Vec2::new(x1, y0)),
        (Vec2::new(x1, y0), Vec2::new(x1, y1)),
        (Vec2::new(x1, y1), Vec2::new(x0, y1)),
        (Vec2::new(x0, y1), Vec2::new(x0, y0)),
    ]
}

/// Distance from `origin` along `angle` (radians, absolute) to the nearest
/// wall edge, capped at `max_range`. Returns `max_range` when nothing is hit.
#[must_use]
pub fn raycast<'a, W>(origin: Vec2, angle: f64, max_range: f64, walls: W) -> f64
where
    W: IntoIterator<Item = &'a (i64, i64)>,
{
    let tip = Vec2::new(
        origin.x + angle.cos() * max_range,
        origin.y + angle.sin() * max_range,
    );

    let mut nearest = max_range;
    for &(cx, cy) in walls {
        for (a, b) in wall_edges(cx, cy) {
            if let Some(hit) = segment_intersection(origin, tip, a, b) {
                let d = origin.distance(hit);
                if d < nearest {
                    nearest = d;
                }
            }
        }
    }
    nearest
}
