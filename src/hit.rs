//! Pointer hit testing against scrolled, wrapped segments.

use crate::store::Segment;

/// Horizontal tile multipliers; each segment is drawn at `k * width`.
pub const TILES: [f64; 3] = [-1.0, 0.0, 1.0];

/// A segment under the pointer, with the pointer mapped back into the
/// segment's logical (unscrolled) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub logical_x: f64,
    pub logical_y: f64,
}

/// First segment, in store order, any of whose wrapped copies contains
/// `(x, y)`. Points above `reserved_top` never hit.
pub fn hit_test(segments: &[Segment], width: f64, x: f64, y: f64, reserved_top: f64) -> Option<Hit> {
    if y < reserved_top || !x.is_finite() || !y.is_finite() {
        return None;
    }
    segments.iter().enumerate().find_map(|(index, seg)| {
        TILES.iter().find_map(|k| {
            let logical_x = x - (seg.x_offset + k * width);
            seg.contains(logical_x, y).then_some(Hit {
                index,
                logical_x,
                logical_y: y,
            })
        })
    })
}
