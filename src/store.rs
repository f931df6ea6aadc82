//! The segment store: an ordered list of rectangles that tile the canvas.

use crate::config::{AxisPolicy, OpacityPolicy, SpeedPolicy, SplitConfig};
use crate::random::RandomSource;

/// Speed range for the initial full-canvas segment, in px/frame.
pub const INITIAL_SPEED: f64 = 1.5;
/// Speed range for segments produced by a split, in px/frame.
pub const SPLIT_SPEED: f64 = 2.5;
pub const MIN_OPACITY: f64 = 0.5;
pub const MAX_OPACITY: f64 = 1.0;

/// An axis-aligned rectangle with its own scroll and shading state.
///
/// Bounds are in canvas pixels and never change after creation; only
/// `x_offset` moves as the segment scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub x_offset: f64,
    pub speed: f64,
    pub use_white: bool,
    pub opacity: f64,
}

impl Segment {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn centre_x(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    pub fn centre_y(&self) -> f64 {
        self.top + self.height() / 2.0
    }

    /// Inclusive containment in logical (unscrolled) coordinates.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Same bounds, as a tuple `(top, bottom, left, right)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.top, self.bottom, self.left, self.right)
    }
}

/// Orientation of the line a split introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// A vertical line: children sit side by side.
    Vertical,
    /// A horizontal line: children are stacked.
    Horizontal,
}

#[derive(Debug, Clone, Default)]
pub struct SegmentStore {
    segments: Vec<Segment>,
}

impl SegmentStore {
    /// A store holding the single full-canvas segment.
    pub fn new(width: f64, height: f64, rng: &mut dyn RandomSource) -> Self {
        let mut store = Self::default();
        store.reset(width, height, rng);
        store
    }

    /// Discard every segment and start again from one covering the canvas.
    pub fn reset(&mut self, width: f64, height: f64, rng: &mut dyn RandomSource) {
        let speed = rng.uniform(-INITIAL_SPEED, INITIAL_SPEED);
        let opacity = rng.uniform(MIN_OPACITY, MAX_OPACITY);
        self.segments.clear();
        self.segments.push(Segment {
            top: 0.0,
            bottom: height,
            left: 0.0,
            right: width,
            x_offset: 0.0,
            speed,
            use_white: false,
            opacity,
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of segment areas; equals the canvas area while the store tiles it.
    pub fn covered_area(&self) -> f64 {
        self.segments.iter().map(Segment::area).sum()
    }

    /// Replace the segment at `index` with two children divided at the click.
    ///
    /// `click_x`/`click_y` are logical coordinates, i.e. with the segment's
    /// scroll already removed. Returns the axis used, or `None` when `index`
    /// is out of range.
    pub fn split(
        &mut self,
        index: usize,
        click_x: f64,
        click_y: f64,
        policy: SplitConfig,
        rng: &mut dyn RandomSource,
    ) -> Option<SplitAxis> {
        let parent = *self.segments.get(index)?;

        let axis = match policy.axis {
            AxisPolicy::Proximity => {
                let dx = (click_x - parent.centre_x()).abs();
                let dy = (click_y - parent.centre_y()).abs();
                if dx < dy {
                    SplitAxis::Vertical
                } else {
                    SplitAxis::Horizontal
                }
            }
            AxisPolicy::CoinFlip => {
                if rng.coin() {
                    SplitAxis::Vertical
                } else {
                    SplitAxis::Horizontal
                }
            }
        };

        let draw = rng.uniform(-SPLIT_SPEED, SPLIT_SPEED);
        let (first_speed, second_speed) = match policy.speed {
            SpeedPolicy::Mirror => (draw, -draw),
            SpeedPolicy::Diverge => (draw.abs(), -draw.abs()),
        };

        let child = Segment {
            use_white: !parent.use_white,
            ..parent
        };
        let (mut first, mut second) = (child, child);
        match axis {
            SplitAxis::Vertical => {
                let x = clamp_inside(click_x, parent.left, parent.right);
                first.right = x;
                second.left = x;
            }
            SplitAxis::Horizontal => {
                let y = clamp_inside(click_y, parent.top, parent.bottom);
                first.bottom = y;
                second.top = y;
            }
        }
        first.speed = first_speed;
        second.speed = second_speed;
        first.opacity = rng.uniform(MIN_OPACITY, MAX_OPACITY);
        second.opacity = match policy.opacity {
            OpacityPolicy::PerChild => rng.uniform(MIN_OPACITY, MAX_OPACITY),
            OpacityPolicy::Shared => first.opacity,
        };

        debug_assert!(
            (first.area() + second.area() - parent.area()).abs() <= 1e-6 * parent.area().max(1.0),
            "split children do not cover their parent"
        );
        self.segments.splice(index..=index, [first, second]);
        Some(axis)
    }

    /// Advance every segment by its speed and wrap back into `[-width, width]`.
    pub fn tick(&mut self, width: f64) {
        for seg in &mut self.segments {
            seg.x_offset = wrap_offset(seg.x_offset + seg.speed, width);
        }
    }
}

/// Keep a split line at least one pixel inside `(lo, hi)`. Extents too small
/// for that, or a non-finite click, split down the middle.
fn clamp_inside(value: f64, lo: f64, hi: f64) -> f64 {
    let (min, max) = (lo + 1.0, hi - 1.0);
    if min > max || !value.is_finite() {
        return lo + (hi - lo) / 2.0;
    }
    value.clamp(min, max)
}

fn wrap_offset(offset: f64, width: f64) -> f64 {
    if !(width > 0.0) || !offset.is_finite() {
        return 0.0;
    }
    if offset > width || offset < -width {
        offset % width
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};

    fn split_config(axis: AxisPolicy, speed: SpeedPolicy) -> SplitConfig {
        SplitConfig {
            axis,
            speed,
            opacity: OpacityPolicy::PerChild,
        }
    }

    #[test]
    fn reset_spans_canvas() {
        let mut rng = ScriptedRandom::new(vec![1.0, 0.0]);
        let store = SegmentStore::new(800.0, 600.0, &mut rng);
        assert_eq!(store.len(), 1);
        let seg = store.segments()[0];
        assert_eq!(seg.bounds(), (0.0, 600.0, 0.0, 800.0));
        assert_eq!(seg.x_offset, 0.0);
        assert_eq!(seg.speed, 1.5);
        assert_eq!(seg.opacity, 0.5);
        assert!(!seg.use_white);
    }

    #[test]
    fn reset_twice_discards_prior_splits() {
        let mut rng = SeededRandom::new(3);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        store.split(0, 100.0, 300.0, SplitConfig::default(), &mut rng);
        store.split(0, 50.0, 500.0, SplitConfig::default(), &mut rng);
        store.reset(640.0, 480.0, &mut rng);
        store.reset(640.0, 480.0, &mut rng);
        assert_eq!(store.len(), 1);
        assert_eq!(store.segments()[0].bounds(), (0.0, 480.0, 0.0, 640.0));
    }

    #[test]
    fn click_closer_to_vertical_centre_line_splits_vertically() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let axis = store.split(0, 400.0, 350.0, SplitConfig::default(), &mut rng);
        assert_eq!(axis, Some(SplitAxis::Vertical));
        assert_eq!(store.len(), 2);
        assert_eq!(store.segments()[0].bounds(), (0.0, 600.0, 0.0, 400.0));
        assert_eq!(store.segments()[1].bounds(), (0.0, 600.0, 400.0, 800.0));
    }

    #[test]
    fn click_closer_to_horizontal_centre_line_splits_horizontally() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let axis = store.split(0, 100.0, 250.0, SplitConfig::default(), &mut rng);
        assert_eq!(axis, Some(SplitAxis::Horizontal));
        assert_eq!(store.segments()[0].bounds(), (0.0, 250.0, 0.0, 800.0));
        assert_eq!(store.segments()[1].bounds(), (250.0, 600.0, 0.0, 800.0));
    }

    #[test]
    fn exact_centre_splits_horizontally() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let axis = store.split(0, 400.0, 300.0, SplitConfig::default(), &mut rng);
        assert_eq!(axis, Some(SplitAxis::Horizontal));
    }

    #[test]
    fn split_line_is_clamped_one_pixel_inside() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        // Top-left corner: dx = 400 > dy = 300 -> horizontal.
        store.split(0, 0.0, 0.0, SplitConfig::default(), &mut rng);
        assert_eq!(store.segments()[0].bottom, 1.0);
        assert_eq!(store.segments()[1].top, 1.0);
    }

    #[test]
    fn tiny_segment_splits_at_midpoint() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(1.0, 600.0, &mut rng);
        let axis = store.split(0, 0.9, 10.0, SplitConfig::default(), &mut rng);
        assert_eq!(axis, Some(SplitAxis::Vertical));
        assert_eq!(store.segments()[0].right, 0.5);
        assert_eq!(store.segments()[1].left, 0.5);
    }

    #[test]
    fn children_invert_shade_and_mirror_speed() {
        // speed draw 0.75 -> 1.25, opacities 0.0 -> 0.5 and 1.0 -> 1.0
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.75, 0.0, 1.0]);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        store.split(0, 400.0, 350.0, SplitConfig::default(), &mut rng);
        let [a, b] = [store.segments()[0], store.segments()[1]];
        assert!(a.use_white && b.use_white);
        assert_eq!(a.speed, 1.25);
        assert_eq!(b.speed, -1.25);
        assert_eq!(a.opacity, 0.5);
        assert_eq!(b.opacity, 1.0);
    }

    #[test]
    fn diverge_gives_first_child_positive_speed() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.0, 0.5, 0.5]);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let policy = split_config(AxisPolicy::Proximity, SpeedPolicy::Diverge);
        store.split(0, 400.0, 350.0, policy, &mut rng);
        assert_eq!(store.segments()[0].speed, 2.5);
        assert_eq!(store.segments()[1].speed, -2.5);
    }

    #[test]
    fn shared_opacity_is_drawn_once() {
        // reset (2 draws), speed, one opacity 0.2 -> 0.6, then 0.9 left unused
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.5, 0.2, 0.9]);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let policy = SplitConfig {
            opacity: OpacityPolicy::Shared,
            ..SplitConfig::default()
        };
        store.split(0, 400.0, 350.0, policy, &mut rng);
        assert_eq!(store.segments()[0].opacity, 0.6);
        assert_eq!(store.segments()[1].opacity, 0.6);
        assert_eq!(rng.uniform(0.0, 1.0), 0.9);
    }

    #[test]
    fn segment_contains_is_inclusive() {
        let mut rng = SeededRandom::new(1);
        let store = SegmentStore::new(80.0, 60.0, &mut rng);
        let seg = store.segments()[0];
        assert!(seg.contains(0.0, 0.0) && seg.contains(80.0, 60.0));
        assert!(!seg.contains(80.5, 30.0) && !seg.contains(40.0, -0.1));
    }

    #[test]
    fn coin_flip_ignores_click_position() {
        // reset (2 draws), coin 0.9 -> horizontal despite a vertical-favouring click
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.9, 0.5, 0.5, 0.5]);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let policy = split_config(AxisPolicy::CoinFlip, SpeedPolicy::Mirror);
        let axis = store.split(0, 400.0, 590.0, policy, &mut rng);
        assert_eq!(axis, Some(SplitAxis::Horizontal));
        assert_eq!(store.segments()[0].bottom, 590.0);
    }

    #[test]
    fn children_inherit_parent_offset_and_keep_order() {
        let mut rng = SeededRandom::new(5);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        store.split(0, 100.0, 100.0, SplitConfig::default(), &mut rng);
        store.tick(800.0);
        let before = store.segments().to_vec();
        store.split(1, 400.0, 500.0, SplitConfig::default(), &mut rng);
        assert_eq!(store.len(), 3);
        assert_eq!(store.segments()[0], before[0]);
        assert_eq!(store.segments()[1].x_offset, before[1].x_offset);
        assert_eq!(store.segments()[2].x_offset, before[1].x_offset);
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let mut rng = SeededRandom::new(1);
        let mut store = SegmentStore::new(800.0, 600.0, &mut rng);
        let before = store.segments().to_vec();
        assert_eq!(store.split(4, 10.0, 10.0, SplitConfig::default(), &mut rng), None);
        assert_eq!(store.segments(), &before[..]);
    }

    #[test]
    fn tick_advances_and_wraps() {
        let mut rng = ScriptedRandom::new(vec![1.0, 0.5]);
        let mut store = SegmentStore::new(10.0, 10.0, &mut rng);
        for _ in 0..6 {
            store.tick(10.0);
        }
        assert_eq!(store.segments()[0].x_offset, 9.0);
        store.tick(10.0);
        assert_eq!(store.segments()[0].x_offset, 10.5 % 10.0);
    }

    #[test]
    fn tick_stays_in_range_for_negative_speed() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5]);
        let mut store = SegmentStore::new(3.0, 3.0, &mut rng);
        for _ in 0..100 {
            store.tick(3.0);
            let x = store.segments()[0].x_offset;
            assert!((-3.0..=3.0).contains(&x), "offset {x}");
        }
    }

    #[test]
    fn wrap_reduces_large_offsets() {
        assert_eq!(wrap_offset(25.0, 10.0), 5.0);
        assert_eq!(wrap_offset(-25.0, 10.0), -5.0);
        assert_eq!(wrap_offset(10.0, 10.0), 10.0);
        assert_eq!(wrap_offset(7.0, 0.0), 0.0);
        assert_eq!(wrap_offset(f64::NAN, 10.0), 0.0);
    }
}
