//! Per-frame drawing: three wrapped gradient copies for every segment.

use crate::hit::TILES;
use crate::store::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    White,
    Black,
}

impl Shade {
    /// Channel value for an RGB grey.
    pub fn level(self) -> u8 {
        match self {
            Shade::White => 255,
            Shade::Black => 0,
        }
    }

    /// CSS colour with the given alpha.
    pub fn css(self, opacity: f64) -> String {
        let v = self.level();
        format!("rgba({v},{v},{v},{opacity})")
    }
}

/// A rectangle filled with a horizontal linear gradient running from `x`
/// (colour `from`) to `x + w` (colour `to`), at a uniform opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub from: Shade,
    pub to: Shade,
    pub opacity: f64,
}

/// Anything a frame can be painted onto.
pub trait Surface {
    /// Fill the whole `width x height` area with opaque black.
    fn clear(&mut self, width: f64, height: f64);

    /// Paint one gradient rectangle, clipped to its own bounds.
    fn fill_gradient(&mut self, rect: &GradientRect);
}

/// Gradient direction for a segment: `use_white` runs white to black.
pub fn shades(seg: &Segment) -> (Shade, Shade) {
    if seg.use_white {
        (Shade::White, Shade::Black)
    } else {
        (Shade::Black, Shade::White)
    }
}

/// Every rectangle of a frame, in paint order.
pub fn frame_rects(segments: &[Segment], width: f64) -> impl Iterator<Item = GradientRect> + '_ {
    segments.iter().flat_map(move |seg| {
        let (from, to) = shades(seg);
        TILES.iter().map(move |k| GradientRect {
            x: seg.left + seg.x_offset + k * width,
            y: seg.top,
            w: seg.width(),
            h: seg.height(),
            from,
            to,
            opacity: seg.opacity,
        })
    })
}

pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, segments: &[Segment], width: f64, height: f64) {
    surface.clear(width, height);
    for rect in frame_rects(segments, width) {
        surface.fill_gradient(&rect);
    }
}
