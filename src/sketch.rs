//! The controller that owns all sketch state.

use crate::config::SketchConfig;
use crate::hit::hit_test;
use crate::random::RandomSource;
use crate::render::{draw_frame, Surface};
use crate::store::{SegmentStore, SplitAxis};

/// Keyboard command recognised by [`Sketch::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Reset,
    Export,
}

/// Canvas size, segment store, configuration and randomness for one
/// running sketch. Every input (frames, clicks, resizes) goes through here.
pub struct Sketch {
    width: f64,
    height: f64,
    config: SketchConfig,
    store: SegmentStore,
    rng: Box<dyn RandomSource>,
}

impl Sketch {
    pub fn new(width: f64, height: f64, config: SketchConfig, mut rng: Box<dyn RandomSource>) -> Self {
        let store = SegmentStore::new(width, height, rng.as_mut());
        Self {
            width,
            height,
            config,
            store,
            rng,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    /// Advance the animation one frame and paint it.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.store.tick(self.width);
        draw_frame(surface, self.store.segments(), self.width, self.height);
    }

    /// Paint the current state without advancing it.
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_frame(surface, self.store.segments(), self.width, self.height);
    }

    /// Split whatever segment is under the pointer. Returns `true` if the
    /// store changed.
    pub fn click(&mut self, x: f64, y: f64) -> bool {
        let Some(hit) = hit_test(self.store.segments(), self.width, x, y, self.config.reserved_top) else {
            log::trace!("click at ({x}, {y}) hit nothing");
            return false;
        };
        match self.store.split(hit.index, hit.logical_x, hit.logical_y, self.config.split, self.rng.as_mut()) {
            Some(axis) => {
                log::debug!(
                    "split segment {} {} at ({:.1}, {:.1}); {} segments",
                    hit.index,
                    match axis {
                        SplitAxis::Vertical => "vertically",
                        SplitAxis::Horizontal => "horizontally",
                    },
                    hit.logical_x,
                    hit.logical_y,
                    self.store.len()
                );
                true
            }
            None => false,
        }
    }

    /// Map a `KeyboardEvent.key` onto a command, case-insensitively.
    pub fn key_action(&self, key: &str) -> Option<KeyAction> {
        if key.eq_ignore_ascii_case(&self.config.reset_key) {
            Some(KeyAction::Reset)
        } else if key.eq_ignore_ascii_case(&self.config.export_key) {
            Some(KeyAction::Export)
        } else {
            None
        }
    }

    /// Apply a key press. Resets happen here; an `Export` result is left to
    /// the caller, which owns the pixels.
    pub fn handle_key(&mut self, key: &str) -> Option<KeyAction> {
        let action = self.key_action(key)?;
        if action == KeyAction::Reset {
            self.reset();
        }
        Some(action)
    }

    /// Adopt a new canvas size and start over.
    pub fn resize(&mut self, width: f64, height: f64) {
        log::info!("canvas resized to {width}x{height}");
        self.width = width;
        self.height = height;
        self.reset();
    }

    /// Back to a single full-canvas segment.
    pub fn reset(&mut self) {
        self.store.reset(self.width, self.height, self.rng.as_mut());
        log::info!("sketch reset");
    }
}
