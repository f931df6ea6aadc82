#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Click-to-subdivide canvas of scrolling gradients.
//!
//! The model (store, hit testing, rendering) is plain Rust and builds on any
//! target; the browser shell is only compiled for wasm32.

pub mod config;
pub mod error;
pub mod hit;
pub mod random;
pub mod raster;
pub mod render;
pub mod sketch;
pub mod store;

pub use config::{AxisPolicy, OpacityPolicy, SketchConfig, SpeedPolicy, SplitConfig};
pub use error::{Result, SketchError};
pub use random::{RandomSource, SeededRandom};
pub use render::{GradientRect, Shade, Surface};
pub use sketch::{KeyAction, Sketch};
pub use store::{Segment, SegmentStore, SplitAxis};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::SketchConfig;

    mod console;
    mod render;
    mod surface;

    pub use render::export_png;
    pub use surface::CanvasSurface;

    const CANVAS_ID: &str = "c";
    const CONFIG_ID: &str = "sketch-config";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console::init(log::LevelFilter::Info);
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(CANVAS_ID) else {
            log::warn!("no #{CANVAS_ID} canvas on the page; call mount() to start");
            return Ok(());
        };
        let canvas = element.dyn_into::<web_sys::HtmlCanvasElement>()?;

        render::start(canvas, page_config(&document))?;
        Ok(())
    }

    /// Start the sketch on an arbitrary canvas. `config` is a TOML document;
    /// `None` reads the page's `<script id="sketch-config">` block instead.
    #[wasm_bindgen]
    pub fn mount(canvas: web_sys::HtmlCanvasElement, config: Option<String>) -> Result<(), JsValue> {
        console::init(log::LevelFilter::Info);
        let config = match config {
            Some(text) => SketchConfig::from_toml_str(&text)?,
            None => {
                let document = web_sys::window()
                    .and_then(|w| w.document())
                    .ok_or("no document")?;
                page_config(&document)
            }
        };
        render::start(canvas, config)
    }

    /// Configuration embedded in the page, or defaults.
    fn page_config(document: &web_sys::Document) -> SketchConfig {
        let Some(text) = document
            .get_element_by_id(CONFIG_ID)
            .and_then(|el| el.text_content())
        else {
            return SketchConfig::default();
        };
        SketchConfig::from_toml_str(&text).unwrap_or_else(|err| {
            log::warn!("{err}; using default configuration");
            SketchConfig::default()
        })
    }
}
