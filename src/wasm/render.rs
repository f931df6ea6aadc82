use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, KeyboardEvent, MouseEvent,
};

use super::surface::CanvasSurface;
use crate::config::SketchConfig;
use crate::random::SeededRandom;
use crate::sketch::{KeyAction, Sketch};

/// Size the canvas to the window and return the new size.
fn fit_to_window(canvas: &HtmlCanvasElement) -> Result<(u32, u32), JsValue> {
    let win = window().ok_or("no window")?;
    let w = win.inner_width()?.as_f64().unwrap_or(0.0).max(1.0) as u32;
    let h = win.inner_height()?.as_f64().unwrap_or(0.0).max(1.0) as u32;
    canvas.set_width(w);
    canvas.set_height(h);
    Ok((w, h))
}

/// Download the canvas contents as `{name}.png`.
pub fn export_png(canvas: &HtmlCanvasElement, name: &str) -> Result<(), JsValue> {
    let url = canvas.to_data_url_with_type("image/png")?;
    let document = window().and_then(|w| w.document()).ok_or("no document")?;
    let anchor = document.create_element("a")?.dyn_into::<HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(&format!("{name}.png"));
    anchor.click();
    log::info!("exported {name}.png");
    Ok(())
}

/// Start the sketch: resize, click and key handlers plus the animation loop.
pub fn start(canvas: HtmlCanvasElement, config: SketchConfig) -> Result<(), JsValue> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2D canvas not supported")?
        .dyn_into()?;

    let (w, h) = fit_to_window(&canvas)?;
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
    log::info!("starting {w}x{h} sketch, seed {seed}");
    let sketch = Rc::new(RefCell::new(Sketch::new(
        w as f64,
        h as f64,
        config,
        Box::new(SeededRandom::new(seed)),
    )));
    let win = window().ok_or("no window")?;

    // Resize canvas to fit window; the old subdivision no longer fits.
    let resize_closure = {
        let canvas = canvas.clone();
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move || match fit_to_window(&canvas) {
            Ok((w, h)) => sketch.borrow_mut().resize(w as f64, h as f64),
            Err(err) => log::warn!("resize failed: {err:?}"),
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // offsetX/Y are already relative to the canvas.
    let click_closure = {
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            sketch.borrow_mut().click(e.offset_x() as f64, e.offset_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref())?;
    click_closure.forget();

    let key_closure = {
        let canvas = canvas.clone();
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let action = sketch.borrow_mut().handle_key(&e.key());
            if action == Some(KeyAction::Export) {
                let name = sketch.borrow().config().export_name.clone();
                if let Err(err) = export_png(&canvas, &name) {
                    log::warn!("export failed: {err:?}");
                }
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    win.add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref())?;
    key_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut surface = CanvasSurface::new(ctx);
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        sketch.borrow_mut().frame(&mut surface);

        // schedule next
        let scheduled = match (window(), f.borrow().as_ref()) {
            (Some(win), Some(cb)) => win.request_animation_frame(cb.as_ref().unchecked_ref()).map(|_| ()),
            _ => Err(JsValue::from_str("animation loop lost its window")),
        };
        if let Err(err) = scheduled {
            log::error!("animation stopped: {err:?}");
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = g.borrow().as_ref() {
        win.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }

    Ok(())
}
