use web_sys::CanvasRenderingContext2d;

use crate::render::{GradientRect, Surface};

/// Paints frames onto a 2D canvas context.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.set_fill_style_str("#000");
        self.ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn fill_gradient(&mut self, rect: &GradientRect) {
        let grad = self
            .ctx
            .create_linear_gradient(rect.x, rect.y, rect.x + rect.w, rect.y);
        let stops = grad
            .add_color_stop(0.0, &rect.from.css(rect.opacity))
            .and_then(|_| grad.add_color_stop(1.0, &rect.to.css(rect.opacity)));
        if let Err(err) = stops {
            log::warn!("gradient stop rejected: {err:?}");
            return;
        }

        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.w, rect.h);
        self.ctx.close_path();
        self.ctx.clip();
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
        self.ctx.restore();
    }
}
