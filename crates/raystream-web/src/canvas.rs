use glam::Vec2;
use raystream_core::{Hsla, Painter};
use wasm_bindgen::JsCast;
use web_sys as web;

/// `Painter` backed by a 2D canvas context.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// `None` when the canvas cannot provide a 2D context (e.g. already bound to WebGL).
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => obj,
            Ok(None) => {
                log::warn!("[canvas] 2d context unavailable; rays will not be drawn");
                return None;
            }
            Err(e) => {
                log::warn!("[canvas] getContext('2d') error: {:?}", e);
                return None;
            }
        };
        ctx.dyn_into::<web::CanvasRenderingContext2d>()
            .ok()
            .map(|ctx| Self { ctx })
    }
}

impl Painter for CanvasPainter {
    fn fill_overlay(&mut self, width: f32, height: f32, alpha: f32) {
        self.ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", alpha));
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Hsla) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}
