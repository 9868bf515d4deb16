//! Drawing surface abstraction.
//!
//! The simulation only needs four primitives, so it draws through this trait
//! rather than straight onto a canvas context. The browser implementation
//! wraps `CanvasRenderingContext2d`.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::Color;
use crate::error::SetupError;

/// Minimal 2D drawing capability consumed by the particle field.
pub trait Surface {
	/// Resize the backing store to the given viewport.
	fn set_size(&mut self, width: f64, height: f64);
	/// Erase the region from the origin to `width` x `height`.
	fn clear(&mut self, width: f64, height: f64);
	/// Draw a filled circle centered on `(x, y)`.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
}

/// Acquire the 2D context of `canvas`.
pub fn canvas_surface(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SetupError> {
	canvas
		.get_context("2d")
		.map_err(|e| SetupError::SurfaceUnavailable(format!("{:?}", e)))?
		.ok_or_else(|| SetupError::SurfaceUnavailable("no 2d context".into()))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| SetupError::SurfaceUnavailable("context is not 2d".into()))
}

impl Surface for CanvasRenderingContext2d {
	fn set_size(&mut self, width: f64, height: f64) {
		if let Some(canvas) = self.canvas() {
			canvas.set_width(width as u32);
			canvas.set_height(height as u32);
		}
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}
