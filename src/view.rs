use egui::{Pos2, Rect, Vec2};

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 40.0;

/// Zoom and pan of the canvas inside its viewport.
///
/// `screen = viewport_origin + pan + canvas * zoom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    zoom: f32,
    pan: Vec2,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
        }
    }
}

impl CanvasView {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn to_screen(&self, canvas: Pos2, origin: Pos2) -> Pos2 {
        origin + self.pan + canvas.to_vec2() * self.zoom
    }

    pub fn to_canvas(&self, screen: Pos2, origin: Pos2) -> Pos2 {
        ((screen - origin - self.pan) / self.zoom).to_pos2()
    }

    /// Hand-drag by a screen-space delta
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiplies the zoom while keeping the canvas point under `anchor` fixed
    pub fn zoom_by(&mut self, factor: f32, anchor: Pos2, origin: Pos2) {
        let before = self.to_canvas(anchor, origin);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = anchor - origin - before.to_vec2() * self.zoom;
    }

    /// Zoom-in action: one wheel notch amplified by half
    pub fn zoom_in(&mut self, base: f32, viewport: Rect) {
        self.zoom_by(base * 1.5, viewport.center(), viewport.min);
    }

    pub fn zoom_out(&mut self, base: f32, viewport: Rect) {
        self.zoom_by(1.0 / (base * 1.5), viewport.center(), viewport.min);
    }

    /// Back to 1:1, centred on `content` when there is any
    pub fn reset(&mut self, content: Option<Rect>, viewport: Rect) {
        *self = Self::default();
        if let Some(content) = content {
            self.center_on(content, viewport);
        }
    }

    /// Pans so that the center of `content` (canvas) sits at the viewport center
    pub fn center_on(&mut self, content: Rect, viewport: Rect) {
        self.pan = viewport.size() / 2.0 - content.center().to_vec2() * self.zoom;
    }
}
