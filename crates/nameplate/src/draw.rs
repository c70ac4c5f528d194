//! Draw-command emission onto an abstract drawing surface.

use crate::pipeline::{HealthBarDrawCommand, LabelDrawCommand, Nameplate, NameplateHud};
use engine_core::Vec2;

/// Screen-space rectangle, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Text measurement collaborator. `None` means the font resource is
/// unavailable, which skips the shape rather than crashing.
pub trait FontMetrics {
    fn string_width(&self, text: &str) -> Option<f32>;
    fn line_height(&self) -> Option<f32>;
}

/// Opaque drawing surface the overlay is emitted to. Implementations range
/// from GPU quad batchers to the demo's character grid.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: [f32; 4]);
    fn stroke_rect(&mut self, rect: Rect, color: [f32; 4]);
    fn draw_text(&mut self, position: Vec2, text: &str, color: [f32; 4]);
}

fn with_alpha(mut color: [f32; 4], alpha: f32) -> [f32; 4] {
    color[3] = alpha;
    color
}

impl NameplateHud {
    /// Draw one frame's plates. Order is fixed: background fill first,
    /// then every plate's label and bar, the overlay border last.
    pub fn render(&self, surface: &mut dyn DrawSurface, bounds: Rect, plates: &[Nameplate]) {
        if self.config.show_fill {
            surface.fill_rect(bounds, self.config.fill_color);
        }

        for plate in plates {
            self.draw_label(surface, &plate.label);
            self.draw_bar(surface, &plate.bar);
        }

        if self.config.show_frame {
            surface.stroke_rect(bounds, self.config.frame_color);
        }
    }

    fn draw_label(&self, surface: &mut dyn DrawSurface, label: &LabelDrawCommand) {
        let color = with_alpha(self.config.text_color, label.opacity);
        surface.draw_text(label.screen_position, &label.text, color);
    }

    fn draw_bar(&self, surface: &mut dyn DrawSurface, bar: &HealthBarDrawCommand) {
        let (w, h) = self.config.bar_size;
        let frame = Rect::new(bar.screen_position.x, bar.screen_position.y, w, h);
        surface.stroke_rect(frame, with_alpha(self.config.bar_frame_color, bar.opacity));

        // Fill sits one unit inside the frame, scaled by remaining health.
        // A one-unit sliver reads as empty, so it is widened to two.
        let mut fill_w = ((w - 2.0) * bar.health_fraction).floor();
        if fill_w == 1.0 {
            fill_w = 2.0;
        }
        if fill_w > 0.0 {
            surface.fill_rect(
                Rect::new(frame.x + 1.0, frame.y + 1.0, fill_w, h - 2.0),
                with_alpha(self.config.bar_fill_color, bar.opacity),
            );
        }
    }
}
