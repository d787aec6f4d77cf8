//! Wire rendering between node ports.
//!
//! A wire is a cubic bezier whose control points sit a fixed horizontal
//! distance from each anchor, pointing away from it. The curve keeps its
//! S shape even when the destination is left of the source.

use egui::epaint::CubicBezierShape;
use egui::{Color32, Painter, Pos2, Stroke};

/// Horizontal offset of each control point from its anchor.
pub const CONTROL_OFFSET: f32 = 100.0;

const STROKE_WIDTH: f32 = 2.0;
const GRADIENT_STEPS: usize = 40;

/// Control points for the wire from `from` (an output anchor) to `to`
/// (an input anchor).
pub fn control_points(from: Pos2, to: Pos2) -> (Pos2, Pos2) {
    (
        Pos2::new(from.x + CONTROL_OFFSET, from.y),
        Pos2::new(to.x - CONTROL_OFFSET, to.y),
    )
}

/// Evaluate the wire curve at `t` in `[0, 1]`.
pub fn point_at(from: Pos2, to: Pos2, t: f32) -> Pos2 {
    let (c1, c2) = control_points(from, to);
    let t_inv = 1.0 - t;
    (t_inv.powi(3) * from.to_vec2()
        + 3.0 * t_inv.powi(2) * t * c1.to_vec2()
        + 3.0 * t_inv * t.powi(2) * c2.to_vec2()
        + t.powi(3) * to.to_vec2())
    .to_pos2()
}

pub fn draw_wire(painter: &Painter, from: Pos2, to: Pos2, from_color: Color32, to_color: Color32) {
    if from_color == to_color {
        let (c1, c2) = control_points(from, to);
        painter.add(CubicBezierShape::from_points_stroke(
            [from, c1, c2, to],
            false,
            Color32::TRANSPARENT,
            Stroke::new(STROKE_WIDTH, from_color),
        ));
    } else {
        // Gradient approximation with line segments.
        let mut prev = from;
        for i in 1..=GRADIENT_STEPS {
            let t = i as f32 / GRADIENT_STEPS as f32;
            let p = point_at(from, to, t);
            painter.line_segment([prev, p], Stroke::new(STROKE_WIDTH, lerp_color(from_color, to_color, t)));
            prev = p;
        }
    }
}

fn lerp_color(c1: Color32, c2: Color32, t: f32) -> Color32 {
    let r = (c1.r() as f32 * (1.0 - t) + c2.r() as f32 * t) as u8;
    let g = (c1.g() as f32 * (1.0 - t) + c2.g() as f32 * t) as u8;
    let b = (c1.b() as f32 * (1.0 - t) + c2.b() as f32 * t) as u8;
    let a = (c1.a() as f32 * (1.0 - t) + c2.a() as f32 * t) as u8;
    Color32::from_rgba_premultiplied(r, g, b, a)
}
