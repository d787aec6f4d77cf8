//! Node layout geometry shared by the graph core and the editor.
//!
//! Everything is derived from a node's `(position, size)` rectangle, so the
//! rects can be recomputed on every layout pass instead of being stored.

use egui::{Pos2, Rect, Vec2};

/// Side length of the square port hit regions.
pub const PORT_SIZE: f32 = 15.0;

/// Height of the title strip at the top of a node.
pub const TITLE_BAR_HEIGHT: f32 = 20.0;

pub const MIN_NODE_WIDTH: f32 = 80.0;

/// Smallest height for which the vertically-centered port squares stay
/// clear of the title strip.
pub const MIN_NODE_HEIGHT: f32 = 2.0 * TITLE_BAR_HEIGHT + PORT_SIZE;

pub const DEFAULT_NODE_SIZE: Vec2 = Vec2::new(150.0, 60.0);

pub fn clamp_size(size: Vec2) -> Vec2 {
    Vec2::new(size.x.max(MIN_NODE_WIDTH), size.y.max(MIN_NODE_HEIGHT))
}

pub fn node_rect(position: Pos2, size: Vec2) -> Rect {
    Rect::from_min_size(position, size)
}

pub fn title_rect(rect: Rect) -> Rect {
    Rect::from_min_size(rect.min, Vec2::new(rect.width(), TITLE_BAR_HEIGHT))
}

/// Port square centered on the midpoint of the node's left edge.
pub fn input_port_rect(rect: Rect) -> Rect {
    Rect::from_center_size(rect.left_center(), Vec2::splat(PORT_SIZE))
}

/// Port square centered on the midpoint of the node's right edge.
pub fn output_port_rect(rect: Rect) -> Rect {
    Rect::from_center_size(rect.right_center(), Vec2::splat(PORT_SIZE))
}

/// Inset area below the title strip where a node kind draws its widgets.
pub fn body_content_rect(rect: Rect) -> Rect {
    Rect::from_min_max(
        rect.min + Vec2::new(PORT_SIZE, TITLE_BAR_HEIGHT + 4.0),
        rect.max - Vec2::new(PORT_SIZE, 4.0),
    )
}
