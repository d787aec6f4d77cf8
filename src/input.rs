//! Pointer event contract between the editor shell and the graph core.
//!
//! The shell translates raw egui input into at most one `PointerEvent` per
//! frame and hands it to [`Graph::update`](crate::graph::Graph::update).
//! Positions are in canvas space (pan already removed), so the core can be
//! driven directly in tests without a rendering surface.

use egui::{Pos2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { pos: Pos2, button: PointerButton },
    Move { pos: Pos2, delta: Vec2 },
    Up { pos: Pos2 },
}
