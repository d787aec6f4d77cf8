//! Graph vertex and its per-node interaction state machine.
//!
//! A node never inspects or mutates other nodes: dragging translates its own
//! position, and wiring gestures surface as a [`WireRelease`] signal that
//! the graph controller resolves against the rest of the collection.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry;
use crate::input::{PointerButton, PointerEvent};
use crate::node_kind::NodeKind;

/// Stable node identity, valid until the node is removed from the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Interaction state for one pointer-down/up cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingBody,
    WiringFromInput,
    WiringFromOutput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortKind {
    Input,
    Output,
}

/// Emitted on pointer-up when a wiring gesture ends; carries the release
/// point the controller hit-tests against other nodes' ports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireRelease {
    pub port: PortKind,
    pub pos: Pos2,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub kind: NodeKind,
    pub position: Pos2,
    pub size: Vec2,
    pub predecessor: Option<NodeId>,
    pub successor: Option<NodeId>,
    #[serde(skip)]
    state: DragState,
}

impl Node {
    pub fn new(kind: NodeKind, position: Pos2, size: Vec2) -> Self {
        Self {
            id: NodeId::new(),
            title: kind.label().to_string(),
            kind,
            position,
            size: geometry::clamp_size(size),
            predecessor: None,
            successor: None,
            state: DragState::Idle,
        }
    }

    pub fn rect(&self) -> Rect {
        geometry::node_rect(self.position, self.size)
    }

    pub fn input_port(&self) -> Rect {
        geometry::input_port_rect(self.rect())
    }

    pub fn output_port(&self) -> Rect {
        geometry::output_port_rect(self.rect())
    }

    /// Anchor point for wires entering this node.
    pub fn input_anchor(&self) -> Pos2 {
        self.input_port().center()
    }

    /// Anchor point for wires leaving this node.
    pub fn output_anchor(&self) -> Pos2 {
        self.output_port().center()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Advance the interaction state machine by one pointer event.
    ///
    /// Pointer-down tests the body rect first, then the input port, then the
    /// output port; the first containing rect decides the state. Pointer-up
    /// returns to `Idle` and yields at most one release signal.
    pub fn handle_event(&mut self, event: &PointerEvent) -> Option<WireRelease> {
        match *event {
            PointerEvent::Down {
                pos,
                button: PointerButton::Primary,
            } => {
                self.state = if self.rect().contains(pos) {
                    DragState::DraggingBody
                } else if self.input_port().contains(pos) {
                    DragState::WiringFromInput
                } else if self.output_port().contains(pos) {
                    DragState::WiringFromOutput
                } else {
                    DragState::Idle
                };
                None
            }
            PointerEvent::Down { .. } => None,
            PointerEvent::Move { delta, .. } => {
                // Wiring moves are a rendering concern only.
                if self.state == DragState::DraggingBody {
                    self.position += delta;
                }
                None
            }
            PointerEvent::Up { pos } => match std::mem::take(&mut self.state) {
                DragState::WiringFromInput => Some(WireRelease {
                    port: PortKind::Input,
                    pos,
                }),
                DragState::WiringFromOutput => Some(WireRelease {
                    port: PortKind::Output,
                    pos,
                }),
                DragState::Idle | DragState::DraggingBody => None,
            },
        }
    }
}
