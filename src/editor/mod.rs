//! Visual canvas for the chain editor.
//!
//! [`GraphEditor`] translates raw egui input into the pointer-event contract
//! the graph core consumes, then draws the result: wires first, nodes on
//! top, plus the in-progress wire while a port drag is underway. Node
//! creation and removal go through context menus.

pub mod style;
pub mod transform;
pub mod wire;

pub use style::EditorStyle;

use egui::{Align2, Color32, FontId, Pos2, Sense, Stroke, StrokeKind, Vec2};

use crate::geometry;
use crate::graph::Graph;
use crate::input::{PointerButton, PointerEvent};
use crate::node::{DragState, NodeId};
use crate::node_kind::NodeKind;
use transform::{from_screen, to_screen};

/// Pointer/modifier state sampled once per frame.
struct FrameInput {
    primary_pressed: bool,
    primary_released: bool,
    primary_down: bool,
    secondary_pressed: bool,
    middle_down: bool,
    alt: bool,
    delta: Vec2,
    pos: Option<Pos2>,
}

pub struct GraphEditor {
    pub pan: Vec2,
    pub style: EditorStyle,
    /// Last pointer position in canvas space; the open end of an
    /// in-progress wire.
    wire_cursor: Option<Pos2>,
    /// Canvas position captured when the add-node menu was opened.
    menu_pos: Option<Pos2>,
}

impl Default for GraphEditor {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            style: EditorStyle::default(),
            wire_cursor: None,
            menu_pos: None,
        }
    }
}

impl GraphEditor {
    pub fn show(&mut self, ui: &mut egui::Ui, graph: &mut Graph) {
        let canvas = ui.max_rect();
        let canvas_offset = canvas.min;

        let input = ui.input(|i| FrameInput {
            primary_pressed: i.pointer.primary_pressed(),
            primary_released: i.pointer.primary_released(),
            primary_down: i.pointer.primary_down(),
            secondary_pressed: i.pointer.secondary_pressed(),
            middle_down: i.pointer.middle_down(),
            alt: i.modifiers.alt,
            delta: i.pointer.delta(),
            pos: i.pointer.latest_pos(),
        });

        // Pan with middle mouse or Alt + primary drag.
        let panning = input.middle_down || (input.alt && input.primary_down);
        if panning {
            self.pan += input.delta;
        }

        // New presses only count when the pointer is on this layer, so
        // clicks on floating windows and menus don't reach the nodes
        // underneath.
        let on_canvas_layer = input
            .pos
            .and_then(|p| ui.ctx().layer_id_at(p))
            .is_none_or(|layer| layer == ui.layer_id());

        let event = self.translate_pointer(graph, &input, panning, on_canvas_layer, canvas_offset);
        if let Some(event) = event {
            if let PointerEvent::Down { pos, .. } | PointerEvent::Move { pos, .. } = event {
                self.wire_cursor = Some(pos);
            }
            graph.update(&event);
        }

        let offset = canvas_offset.to_vec2() + self.pan;
        let hover_pos = input.pos.map(|p| from_screen(p, self.pan, canvas_offset));
        let painter = ui.painter().clone();
        painter.rect_filled(canvas, 0.0, self.style.background);

        if graph.is_empty() {
            painter.text(
                canvas.center(),
                Align2::CENTER_CENTER,
                "Right-click to add a node",
                FontId::proportional(16.0),
                Color32::from_gray(120),
            );
        }

        // Background context menu: add a node at the clicked spot.
        let bg_response = ui.interact(canvas, ui.id().with("canvas_bg"), Sense::click());
        if bg_response.secondary_clicked() {
            self.menu_pos = bg_response
                .interact_pointer_pos()
                .map(|p| from_screen(p, self.pan, canvas_offset));
        }
        bg_response.context_menu(|ui| {
            for kind in NodeKind::palette() {
                if ui.button(kind.label()).clicked() {
                    let pos = self.menu_pos.take().unwrap_or(Pos2::new(100.0, 100.0));
                    graph.add_node(kind, pos, geometry::DEFAULT_NODE_SIZE);
                    ui.close();
                }
            }
        });

        // Persisted wires, one per successor link.
        for node in graph.nodes() {
            if let Some(succ) = node.successor {
                let Some(target) = graph.node(succ) else {
                    continue;
                };
                let (from_color, to_color) = if self.style.use_gradient_wires {
                    (
                        self.style.header_color(node.kind.label()),
                        self.style.header_color(target.kind.label()),
                    )
                } else {
                    (Color32::WHITE, Color32::WHITE)
                };
                wire::draw_wire(
                    &painter,
                    to_screen(node.output_anchor(), self.pan, canvas_offset),
                    to_screen(target.input_anchor(), self.pan, canvas_offset),
                    from_color,
                    to_color,
                );
            }
        }

        // In-progress wire follows the pointer.
        for node in graph.nodes() {
            let anchor = match node.state() {
                DragState::WiringFromOutput => Some((node.output_anchor(), true)),
                DragState::WiringFromInput => Some((node.input_anchor(), false)),
                _ => None,
            };
            if let (Some((anchor, from_output)), Some(cursor)) = (anchor, self.wire_cursor) {
                let anchor = to_screen(anchor, self.pan, canvas_offset);
                let cursor = to_screen(cursor, self.pan, canvas_offset);
                if from_output {
                    wire::draw_wire(&painter, anchor, cursor, Color32::WHITE, Color32::WHITE);
                } else {
                    wire::draw_wire(&painter, cursor, anchor, Color32::WHITE, Color32::WHITE);
                }
            }
        }

        // Nodes on top of wires.
        let mut disconnect_node_id: Option<NodeId> = None;
        let mut delete_node_id: Option<NodeId> = None;

        for node in graph.nodes_mut() {
            let rect = node.rect().translate(offset);
            let title_rect = geometry::title_rect(node.rect()).translate(offset);
            let header_color = self.style.header_color(node.kind.label());

            painter.rect_filled(rect, 5.0, self.style.node_fill);
            painter.rect_filled(title_rect, 5.0, header_color);
            painter.rect_stroke(
                rect,
                5.0,
                Stroke::new(1.0, self.style.node_outline),
                StrokeKind::Middle,
            );
            painter.text(
                title_rect.left_center() + Vec2::new(6.0, 0.0),
                Align2::LEFT_CENTER,
                &node.title,
                FontId::proportional(self.style.font_size),
                Color32::WHITE,
            );

            for (port, color) in [
                (node.input_port(), self.style.input_port_color),
                (node.output_port(), self.style.output_port_color),
            ] {
                let port_screen = port.translate(offset);
                painter.rect_filled(port_screen, 2.0, color);
                if hover_pos.is_some_and(|p| port.contains(p)) {
                    painter.rect_stroke(
                        port_screen,
                        2.0,
                        Stroke::new(1.5, Color32::WHITE),
                        StrokeKind::Outside,
                    );
                }
            }

            ui.interact(rect, ui.id().with(node.id), Sense::click())
                .context_menu(|ui| {
                    if ui.button("Disconnect").clicked() {
                        disconnect_node_id = Some(node.id);
                        ui.close();
                    }
                    if ui.button("Delete").clicked() {
                        delete_node_id = Some(node.id);
                        ui.close();
                    }
                });

            if node.kind.has_body() {
                let body = geometry::body_content_rect(node.rect()).translate(offset);
                let mut body_ui = ui.new_child(egui::UiBuilder::new().max_rect(body));
                node.kind.show_body(&mut body_ui);
            }
        }

        if let Some(id) = disconnect_node_id {
            graph.disconnect_node(id);
        }
        if let Some(id) = delete_node_id {
            graph.remove_node(id);
        }
    }

    /// Turn this frame's pointer activity into at most one event for the
    /// graph core, in canvas coordinates.
    fn translate_pointer(
        &self,
        graph: &Graph,
        input: &FrameInput,
        panning: bool,
        on_canvas_layer: bool,
        canvas_offset: Pos2,
    ) -> Option<PointerEvent> {
        let pos = from_screen(input.pos?, self.pan, canvas_offset);

        // Releases always go through so no drag is left dangling when a
        // pan starts mid-gesture or the pointer ends up over a window.
        if input.primary_released {
            return Some(PointerEvent::Up { pos });
        }
        if panning {
            return None;
        }
        if input.primary_pressed {
            // Presses on a kind's body widgets belong to egui, not the graph.
            if !on_canvas_layer || self.over_body_widgets(graph, pos) {
                return None;
            }
            return Some(PointerEvent::Down {
                pos,
                button: PointerButton::Primary,
            });
        }
        if input.secondary_pressed {
            if !on_canvas_layer {
                return None;
            }
            return Some(PointerEvent::Down {
                pos,
                button: PointerButton::Secondary,
            });
        }
        if input.primary_down && input.delta != Vec2::ZERO {
            return Some(PointerEvent::Move {
                pos,
                delta: input.delta,
            });
        }
        None
    }

    fn over_body_widgets(&self, graph: &Graph, pos: Pos2) -> bool {
        graph.nodes().iter().any(|node| {
            node.kind.has_body() && geometry::body_content_rect(node.rect()).contains(pos)
        })
    }
}
