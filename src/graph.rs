//! Graph controller: owns the node collection and performs all cross-node
//! mutation.
//!
//! Nodes only report wire-release signals; turning a release point into an
//! edge (including evicting whatever previously occupied either port) happens
//! here, so the link invariant `A.successor == B <=> B.predecessor == A`
//! holds after every update.

use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::input::PointerEvent;
use crate::node::{Node, NodeId, PortKind, WireRelease};
use crate::node_kind::NodeKind;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Insertion-ordered: iteration order is the hit-test priority when
    /// ports from different nodes overlap.
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, kind: NodeKind, position: Pos2, size: Vec2) -> NodeId {
        let node = Node::new(kind, position, size);
        let id = node.id;
        log::info!("add node {} at {:?}", node.title, position);
        self.nodes.push(node);
        id
    }

    /// Remove a node, clearing any links into it from both sides.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let node = self.nodes.remove(idx);
        if let Some(pred) = node.predecessor {
            if let Some(i) = self.index_of(pred) {
                self.nodes[i].successor = None;
            }
        }
        if let Some(succ) = node.successor {
            if let Some(i) = self.index_of(succ) {
                self.nodes[i].predecessor = None;
            }
        }
        log::info!("remove node {}", node.title);
        true
    }

    /// Tear down both of a node's edges, leaving the node in place.
    pub fn disconnect_node(&mut self, id: NodeId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        if let Some(pred) = self.nodes[idx].predecessor.take() {
            if let Some(i) = self.index_of(pred) {
                self.nodes[i].successor = None;
            }
        }
        if let Some(succ) = self.nodes[idx].successor.take() {
            if let Some(i) = self.index_of(succ) {
                self.nodes[i].predecessor = None;
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deliver one pointer event to every node's state machine.
    ///
    /// Each emitted release is resolved completely, eviction included,
    /// before the next node is updated, so later machines never observe a
    /// half-rewired link state.
    pub fn update(&mut self, event: &PointerEvent) {
        for i in 0..self.nodes.len() {
            if let Some(release) = self.nodes[i].handle_event(event) {
                self.resolve_release(i, release);
            }
        }
    }

    /// Find the first other node whose opposite port contains the release
    /// point and rewire; a release over nothing is silently discarded.
    fn resolve_release(&mut self, source: usize, release: WireRelease) {
        let target = self.nodes.iter().enumerate().position(|(i, node)| {
            i != source
                && match release.port {
                    PortKind::Input => node.output_port().contains(release.pos),
                    PortKind::Output => node.input_port().contains(release.pos),
                }
        });
        let Some(target) = target else {
            return;
        };
        match release.port {
            PortKind::Input => self.connect(target, source),
            PortKind::Output => self.connect(source, target),
        }
    }

    /// Create the edge `from -> to`, evicting whatever edge previously
    /// occupied either endpoint port.
    fn connect(&mut self, from: usize, to: usize) {
        let from_id = self.nodes[from].id;
        let to_id = self.nodes[to].id;

        if let Some(old) = self.nodes[from].successor.take() {
            if let Some(i) = self.index_of(old) {
                self.nodes[i].predecessor = None;
                log::debug!(
                    "evict edge {} -> {}",
                    self.nodes[from].title,
                    self.nodes[i].title
                );
            }
        }
        if let Some(old) = self.nodes[to].predecessor.take() {
            if let Some(i) = self.index_of(old) {
                self.nodes[i].successor = None;
                log::debug!(
                    "evict edge {} -> {}",
                    self.nodes[i].title,
                    self.nodes[to].title
                );
            }
        }

        self.nodes[from].successor = Some(to_id);
        self.nodes[to].predecessor = Some(from_id);
        log::debug!(
            "connect {} -> {}",
            self.nodes[from].title,
            self.nodes[to].title
        );
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;
    use egui::{pos2, vec2};

    const SIZE: Vec2 = Vec2::new(150.0, 60.0);

    fn graph_ab() -> (Graph, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node(NodeKind::Trigger, pos2(0.0, 0.0), SIZE);
        let b = graph.add_node(NodeKind::Delay { duration_ms: 100 }, pos2(300.0, 0.0), SIZE);
        (graph, a, b)
    }

    /// Press, move to, and release: one full drag gesture.
    fn drag(graph: &mut Graph, from: Pos2, to: Pos2) {
        graph.update(&PointerEvent::Down {
            pos: from,
            button: PointerButton::Primary,
        });
        graph.update(&PointerEvent::Move {
            pos: to,
            delta: to - from,
        });
        graph.update(&PointerEvent::Up { pos: to });
    }

    /// Every link must be mirrored on the node it points at.
    fn assert_links_consistent(graph: &Graph) {
        for node in graph.nodes() {
            if let Some(succ) = node.successor {
                assert_eq!(graph.node(succ).unwrap().predecessor, Some(node.id));
            }
            if let Some(pred) = node.predecessor {
                assert_eq!(graph.node(pred).unwrap().successor, Some(node.id));
            }
        }
    }

    #[test]
    fn test_wire_output_to_input() {
        let (mut graph, a, b) = graph_ab();

        // Grab the outer half of A's output port, release inside B's input port.
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(b).unwrap().predecessor, Some(a));
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_wire_input_to_output() {
        // Same edge authored from the other end: B's input port to A's output.
        let (mut graph, a, b) = graph_ab();

        drag(&mut graph, pos2(295.0, 30.0), pos2(155.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(b).unwrap().predecessor, Some(a));
    }

    #[test]
    fn test_release_over_empty_canvas_is_noop() {
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        drag(&mut graph, pos2(155.0, 30.0), pos2(600.0, 400.0));

        // Existing links untouched, nothing new created.
        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(b).unwrap().predecessor, Some(a));
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_eviction_on_contested_input_port() {
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        let c = graph.add_node(NodeKind::Trigger, pos2(0.0, 200.0), SIZE);
        drag(&mut graph, pos2(155.0, 230.0), pos2(295.0, 30.0));

        assert_eq!(graph.node(b).unwrap().predecessor, Some(c));
        assert_eq!(graph.node(c).unwrap().successor, Some(b));
        assert_eq!(graph.node(a).unwrap().successor, None);
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_eviction_on_contested_output_port() {
        // A -> B exists; C drags from its own input onto A's output, which
        // steals A's successor edge away from B.
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        let c = graph.add_node(NodeKind::Trigger, pos2(0.0, 200.0), SIZE);
        drag(&mut graph, pos2(-5.0, 230.0), pos2(155.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(c));
        assert_eq!(graph.node(c).unwrap().predecessor, Some(a));
        assert_eq!(graph.node(b).unwrap().predecessor, None);
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_reconnecting_same_edge_is_stable() {
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(b).unwrap().predecessor, Some(a));
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_self_wire_excluded() {
        let (mut graph, a, b) = graph_ab();

        // A's output released over A's own input port.
        drag(&mut graph, pos2(155.0, 30.0), pos2(-5.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, None);
        assert_eq!(graph.node(a).unwrap().predecessor, None);
        assert_eq!(graph.node(b).unwrap().predecessor, None);
    }

    #[test]
    fn test_body_drag_moves_node_and_keeps_links() {
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));

        graph.update(&PointerEvent::Down {
            pos: pos2(75.0, 30.0),
            button: PointerButton::Primary,
        });
        graph.update(&PointerEvent::Move {
            pos: pos2(85.0, 25.0),
            delta: vec2(10.0, -5.0),
        });
        graph.update(&PointerEvent::Up {
            pos: pos2(85.0, 25.0),
        });

        let moved = graph.node(a).unwrap();
        assert_eq!(moved.position, pos2(10.0, -5.0));
        assert_eq!(moved.input_anchor(), pos2(10.0, 25.0));
        assert_eq!(moved.output_anchor(), pos2(160.0, 25.0));
        assert_eq!(moved.successor, Some(b));
        assert_eq!(graph.node(b).unwrap().predecessor, Some(a));
    }

    #[test]
    fn test_overlapping_ports_first_in_collection_wins() {
        let (mut graph, a, b) = graph_ab();
        // C's input port overlaps B's: both contain (295, 35).
        let c = graph.add_node(NodeKind::Trigger, pos2(300.0, 10.0), SIZE);

        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 35.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(c).unwrap().predecessor, None);
    }

    #[test]
    fn test_release_after_target_removed() {
        let (mut graph, a, b) = graph_ab();

        graph.update(&PointerEvent::Down {
            pos: pos2(155.0, 30.0),
            button: PointerButton::Primary,
        });
        // Target vanishes mid-drag; the release finds no containing port.
        graph.remove_node(b);
        graph.update(&PointerEvent::Up {
            pos: pos2(295.0, 30.0),
        });

        assert_eq!(graph.node(a).unwrap().successor, None);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_remove_node_clears_links_on_both_sides() {
        let (mut graph, a, b) = graph_ab();
        let c = graph.add_node(NodeKind::Trigger, pos2(600.0, 0.0), SIZE);
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));
        drag(&mut graph, pos2(455.0, 30.0), pos2(595.0, 30.0));

        // A -> B -> C, then B goes away.
        assert!(graph.remove_node(b));

        assert_eq!(graph.node(a).unwrap().successor, None);
        assert_eq!(graph.node(c).unwrap().predecessor, None);
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_disconnect_node() {
        let (mut graph, a, b) = graph_ab();
        let c = graph.add_node(NodeKind::Trigger, pos2(600.0, 0.0), SIZE);
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));
        drag(&mut graph, pos2(455.0, 30.0), pos2(595.0, 30.0));

        graph.disconnect_node(b);

        assert_eq!(graph.node(a).unwrap().successor, None);
        assert_eq!(graph.node(b).unwrap().predecessor, None);
        assert_eq!(graph.node(b).unwrap().successor, None);
        assert_eq!(graph.node(c).unwrap().predecessor, None);
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_two_node_cycle_is_permitted() {
        let (mut graph, a, b) = graph_ab();
        drag(&mut graph, pos2(155.0, 30.0), pos2(295.0, 30.0));
        // B's output back onto A's input.
        drag(&mut graph, pos2(455.0, 30.0), pos2(-5.0, 30.0));

        assert_eq!(graph.node(a).unwrap().successor, Some(b));
        assert_eq!(graph.node(b).unwrap().successor, Some(a));
        assert_links_consistent(&graph);
    }

    #[test]
    fn test_rewiring_storm_keeps_invariant() {
        let mut graph = Graph::new();
        for i in 0..4 {
            graph.add_node(NodeKind::Trigger, pos2(0.0, i as f32 * 100.0), SIZE);
        }
        let out = |i: usize| pos2(155.0, i as f32 * 100.0 + 30.0);
        let inp = |i: usize| pos2(-5.0, i as f32 * 100.0 + 30.0);

        drag(&mut graph, out(0), inp(1));
        drag(&mut graph, out(1), inp(2));
        drag(&mut graph, out(0), inp(2)); // steals 2's input and 0's output
        drag(&mut graph, inp(3), out(1)); // authored from the input side
        drag(&mut graph, out(3), inp(0));

        assert_links_consistent(&graph);
        // Fan-in stays <= 1: no id appears twice as a successor.
        let succs: Vec<_> = graph.nodes().iter().filter_map(|n| n.successor).collect();
        for id in &succs {
            assert_eq!(succs.iter().filter(|s| *s == id).count(), 1);
        }
    }
}
