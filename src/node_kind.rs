//! Per-kind node payloads.
//!
//! Each kind carries its own serializable parameters and knows how to render
//! them inside the node body. The graph core treats `NodeKind` as opaque;
//! only the editor calls into it.

use egui::Ui;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Chain entry marker, no parameters.
    Trigger,
    Delay { duration_ms: u64 },
    Message { text: String },
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "Trigger",
            NodeKind::Delay { .. } => "Delay",
            NodeKind::Message { .. } => "Message",
        }
    }

    /// Default instances offered by the add-node menu.
    pub fn palette() -> [NodeKind; 3] {
        [
            NodeKind::Trigger,
            NodeKind::Delay { duration_ms: 1000 },
            NodeKind::Message {
                text: "Hello".into(),
            },
        ]
    }

    pub fn has_body(&self) -> bool {
        !matches!(self, NodeKind::Trigger)
    }

    /// Draw this kind's parameter widgets into the node body area.
    pub fn show_body(&mut self, ui: &mut Ui) {
        match self {
            NodeKind::Trigger => {}
            NodeKind::Delay { duration_ms } => {
                ui.horizontal(|ui| {
                    ui.label("Duration");
                    ui.add(
                        egui::DragValue::new(duration_ms)
                            .speed(10)
                            .range(0..=600_000)
                            .suffix(" ms"),
                    );
                });
            }
            NodeKind::Message { text } => {
                ui.text_edit_singleline(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(NodeKind::Trigger.label(), "Trigger");
        assert_eq!(NodeKind::Delay { duration_ms: 0 }.label(), "Delay");
        assert_eq!(
            NodeKind::Message { text: String::new() }.label(),
            "Message"
        );
    }

    #[test]
    fn test_trigger_has_no_body() {
        assert!(!NodeKind::Trigger.has_body());
        assert!(NodeKind::Delay { duration_ms: 500 }.has_body());
    }

    #[test]
    fn test_parameters_roundtrip() {
        let kind = NodeKind::Delay { duration_ms: 250 };
        let json = serde_json::to_string(&kind).unwrap();
        let back: NodeKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
