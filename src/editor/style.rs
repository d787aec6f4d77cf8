//! Editor styling configuration.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visual styling for the chain editor canvas.
#[derive(Clone, Serialize, Deserialize)]
pub struct EditorStyle {
    pub background: Color32,
    pub node_fill: Color32,
    pub node_outline: Color32,
    /// Title strip color per node-kind label, with a "Default" fallback.
    pub header_colors: HashMap<String, Color32>,
    pub input_port_color: Color32,
    pub output_port_color: Color32,
    pub use_gradient_wires: bool,
    pub font_size: f32,
}

impl Default for EditorStyle {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("Trigger".into(), Color32::from_rgb(180, 50, 50));
        map.insert("Delay".into(), Color32::from_rgb(100, 200, 100));
        map.insert("Message".into(), Color32::from_rgb(50, 100, 200));
        map.insert("Default".into(), Color32::from_rgb(100, 100, 100));
        Self {
            background: Color32::from_gray(32),
            node_fill: Color32::from_gray(55),
            node_outline: Color32::from_gray(90),
            header_colors: map,
            input_port_color: Color32::LIGHT_BLUE,
            output_port_color: Color32::KHAKI,
            use_gradient_wires: true,
            font_size: 14.0,
        }
    }
}

impl EditorStyle {
    pub fn header_color(&self, label: &str) -> Color32 {
        self.header_colors
            .get(label)
            .or_else(|| self.header_colors.get("Default"))
            .copied()
            .unwrap_or(Color32::from_rgb(100, 100, 100))
    }
}
